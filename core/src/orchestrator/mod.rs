//! Shot orchestration: plan, dispatch, run batches, aggregate.

mod progress;
mod retry;
mod run;

pub use progress::{NullProgress, ProgressSink};
pub use run::{OrchestratorOptions, ShotOrchestrator, BATCH_SIZE};
