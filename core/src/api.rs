//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `collapse_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load as load_config, load_default as load_default_config, AppConfig, AzureConfig,
    LoggingConfig, RunnerConfig, SimulateConfig,
};
pub use crate::error::{
    CliError, ConfigError, ExecutionError, OrchestrationError, ParseError, PlanningError,
};
pub use crate::invoker::{normalize_exit, ExecutionInvoker, ProcessOutput};
pub use crate::orchestrator::{
    NullProgress, OrchestratorOptions, ProgressSink, ShotOrchestrator, BATCH_SIZE,
};
pub use crate::outcome::{normalize_line, sanitize_output, OutputMode};
pub use crate::response::{extract_histogram, try_extract_histogram, DuplicateLabels, Histogram};
pub use crate::strategy::{
    DelegatedFormat, Dispatch, ExecutionPlan, ExecutionStrategy, StrategyKind,
};
pub use crate::tally::{SortOrder, Tally, TallyAggregator, TallyKind};
