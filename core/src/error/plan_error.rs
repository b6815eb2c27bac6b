// core/src/error/plan_error.rs
use thiserror::Error;

/// Raised by an execution strategy before anything is spawned.
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("no target path specified")]
    NoTarget,

    #[error("no valid executable found at {path}")]
    ExecutableNotFound { path: String },

    #[error("missing required configuration: {key}")]
    MissingConfig { key: &'static str },

    #[error("shot count must be at least 1 (got {0})")]
    InvalidShots(u32),

    #[error("failed to inspect {path}")]
    Discovery {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
