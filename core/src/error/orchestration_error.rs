// core/src/error/orchestration_error.rs
use thiserror::Error;

use super::{ExecutionError, PlanningError};

/// Fatal outcome of a run. The message names the stage that failed.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("planning failed")]
    Planning(#[from] PlanningError),

    #[error("build failed")]
    Build {
        #[source]
        source: ExecutionError,
    },

    #[error("execution failed after {completed} completed shot(s)")]
    Execution {
        completed: usize,
        #[source]
        source: ExecutionError,
    },

    #[error("shot task failed to complete: {0}")]
    Join(String),
}

impl OrchestrationError {
    pub fn stage(&self) -> &'static str {
        match self {
            OrchestrationError::Planning(_) => "planning",
            OrchestrationError::Build { .. } => "build",
            OrchestrationError::Execution { .. } | OrchestrationError::Join(_) => "execution",
        }
    }
}
