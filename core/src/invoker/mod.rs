//! The boundary to the external program: run it once, hand back what it printed.

mod exit;

use async_trait::async_trait;

use crate::error::ExecutionError;
use crate::strategy::ExecutionPlan;

pub use exit::normalize_exit;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Runs an [`ExecutionPlan`] once.
///
/// Implementations own no run state and never retry; retry policy belongs to the orchestrator.
/// Launch failures must surface as [`ExecutionError::Spawn`] and unsuccessful exits as
/// [`ExecutionError::NonZeroExit`] so callers can tell them apart.
#[async_trait]
pub trait ExecutionInvoker: Send + Sync {
    async fn invoke(&self, plan: &ExecutionPlan) -> Result<ProcessOutput, ExecutionError>;
}
