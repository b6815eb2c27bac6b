// core/src/error/cli_error.rs
use thiserror::Error;

use super::{ConfigError, OrchestrationError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Orchestration(#[from] OrchestrationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize results")]
    Serialize(#[source] serde_json::Error),
}
