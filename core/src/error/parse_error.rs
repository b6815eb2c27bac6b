// core/src/error/parse_error.rs
use thiserror::Error;

/// Non-fatal output parsing failures. Callers log these and carry on.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid json payload")]
    InvalidJson(#[source] serde_json::Error),

    #[error("json payload is not terminated")]
    MissingPayloadEnd,

    #[error("malformed histogram entry at index {index}")]
    MalformedEntry { index: usize },

    #[error("output contains no result line")]
    EmptyOutput,
}
