// core/src/error/exec_error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to spawn process: {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited unsuccessfully: code={code}{}", stderr_suffix(.stderr))]
    NonZeroExit {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("{program} did not exit within {secs}s")]
    Timeout { program: String, secs: u64 },

    #[error("io error while waiting for {program}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExecutionError {
    /// True when the process ran and reported failure, as opposed to never starting.
    pub fn is_exit_failure(&self) -> bool {
        matches!(self, ExecutionError::NonZeroExit { .. })
    }
}

/// Trimmed stderr on its own line, or nothing when the process printed none.
fn stderr_suffix(stderr: &str) -> String {
    match stderr.trim() {
        "" => String::new(),
        tail => format!("\n{tail}"),
    }
}
