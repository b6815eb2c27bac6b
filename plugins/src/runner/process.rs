use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use collapse_core::api as core_api;

/// Bytes of stderr kept on a failed exit.
const STDERR_TAIL_BYTES: usize = 4096;

/// Spawns each plan as a child process and captures its output.
#[derive(Debug, Clone, Default)]
pub struct ProcessInvoker {
    timeout: Option<Duration>,
    envs: HashMap<String, String>,
}

impl ProcessInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_envs(mut self, envs: HashMap<String, String>) -> Self {
        self.envs = envs;
        self
    }
}

#[async_trait]
impl core_api::ExecutionInvoker for ProcessInvoker {
    async fn invoke(
        &self,
        plan: &core_api::ExecutionPlan,
    ) -> Result<core_api::ProcessOutput, core_api::ExecutionError> {
        let program = plan.program.clone();

        let mut cmd = Command::new(&plan.program);
        cmd.args(&plan.args)
            .envs(&self.envs)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::trace!(command = %plan, "spawning");
        let child = cmd.spawn().map_err(|source| core_api::ExecutionError::Spawn {
            program: program.clone(),
            source,
        })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let waited = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| core_api::ExecutionError::Timeout {
                    program: program.clone(),
                    secs: limit.as_secs(),
                })?,
            None => child.wait_with_output().await,
        };
        let output = waited.map_err(|source| core_api::ExecutionError::Io {
            program: program.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            let code = core_api::normalize_exit(output.status);
            tracing::debug!(program = %program, code, "process exited unsuccessfully");
            return Err(core_api::ExecutionError::NonZeroExit {
                program,
                code,
                stderr: tail(&stderr, STDERR_TAIL_BYTES).to_string(),
            });
        }

        Ok(core_api::ProcessOutput { stdout, stderr })
    }
}

/// Last `max` bytes of `s`, moved forward to a char boundary.
fn tail(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut start = s.len() - max;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}
