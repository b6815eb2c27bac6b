use crate::error::ExecutionError;
use crate::invoker::{ExecutionInvoker, ProcessOutput};
use crate::strategy::ExecutionPlan;

/// Invokes `plan`, re-running it while the process exits unsuccessfully and attempts remain.
/// Launch failures are returned immediately.
pub(crate) async fn invoke_with_retry(
    invoker: &dyn ExecutionInvoker,
    plan: &ExecutionPlan,
    max_attempts: u32,
) -> Result<ProcessOutput, ExecutionError> {
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match invoker.invoke(plan).await {
            Ok(output) => return Ok(output),
            Err(e) if e.is_exit_failure() && attempt < max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error.message = %e,
                    "invocation failed, retrying"
                );
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
