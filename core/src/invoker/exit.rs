use std::process::ExitStatus;

/// Collapses an exit status into one code. A unix process killed by signal `n` reports `128 + n`,
/// the way shells do.
pub fn normalize_exit(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| signal_code(status))
        .unwrap_or(1)
}

#[cfg(unix)]
fn signal_code(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|sig| 128 + sig)
}

#[cfg(not(unix))]
fn signal_code(_status: ExitStatus) -> Option<i32> {
    None
}
