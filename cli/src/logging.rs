use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use collapse_core::api::LoggingConfig;

pub const LOG_FILE_NAME: &str = "collapse.log";

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// The returned guard must live until exit so buffered file logs are flushed.
pub fn init(cfg: &LoggingConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.level.as_str()));

    match &cfg.directory {
        Some(dir) => {
            let dir = PathBuf::from(shellexpand::tilde(dir).into_owned());
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}
