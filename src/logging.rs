use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Keeps the background log writer alive; drop flushes it.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// Route tracing output to a daily log file. The terminal belongs to the UI,
/// so nothing is written to stdout. `RUST_LOG` wins over the configured level.
pub fn init_tracing(log_level: &str, log_dir: &Path) -> Option<FileLogGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(err) = std::fs::create_dir_all(log_dir) {
        eprintln!("failed to create log directory {}: {err}", log_dir.display());
        return None;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "satzbau.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Some(FileLogGuard { _guard: guard })
}
