use std::path::Path;

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Logs to stderr at `console_level` (overridable through `RUST_LOG`) and to
/// `log_path` at `file_level`. Keep the returned guard alive until exit so
/// buffered file output is flushed.
pub fn init_logging(
    console_level: LevelFilter,
    log_path: &Path,
    file_level: LevelFilter,
) -> anyhow::Result<WorkerGuard> {
    let directory = log_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .with_context(|| format!("Log path has no file name: {}", log_path.display()))?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    let console_filter = EnvFilter::builder()
        .with_default_directive(console_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(file_level),
        )
        .try_init()?;

    Ok(guard)
}
