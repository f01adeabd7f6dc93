//! Tracing setup for the CLI host.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use vitrine_core::config::paths;

const DEFAULT_FILTER: &str = "vitrine=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("VITRINE_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Logs to stderr; used by non-interactive modes.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs to a rolling file under $VITRINE_HOME/logs.
///
/// The alternate screen owns the terminal in interactive mode, so nothing may
/// write to stderr. Keep the returned guard alive for the session.
pub fn init_file() -> Result<WorkerGuard> {
    let dir = paths::logs_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, "vitrine.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(guard)
}
