//! File logging for the terminal client.
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform cache directory for logs.
///
/// - macOS: `~/Library/Caches/qbuckshot/logs`
/// - Linux: `~/.cache/qbuckshot/logs` (or `$XDG_CACHE_HOME/qbuckshot/logs`)
/// - Windows: `%LOCALAPPDATA%\qbuckshot\cache\logs`
/// - Fallback: `/tmp/qbuckshot/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "qbuckshot")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/qbuckshot"))
        .join("logs")
}

/// Routes `tracing` output to a log file so it never mixes with game text.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn setup_logging() -> Result<PathBuf> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&dir, "qbuckshot.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the rest of the process.
    std::mem::forget(guard);

    let path = dir.join("qbuckshot.log");
    tracing::info!("Logging initialized: {}", path.display());
    Ok(path)
}
