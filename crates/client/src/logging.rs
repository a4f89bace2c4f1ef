//! Logging to stderr and to a per-session file.
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::ClientConfig;

const LOG_FILE: &str = "client.log";

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held
/// until the client exits.
pub fn setup_logging(config: &ClientConfig) -> Result<WorkerGuard> {
    let session_id = config.session_id.clone().unwrap_or_else(generated_session_id);
    let session_log_dir = config.log_dir.clone().unwrap_or_else(log_dir).join(&session_id);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!(
            "Failed to create log directory: {}",
            session_log_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,runtime=debug"));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr);
    let file_layer = fmt::layer().with_writer(non_blocking_file).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(session = %session_id, "logging initialized");
    tracing::info!("Log file: {}", session_log_dir.join(LOG_FILE).display());

    Ok(guard)
}

/// Platform cache directory for logs, `/tmp/strikefx/logs` as a last resort.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "strikefx")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/strikefx"))
        .join("logs")
}

fn generated_session_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{timestamp}")
}
