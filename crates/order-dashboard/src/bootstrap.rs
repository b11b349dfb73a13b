use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashboard_core::error::{DashboardError, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const APP_DIR: &str = ".order-dashboard";
const LOG_FILE_NAME: &str = "dashboard.log";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// `~/.order-dashboard/`.
pub fn app_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(APP_DIR))
        .ok_or_else(|| DashboardError::Config("could not determine the home directory".to_string()))
}

/// Ensure `~/.order-dashboard/logs/` exists (including any missing parents)
/// and return it.
pub fn ensure_directories() -> Result<PathBuf> {
    let logs = app_dir()?.join("logs");
    std::fs::create_dir_all(&logs)?;
    Ok(logs)
}

/// Where dashboard-view logs go when `--log-file` is not given.
pub fn default_log_file() -> Result<PathBuf> {
    Ok(ensure_directories()?.join(LOG_FILE_NAME))
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to an [`EnvFilter`] directive.
fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file` set, records are appended to that file without ANSI
/// colours; otherwise they go to stderr. Unrecognised levels fall back to
/// `"info"`.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| DashboardError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })?;

            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .map_err(|e| DashboardError::Other(e.into()))?;
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .map_err(|e| DashboardError::Other(e.into()))?;
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
