//! Logging setup for bundleforge

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Per-run log file path: `<tmp>/bundleforge-logs/<folder>_<pid>_<timestamp>.log`
pub fn get_log_file_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let current_dir = std::env::current_dir()?;
    let folder_name = current_dir
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("unknown"))
        .to_string_lossy()
        .into_owned();

    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let pid = std::process::id();

    let logs_dir = std::env::temp_dir().join("bundleforge-logs");
    std::fs::create_dir_all(&logs_dir)?;

    Ok(logs_dir.join(format!("{folder_name}_{pid}_{timestamp}.log")))
}

pub fn create_log_file() -> Result<(File, PathBuf), Box<dyn std::error::Error>> {
    let log_path = get_log_file_path()?;
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;
    Ok((log_file, log_path))
}

/// Console at `RUST_LOG` (default info) plus a debug-level log file. Without
/// a writable log file only the console layer is installed.
pub fn init() -> Option<PathBuf> {
    let (file_layer, log_path) = match create_log_file() {
        Ok((file, path)) => (
            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_level(true)
                    .with_filter(EnvFilter::new("debug")),
            ),
            Some(path),
        ),
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_level(true)
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                ),
        )
        .with(file_layer)
        .init();

    log_path
}
