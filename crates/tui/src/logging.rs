use std::{fs::OpenOptions, path::Path, sync::Mutex};

use crate::error::{AppError, Result};

/// Sends `tracing` output to `log_file`; the terminal belongs to the UI.
pub fn init(log_file: &str, level: &str) -> Result<()> {
    if let Some(parent) = Path::new(log_file).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("shopdesk_tui={level},listing={level}"))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
