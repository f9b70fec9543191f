use crate::{CONFIG_DIRECTORY, Settings};
use anyhow::{Context, Result, anyhow};
use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "listplayer.log";

pub fn log_path() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .ok_or_else(|| anyhow!("Could not determine cache directory!"))?
        .join(CONFIG_DIRECTORY);
    Ok(dir.join(LOG_FILE))
}

/// Sends logs to a file, since the terminal belongs to the interface.
/// `RUST_LOG` wins over the configured level.
pub fn configure_logging(settings: &Settings) -> Result<()> {
    let path = log_path()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Could not create {}", dir.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Could not open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .context("Invalid log level")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init()
        .map_err(|e| anyhow!("Could not set up logging: {e}"))?;

    Ok(())
}
