use anyhow::{Result, anyhow};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub mod app_core;
pub mod config;
pub mod domain;
pub mod key_handler;
pub mod logging;
pub mod player;
pub mod tui;
pub mod ui_state;

pub use config::Settings;
pub use domain::{EntryIndex, EntryList, ListEntry};
pub use player::{PlayerController, ProgressSynchronizer};
pub use ui_state::{CellId, CellPool};

pub const CONFIG_DIRECTORY: &str = "listplayer";

// ~30fps
pub const REFRESH_RATE: Duration = Duration::from_millis(33);

/// `m:ss`, the way row and status times are shown.
pub fn get_readable_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;

    if path_str == "~" {
        return Ok(home);
    }

    if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        return Ok(home.join(&path_str[2..]));
    }

    Err(anyhow!("Error reading path with tilde (~): {path_str}"))
}
