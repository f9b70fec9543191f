mod settings_import;

use crate::{CONFIG_DIRECTORY, expand_tilde};
use anyhow::{Context, Result, anyhow};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use settings_import::SettingsImport;

pub const CONFIG_FILE: &str = "config.toml";

const DEFAULT_SAMPLE: &str = "~/Music/sample.mp3";
const DEFAULT_ENTRY_COUNT: usize = 256;
const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
const DEFAULT_SEEK_STEP_SECS: u64 = 5;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub sample: PathBuf,
    pub entries_dir: Option<PathBuf>,
    pub entry_count: usize,
    pub tick_interval: Duration,
    pub seek_step: Duration,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sample: expand_tilde(DEFAULT_SAMPLE).unwrap_or_else(|_| PathBuf::from(DEFAULT_SAMPLE)),
            entries_dir: None,
            entry_count: DEFAULT_ENTRY_COUNT,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            seek_step: Duration::from_secs(DEFAULT_SEEK_STEP_SECS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Reads the user's config file, falling back to defaults when it does
    /// not exist. A present but malformed file is an error.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_str = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Could not read {}", path.as_ref().display()))?;
        let import = toml::from_str::<SettingsImport>(&file_str)
            .with_context(|| format!("Malformed config at {}", path.as_ref().display()))?;
        Self::try_from(&import)
    }

    /// The first positional argument replaces the configured sample.
    pub fn with_args<I: IntoIterator<Item = String>>(mut self, args: I) -> Result<Self> {
        if let Some(sample) = args.into_iter().nth(1) {
            self.sample = expand_tilde(sample)?;
            self.entries_dir = None;
        }
        Ok(self)
    }
}

impl TryFrom<&SettingsImport> for Settings {
    type Error = anyhow::Error;

    fn try_from(import: &SettingsImport) -> Result<Self> {
        let defaults = Settings::default();

        let sample = match &import.sample {
            Some(s) => expand_tilde(s)?,
            None => defaults.sample,
        };

        let entries_dir = import.entries_dir.as_ref().map(expand_tilde).transpose()?;

        let tick_interval = match import.tick_interval_ms {
            Some(0) => return Err(anyhow!("tick_interval_ms must be greater than zero")),
            Some(ms) => Duration::from_millis(ms),
            None => defaults.tick_interval,
        };

        Ok(Settings {
            sample,
            entries_dir,
            entry_count: import.entry_count.unwrap_or(defaults.entry_count),
            tick_interval,
            seek_step: import
                .seek_step_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.seek_step),
            log_level: import.log_level.clone().unwrap_or(defaults.log_level),
        })
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIRECTORY).join(CONFIG_FILE))
}
