use serde::Deserialize;

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SettingsImport {
    pub sample: Option<String>,
    pub entries_dir: Option<String>,
    pub entry_count: Option<usize>,
    pub tick_interval_ms: Option<u64>,
    pub seek_step_secs: Option<u64>,
    pub log_level: Option<String>,
}
