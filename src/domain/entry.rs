use crate::{Settings, domain::FileType};
use anyhow::{Result, anyhow};
use std::{
    fmt::Display,
    path::{Path, PathBuf},
    sync::Arc,
};
use walkdir::WalkDir;

/// Position of an entry in the list. Entries are addressed by index only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryIndex(pub usize);

impl Display for EntryIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    path: Arc<Path>,
    filetype: FileType,
}

impl ListEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let filetype = FileType::from_path(&path);
        ListEntry {
            path: Arc::from(path),
            filetype,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filetype(&self) -> FileType {
        self.filetype
    }

    pub fn title(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Ordered, immutable sequence of entries.
#[derive(Debug, Default)]
pub struct EntryList {
    entries: Vec<ListEntry>,
}

impl EntryList {
    /// Every entry references the same resource.
    pub fn repeated(sample: impl Into<PathBuf>, count: usize) -> Self {
        let entry = ListEntry::new(sample);
        EntryList {
            entries: vec![entry; count],
        }
    }

    /// One entry per playable file under `dir`, sorted by path.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(anyhow!("Not a directory: {}", dir.display()));
        }

        let mut paths = WalkDir::new(dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| FileType::from_path(path).is_playable())
            .collect::<Vec<_>>();
        paths.sort();

        Ok(EntryList {
            entries: paths.into_iter().map(ListEntry::new).collect(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        match &settings.entries_dir {
            Some(dir) => Self::from_dir(dir),
            None => Ok(Self::repeated(&settings.sample, settings.entry_count)),
        }
    }

    pub fn get(&self, index: EntryIndex) -> Option<&ListEntry> {
        self.entries.get(index.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryIndex, &ListEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (EntryIndex(idx), entry))
    }
}
