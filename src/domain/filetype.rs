use std::{fmt::Display, path::Path};

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum FileType {
    MP3,
    M4A,
    OGG,
    WAV,
    FLAC,
    #[default]
    ERR,
}

impl From<&str> for FileType {
    fn from(str: &str) -> Self {
        match str {
            "mp3" => Self::MP3,
            "m4a" | "m4b" | "mp4" => Self::M4A,
            "ogg" | "oga" => Self::OGG,
            "flac" => Self::FLAC,
            "wav" | "wave" => Self::WAV,
            _ => Self::ERR,
        }
    }
}

impl Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            FileType::MP3 => write!(f, "ᵐᵖ³"),
            FileType::M4A => write!(f, "ᵐ⁴ᵃ"),
            FileType::OGG => write!(f, "ᵒᵍᵍ"),
            FileType::WAV => write!(f, "ʷᵃᵛ"),
            FileType::FLAC => write!(f, "ᶠˡᵃᶜ"),
            FileType::ERR => write!(f, "ERR"),
        }
    }
}

impl FileType {
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| FileType::from(ext.to_lowercase().as_str()))
            .unwrap_or_default()
    }

    pub fn is_playable(&self) -> bool {
        *self != FileType::ERR
    }
}
