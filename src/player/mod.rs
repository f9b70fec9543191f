mod backend_rodio;
mod controller;
mod session;
mod surface;
mod sync;
pub mod testing;

pub use backend_rodio::{RodioEngine, RodioHandle};
pub use controller::PlayerController;
pub use session::{PlaybackSnapshot, Session};
pub use surface::{ActiveView, ProgressSurface};
pub use sync::{ProgressSynchronizer, TickOutcome, UiBinding};

use crate::domain::EntryIndex;
use anyhow::Result;
use std::{fmt::Display, path::Path, time::Duration};
use thiserror::Error;

/// Identifies one engine resource for its whole lifetime. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(pub u64);

impl Display for HandleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Completed(HandleId),
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("No entry at index {0}")]
    UnknownEntry(EntryIndex),

    #[error("Could not play entry {index}: {reason}")]
    ResourceCreation { index: EntryIndex, reason: String },
}

/// The playback service. Creates one handle per activated entry and reports
/// completions back through `poll_events`.
pub trait AudioEngine {
    type Handle: AudioHandle;

    fn create(&mut self, resource: &Path, id: HandleId) -> Result<Self::Handle>;

    fn poll_events(&mut self) -> Vec<EngineEvent>;
}

/// A loaded resource. Created paused at position zero.
pub trait AudioHandle {
    fn id(&self) -> HandleId;

    fn start(&mut self);

    fn pause(&mut self);

    fn is_playing(&self) -> bool;

    fn duration(&self) -> Duration;

    fn position(&self) -> Duration;

    /// Positions past the end are clamped by the implementation.
    fn seek_to(&mut self, position: Duration) -> Result<()>;

    fn release(self);
}
