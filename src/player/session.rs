use crate::{
    domain::EntryIndex,
    player::{AudioHandle, HandleId},
};
use std::time::Duration;

/// The one active playback. Owns its engine handle exclusively; the handle is
/// consumed by `release` so a torn-down session cannot be touched again.
pub struct Session<H> {
    item_index: EntryIndex,
    handle: H,
}

impl<H: AudioHandle> Session<H> {
    pub(crate) fn new(item_index: EntryIndex, handle: H) -> Self {
        Session { item_index, handle }
    }

    pub fn item_index(&self) -> EntryIndex {
        self.item_index
    }

    pub fn handle_id(&self) -> HandleId {
        self.handle.id()
    }

    pub fn is_playing(&self) -> bool {
        self.handle.is_playing()
    }

    pub fn position(&self) -> Duration {
        self.handle.position()
    }

    pub fn duration(&self) -> Duration {
        self.handle.duration()
    }

    pub(crate) fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    pub(crate) fn toggle(&mut self) -> bool {
        match self.handle.is_playing() {
            true => self.handle.pause(),
            false => self.handle.start(),
        }
        self.handle.is_playing()
    }

    pub(crate) fn release(self) -> HandleId {
        let id = self.handle.id();
        self.handle.release();
        id
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            item_index: Some(self.item_index),
            is_playing: self.is_playing(),
            position: self.position(),
            duration: self.duration(),
        }
    }
}

/// Plain copy of the session state, `item_index == None` when idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    pub item_index: Option<EntryIndex>,
    pub is_playing: bool,
    pub position: Duration,
    pub duration: Duration,
}

impl PlaybackSnapshot {
    pub fn is_idle(&self) -> bool {
        self.item_index.is_none()
    }
}
