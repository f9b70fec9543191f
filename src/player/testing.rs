//! In-memory engine with a manual clock, for driving the controller without
//! an audio device.

use crate::{
    domain::EntryIndex,
    player::{ActiveView, AudioEngine, AudioHandle, EngineEvent, HandleId, ProgressSurface},
    ui_state::CellId,
};
use anyhow::{Result, anyhow};
use std::{
    cell::RefCell,
    collections::{HashMap, HashSet, VecDeque},
    path::{Path, PathBuf},
    rc::Rc,
    time::Duration,
};

pub const DEFAULT_SAMPLE_LENGTH: Duration = Duration::from_secs(10);

#[derive(Debug)]
struct HandleState {
    id: HandleId,
    playing: bool,
    position: Duration,
    duration: Duration,
    releases: u32,
}

#[derive(Default)]
struct Script {
    duration: Duration,
    fail_next: bool,
    broken: HashSet<PathBuf>,
    handles: Vec<Rc<RefCell<HandleState>>>,
    events: VecDeque<EngineEvent>,
}

/// Clones share state, so a test can keep one while the controller owns the
/// other.
#[derive(Clone)]
pub struct ScriptedEngine {
    script: Rc<RefCell<Script>>,
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_LENGTH)
    }
}

impl ScriptedEngine {
    pub fn new(sample_length: Duration) -> Self {
        ScriptedEngine {
            script: Rc::new(RefCell::new(Script {
                duration: sample_length,
                ..Script::default()
            })),
        }
    }

    pub fn fail_next_create(&self) {
        self.script.borrow_mut().fail_next = true;
    }

    pub fn mark_unplayable<P: AsRef<Path>>(&self, resource: P) {
        self.script
            .borrow_mut()
            .broken
            .insert(resource.as_ref().to_path_buf());
    }

    /// Moves every playing handle forward. Handles that reach the end stop and
    /// queue a completion.
    pub fn advance(&self, by: Duration) {
        let mut script = self.script.borrow_mut();
        let mut finished = Vec::new();

        for handle in &script.handles {
            let mut h = handle.borrow_mut();
            if h.releases > 0 || !h.playing {
                continue;
            }
            h.position = (h.position + by).min(h.duration);
            if h.position == h.duration {
                h.playing = false;
                finished.push(h.id);
            }
        }

        script
            .events
            .extend(finished.into_iter().map(EngineEvent::Completed));
    }

    /// Queues a completion for `id` regardless of its position.
    pub fn complete(&self, id: HandleId) {
        let mut script = self.script.borrow_mut();
        if let Some(handle) = script.handles.iter().find(|h| h.borrow().id == id) {
            let mut h = handle.borrow_mut();
            h.playing = false;
            h.position = h.duration;
        }
        script.events.push_back(EngineEvent::Completed(id));
    }

    pub fn created(&self) -> Vec<HandleId> {
        self.script
            .borrow()
            .handles
            .iter()
            .map(|h| h.borrow().id)
            .collect()
    }

    pub fn release_count(&self, id: HandleId) -> u32 {
        self.script
            .borrow()
            .handles
            .iter()
            .find(|h| h.borrow().id == id)
            .map(|h| h.borrow().releases)
            .unwrap_or(0)
    }

    /// Handles created and not yet released.
    pub fn live_handles(&self) -> usize {
        self.script
            .borrow()
            .handles
            .iter()
            .filter(|h| h.borrow().releases == 0)
            .count()
    }
}

impl AudioEngine for ScriptedEngine {
    type Handle = ScriptedHandle;

    fn create(&mut self, resource: &Path, id: HandleId) -> Result<ScriptedHandle> {
        let mut script = self.script.borrow_mut();

        if std::mem::take(&mut script.fail_next) || script.broken.contains(resource) {
            return Err(anyhow!("Unplayable resource: {}", resource.display()));
        }

        let state = Rc::new(RefCell::new(HandleState {
            id,
            playing: false,
            position: Duration::ZERO,
            duration: script.duration,
            releases: 0,
        }));
        script.handles.push(Rc::clone(&state));

        Ok(ScriptedHandle { state })
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        self.script.borrow_mut().events.drain(..).collect()
    }
}

pub struct ScriptedHandle {
    state: Rc<RefCell<HandleState>>,
}

impl AudioHandle for ScriptedHandle {
    fn id(&self) -> HandleId {
        self.state.borrow().id
    }

    fn start(&mut self) {
        let mut h = self.state.borrow_mut();
        if h.position < h.duration {
            h.playing = true;
        }
    }

    fn pause(&mut self) {
        self.state.borrow_mut().playing = false;
    }

    fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    fn duration(&self) -> Duration {
        self.state.borrow().duration
    }

    fn position(&self) -> Duration {
        self.state.borrow().position
    }

    fn seek_to(&mut self, position: Duration) -> Result<()> {
        let mut h = self.state.borrow_mut();
        h.position = position.min(h.duration);
        Ok(())
    }

    fn release(self) {
        let mut h = self.state.borrow_mut();
        h.playing = false;
        h.releases += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellLook {
    Idle,
    Active(ActiveView),
}

/// A list stand-in that records every write the coordinator makes.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    shown: HashMap<CellId, EntryIndex>,
    looks: HashMap<CellId, CellLook>,
    progress: HashMap<CellId, Duration>,
    pub pushes: Vec<(CellId, Duration)>,
}

impl RecordingSurface {
    pub fn show(&mut self, cell: CellId, entry: EntryIndex) {
        self.shown.insert(cell, entry);
    }

    pub fn look(&self, cell: CellId) -> Option<CellLook> {
        self.looks.get(&cell).copied()
    }

    pub fn progress(&self, cell: CellId) -> Duration {
        self.progress.get(&cell).copied().unwrap_or_default()
    }

    pub fn is_playing(&self, cell: CellId) -> bool {
        matches!(self.look(cell), Some(CellLook::Active(view)) if view.playing)
    }
}

impl ProgressSurface for RecordingSurface {
    fn displayed_entry(&self, cell: CellId) -> Option<EntryIndex> {
        self.shown.get(&cell).copied()
    }

    fn show_active(&mut self, cell: CellId, view: ActiveView) {
        self.looks.insert(cell, CellLook::Active(view));
        self.progress.insert(cell, view.position);
    }

    fn show_idle(&mut self, cell: CellId) {
        self.looks.insert(cell, CellLook::Idle);
        self.progress.insert(cell, Duration::ZERO);
    }

    fn set_progress(&mut self, cell: CellId, position: Duration) {
        self.progress.insert(cell, position);
        self.pushes.push((cell, position));
    }
}
