use crate::{
    domain::{EntryIndex, EntryList},
    player::{
        ActiveView, AudioEngine, AudioHandle, EngineEvent, HandleId, PlaybackSnapshot,
        PlayerError, ProgressSurface, ProgressSynchronizer, Session, TickOutcome, UiBinding,
    },
    ui_state::CellId,
};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::{debug, info, warn};

/// Owns the engine and at most one session. Every operation takes the
/// surface that displays the list so the controller never keeps a reference
/// to a cell between calls.
pub struct PlayerController<E: AudioEngine> {
    engine: E,
    entries: Arc<EntryList>,
    session: Option<Session<E::Handle>>,
    sync: ProgressSynchronizer,
    next_handle: u64,
}

impl<E: AudioEngine> PlayerController<E> {
    pub fn new(engine: E, entries: Arc<EntryList>, tick_interval: Duration) -> Self {
        PlayerController {
            engine,
            entries,
            session: None,
            sync: ProgressSynchronizer::new(tick_interval),
            next_handle: 0,
        }
    }

    pub fn entries(&self) -> &Arc<EntryList> {
        &self.entries
    }

    pub fn session(&self) -> Option<&Session<E::Handle>> {
        self.session.as_ref()
    }

    pub fn synchronizer(&self) -> &ProgressSynchronizer {
        &self.sync
    }

    pub fn active_index(&self) -> Option<EntryIndex> {
        self.session.as_ref().map(|s| s.item_index())
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.session
            .as_ref()
            .map(|s| s.snapshot())
            .unwrap_or_default()
    }
}

// ================
//    OPERATIONS
// ================
impl<E: AudioEngine> PlayerController<E> {
    /// Toggles the active entry, or replaces the session with a new one for
    /// `index` playing from zero. `cell` becomes the bound cell either way.
    pub fn activate<S: ProgressSurface>(
        &mut self,
        index: EntryIndex,
        cell: CellId,
        surface: &mut S,
        now: Instant,
    ) -> Result<(), PlayerError> {
        if let Some(session) = self.session.as_mut().filter(|s| s.item_index() == index) {
            let playing = session.toggle();
            let handle = session.handle_id();
            debug!(%index, %handle, playing, "toggled playback");

            self.sync.bind(UiBinding {
                cell,
                entry: index,
                handle,
            });
            self.refresh_active_view(surface, now);
            return Ok(());
        }

        let resource = self
            .entries
            .get(index)
            .ok_or(PlayerError::UnknownEntry(index))?
            .path()
            .to_path_buf();

        self.teardown(surface);

        let id = self.issue_handle_id();
        match self.engine.create(&resource, id) {
            Ok(mut handle) => {
                handle.start();
                info!(%index, handle = %id, resource = %resource.display(), "playback started");

                self.session = Some(Session::new(index, handle));
                self.sync.bind(UiBinding {
                    cell,
                    entry: index,
                    handle: id,
                });
                self.refresh_active_view(surface, now);
                Ok(())
            }
            Err(e) => {
                warn!(%index, resource = %resource.display(), "could not create player: {e:#}");
                surface.show_idle(cell);
                Err(PlayerError::ResourceCreation {
                    index,
                    reason: format!("{e:#}"),
                })
            }
        }
    }

    /// Forwards a seek from `cell`. Ignored unless `cell` is the bound cell and
    /// still shows the active entry. Returns whether the seek reached the engine.
    pub fn seek<S: ProgressSurface>(
        &mut self,
        cell: CellId,
        position: Duration,
        surface: &mut S,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            debug!(?cell, "seek ignored: no active session");
            return false;
        };

        if !self.sync.is_bound_to(cell) || surface.displayed_entry(cell) != Some(session.item_index())
        {
            debug!(?cell, "seek ignored: cell is not bound to the active entry");
            return false;
        }

        if let Err(e) = session.handle_mut().seek_to(position) {
            warn!(?cell, ?position, "seek failed: {e:#}");
            return false;
        }

        surface.set_progress(cell, session.position());
        true
    }

    /// Tears down the session, if any. Safe to call repeatedly.
    pub fn stop<S: ProgressSurface>(&mut self, surface: &mut S) {
        if self.teardown(surface) {
            info!("playback stopped");
        }
    }

    /// A finished sample resets exactly like `stop`. Completions for handles
    /// that were already released are dropped.
    pub fn on_completion<S: ProgressSurface>(&mut self, handle: HandleId, surface: &mut S) {
        match self.session.as_ref().map(|s| s.handle_id()) {
            Some(active) if active == handle => {
                info!(%handle, "playback completed");
                self.teardown(surface);
            }
            _ => debug!(%handle, "ignoring completion for stale handle"),
        }
    }

    /// Drains engine events, then runs the progress tick if it is due.
    pub fn poll<S: ProgressSurface>(&mut self, now: Instant, surface: &mut S) -> TickOutcome {
        for event in self.engine.poll_events() {
            match event {
                EngineEvent::Completed(handle) => self.on_completion(handle, surface),
            }
        }
        self.tick(now, surface)
    }

    pub fn tick<S: ProgressSurface>(&mut self, now: Instant, surface: &mut S) -> TickOutcome {
        self.sync.tick(now, self.session.as_ref(), surface)
    }
}

// ====================
//    LIST CALLBACKS
// ====================
impl<E: AudioEngine> PlayerController<E> {
    /// The list has (re)bound `cell` to `index`.
    pub fn on_bind<S: ProgressSurface>(
        &mut self,
        cell: CellId,
        index: EntryIndex,
        surface: &mut S,
        now: Instant,
    ) {
        match self.session.as_ref() {
            Some(session) if session.item_index() == index => {
                self.sync.bind(UiBinding {
                    cell,
                    entry: index,
                    handle: session.handle_id(),
                });
                self.refresh_active_view(surface, now);
            }
            _ => {
                if self.sync.is_bound_to(cell) {
                    self.sync.unbind();
                }
                surface.show_idle(cell);
            }
        }
    }

    /// The list took `cell` away from whatever it showed.
    pub fn on_recycle<S: ProgressSurface>(&mut self, cell: CellId, surface: &mut S) {
        if self.sync.is_bound_to(cell) {
            debug!(?cell, "bound cell recycled");
            self.sync.unbind();
            surface.show_idle(cell);
        }
    }
}

impl<E: AudioEngine> PlayerController<E> {
    fn issue_handle_id(&mut self) -> HandleId {
        self.next_handle += 1;
        HandleId(self.next_handle)
    }

    /// Paints the bound cell from the session and arms or disarms the tick to
    /// match. A bound cell that no longer shows the session's entry is dropped.
    fn refresh_active_view<S: ProgressSurface>(&mut self, surface: &mut S, now: Instant) {
        let (Some(session), Some(binding)) = (self.session.as_ref(), self.sync.binding()) else {
            self.sync.disarm();
            return;
        };

        if surface.displayed_entry(binding.cell) != Some(session.item_index()) {
            self.sync.unbind();
            return;
        }

        let view = ActiveView {
            position: session.position(),
            duration: session.duration(),
            playing: session.is_playing(),
        };
        surface.show_active(binding.cell, view);

        match view.playing {
            true => {
                self.sync.arm(now);
            }
            false => self.sync.disarm(),
        }
    }

    /// Releases the session's handle and resets its cell. Returns whether a
    /// session existed.
    fn teardown<S: ProgressSurface>(&mut self, surface: &mut S) -> bool {
        if let Some(binding) = self.sync.unbind() {
            if surface.displayed_entry(binding.cell) == Some(binding.entry) {
                surface.show_idle(binding.cell);
            }
        }

        match self.session.take() {
            Some(session) => {
                let index = session.item_index();
                let handle = session.release();
                debug!(%index, %handle, "released player");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::testing::{CellLook, RecordingSurface, ScriptedEngine};

    const INTERVAL: Duration = Duration::from_millis(100);

    struct Harness {
        engine: ScriptedEngine,
        player: PlayerController<ScriptedEngine>,
        surface: RecordingSurface,
        t0: Instant,
    }

    impl Harness {
        fn new(entries: usize) -> Self {
            let engine = ScriptedEngine::default();
            let entries = Arc::new(EntryList::repeated("sample.mp3", entries));
            let player = PlayerController::new(engine.clone(), entries, INTERVAL);

            let mut surface = RecordingSurface::default();
            // One cell per row keeps the tests readable; recycling tests
            // reassign cells explicitly.
            for i in 0..8 {
                surface.show(CellId(i), EntryIndex(i));
            }

            Harness {
                engine,
                player,
                surface,
                t0: Instant::now(),
            }
        }

        fn activate(&mut self, row: usize) -> Result<(), PlayerError> {
            self.player
                .activate(EntryIndex(row), CellId(row), &mut self.surface, self.t0)
        }

        fn at(&self, ms: u64) -> Instant {
            self.t0 + Duration::from_millis(ms)
        }
    }

    #[test]
    fn activate_starts_from_zero() {
        let mut h = Harness::new(4);
        h.activate(0).unwrap();

        let snap = h.player.snapshot();
        assert_eq!(snap.item_index, Some(EntryIndex(0)));
        assert!(snap.is_playing);
        assert_eq!(snap.position, Duration::ZERO);
        assert!(h.surface.is_playing(CellId(0)));
        assert!(h.player.synchronizer().is_armed());
    }

    #[test]
    fn activating_active_entry_toggles_without_new_handle() {
        let mut h = Harness::new(4);
        h.activate(2).unwrap();
        let handle = h.player.session().unwrap().handle_id();

        h.activate(2).unwrap();
        assert!(!h.player.snapshot().is_playing);
        assert!(!h.surface.is_playing(CellId(2)));
        assert!(!h.player.synchronizer().is_armed());

        h.activate(2).unwrap();
        assert!(h.player.snapshot().is_playing);
        assert!(h.player.synchronizer().is_armed());

        assert_eq!(h.player.session().unwrap().handle_id(), handle);
        assert_eq!(h.engine.created(), vec![handle]);
    }

    #[test]
    fn switching_entries_releases_previous_once() {
        let mut h = Harness::new(4);
        h.activate(0).unwrap();
        let first = h.player.session().unwrap().handle_id();

        h.activate(1).unwrap();
        let second = h.player.session().unwrap().handle_id();

        assert_ne!(first, second);
        assert_eq!(h.engine.release_count(first), 1);
        assert_eq!(h.engine.release_count(second), 0);
        assert_eq!(h.engine.live_handles(), 1);
        assert_eq!(h.surface.look(CellId(0)), Some(CellLook::Idle));
        assert!(h.surface.is_playing(CellId(1)));
    }

    #[test]
    fn any_activation_sequence_keeps_one_live_handle() {
        let mut h = Harness::new(8);
        let rows = [0, 3, 3, 5, 1, 1, 1, 7, 0, 2, 2, 6, 4];

        for row in rows {
            h.activate(row).unwrap();
            assert_eq!(h.engine.live_handles(), 1);
            assert_eq!(h.player.active_index(), Some(EntryIndex(row)));
        }

        for id in h.engine.created() {
            assert!(h.engine.release_count(id) <= 1);
        }
    }

    #[test]
    fn stop_is_idempotent_and_activation_restarts_from_zero() {
        let mut h = Harness::new(4);
        h.player.stop(&mut h.surface);

        h.activate(1).unwrap();
        h.engine.advance(Duration::from_secs(3));
        h.player.stop(&mut h.surface);
        h.player.stop(&mut h.surface);

        assert!(h.player.snapshot().is_idle());
        assert_eq!(h.engine.live_handles(), 0);
        assert_eq!(h.surface.look(CellId(1)), Some(CellLook::Idle));

        h.activate(1).unwrap();
        assert_eq!(h.player.snapshot().position, Duration::ZERO);
        assert!(h.player.snapshot().is_playing);
    }

    #[test]
    fn completion_resets_like_stop() {
        let mut h = Harness::new(4);
        h.activate(3).unwrap();
        let handle = h.player.session().unwrap().handle_id();

        h.engine.complete(handle);
        let outcome = h.player.poll(h.at(100), &mut h.surface);

        assert_eq!(outcome, TickOutcome::Idle);
        assert!(h.player.snapshot().is_idle());
        assert_eq!(h.engine.release_count(handle), 1);
        assert_eq!(h.surface.look(CellId(3)), Some(CellLook::Idle));
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut h = Harness::new(4);
        h.activate(0).unwrap();
        let old = h.player.session().unwrap().handle_id();
        h.activate(1).unwrap();

        h.player.on_completion(old, &mut h.surface);
        assert_eq!(h.player.active_index(), Some(EntryIndex(1)));
        assert_eq!(h.engine.release_count(old), 1);
    }

    #[test]
    fn failed_creation_leaves_nothing_behind() {
        let mut h = Harness::new(4);
        h.activate(0).unwrap();
        let first = h.player.session().unwrap().handle_id();

        h.engine.fail_next_create();
        let err = h.activate(1).unwrap_err();

        assert!(matches!(
            err,
            PlayerError::ResourceCreation {
                index: EntryIndex(1),
                ..
            }
        ));
        assert!(h.player.snapshot().is_idle());
        assert_eq!(h.engine.release_count(first), 1);
        assert_eq!(h.engine.live_handles(), 0);
        assert_eq!(h.surface.look(CellId(1)), Some(CellLook::Idle));
        assert!(h.player.synchronizer().binding().is_none());

        // Next attempt works normally.
        h.activate(1).unwrap();
        assert_eq!(h.player.active_index(), Some(EntryIndex(1)));
    }

    #[test]
    fn unknown_entry_keeps_current_session() {
        let mut h = Harness::new(2);
        h.activate(0).unwrap();
        let err = h.activate(5).unwrap_err();

        assert!(matches!(err, PlayerError::UnknownEntry(EntryIndex(5))));
        assert_eq!(h.player.active_index(), Some(EntryIndex(0)));
    }

    #[test]
    fn seek_requires_bound_cell() {
        let mut h = Harness::new(4);
        assert!(!h.player.seek(CellId(0), Duration::from_secs(1), &mut h.surface));

        h.activate(0).unwrap();
        assert!(!h.player.seek(CellId(1), Duration::from_secs(1), &mut h.surface));
        assert_eq!(h.player.snapshot().position, Duration::ZERO);

        assert!(h.player.seek(CellId(0), Duration::from_secs(4), &mut h.surface));
        assert_eq!(h.player.snapshot().position, Duration::from_secs(4));
        assert_eq!(h.surface.progress(CellId(0)), Duration::from_secs(4));
    }

    #[test]
    fn seek_past_end_is_clamped_by_engine() {
        let mut h = Harness::new(1);
        h.activate(0).unwrap();
        assert!(h.player.seek(CellId(0), Duration::from_secs(600), &mut h.surface));
        assert_eq!(h.player.snapshot().position, h.player.snapshot().duration);
    }

    #[test]
    fn seek_from_recycled_cell_is_ignored() {
        let mut h = Harness::new(4);
        h.activate(0).unwrap();
        h.surface.show(CellId(0), EntryIndex(6));

        assert!(!h.player.seek(CellId(0), Duration::from_secs(2), &mut h.surface));
    }

    #[test]
    fn recycling_bound_cell_stops_ticks_until_rebound() {
        let mut h = Harness::new(8);
        h.activate(0).unwrap();

        // Scrolled away: cell 0 now shows entry 6.
        h.surface.show(CellId(0), EntryIndex(6));
        h.player.on_recycle(CellId(0), &mut h.surface);
        let now = h.at(50);
        h.player.on_bind(CellId(0), EntryIndex(6), &mut h.surface, now);

        h.engine.advance(INTERVAL);
        assert_eq!(h.player.tick(h.at(150), &mut h.surface), TickOutcome::Idle);
        assert!(h.surface.pushes.is_empty());
        assert_eq!(h.surface.look(CellId(0)), Some(CellLook::Idle));
        // Playback itself continues.
        assert!(h.player.snapshot().is_playing);

        // Scrolled back: entry 0 lands in cell 5.
        h.surface.show(CellId(5), EntryIndex(0));
        let now = h.at(200);
        h.player.on_bind(CellId(5), EntryIndex(0), &mut h.surface, now);
        assert!(h.surface.is_playing(CellId(5)));
        assert_eq!(h.surface.progress(CellId(5)), INTERVAL);

        h.engine.advance(INTERVAL);
        let outcome = h.player.tick(h.at(300), &mut h.surface);
        assert!(matches!(outcome, TickOutcome::Pushed { .. }));
        assert_eq!(h.surface.pushes, vec![(CellId(5), INTERVAL * 2)]);
    }

    #[test]
    fn unnotified_reuse_is_caught_by_tick() {
        let mut h = Harness::new(8);
        h.activate(2).unwrap();

        // The list reassigned the cell without telling us.
        h.surface.show(CellId(2), EntryIndex(7));
        h.engine.advance(INTERVAL);

        assert_eq!(
            h.player.tick(h.at(100), &mut h.surface),
            TickOutcome::Disarmed
        );
        assert!(h.surface.pushes.is_empty());
    }

    #[test]
    fn scenario_switch_then_stop() {
        let mut h = Harness::new(4);

        h.activate(0).unwrap();
        let first = h.player.session().unwrap().handle_id();
        let snap = h.player.snapshot();
        assert_eq!(
            (snap.item_index, snap.is_playing, snap.position),
            (Some(EntryIndex(0)), true, Duration::ZERO)
        );

        h.engine.advance(INTERVAL);
        let outcome = h.player.poll(h.at(100), &mut h.surface);
        assert!(matches!(outcome, TickOutcome::Pushed { position, .. } if position > Duration::ZERO));
        assert!(h.surface.progress(CellId(0)) > Duration::ZERO);

        let now = h.at(120);
        h.player
            .activate(EntryIndex(1), CellId(1), &mut h.surface, now)
            .unwrap();
        assert_eq!(h.player.active_index(), Some(EntryIndex(1)));
        assert_eq!(h.engine.release_count(first), 1);
        assert_eq!(h.surface.look(CellId(0)), Some(CellLook::Idle));
        assert!(h.surface.is_playing(CellId(1)));
        assert_eq!(h.surface.progress(CellId(1)), Duration::ZERO);

        h.player.stop(&mut h.surface);
        assert!(h.player.snapshot().is_idle());
        assert_eq!(h.surface.look(CellId(1)), Some(CellLook::Idle));

        let pushes = h.surface.pushes.len();
        h.engine.advance(INTERVAL * 5);
        for ms in [220, 320, 420, 520] {
            assert_eq!(h.player.poll(h.at(ms), &mut h.surface), TickOutcome::Idle);
        }
        assert_eq!(h.surface.pushes.len(), pushes);
    }
}
