use crate::{
    domain::EntryIndex,
    player::{AudioHandle, HandleId, ProgressSurface, Session},
    ui_state::CellId,
};
use std::time::{Duration, Instant};
use tracing::trace;

/// Which cell shows the active session, and for which entry and handle it
/// was bound. Holds no reference to the cell itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiBinding {
    pub cell: CellId,
    pub entry: EntryIndex,
    pub handle: HandleId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncState {
    Disarmed,
    Armed { token: u64, due: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing armed.
    Idle,
    /// Armed, deadline not reached.
    Pending,
    Pushed { token: u64, position: Duration },
    /// The target went stale on this tick; nothing was pushed.
    Disarmed,
}

/// Periodic progress push. Runs on the caller's loop: `tick` is polled with
/// the current instant and only does work once the deadline has passed.
///
/// Each `arm` issues a fresh token. The token survives rescheduling, so a
/// test can tell one chain of ticks from the next.
#[derive(Debug)]
pub struct ProgressSynchronizer {
    interval: Duration,
    binding: Option<UiBinding>,
    state: SyncState,
    next_token: u64,
}

impl ProgressSynchronizer {
    pub fn new(interval: Duration) -> Self {
        ProgressSynchronizer {
            interval,
            binding: None,
            state: SyncState::Disarmed,
            next_token: 0,
        }
    }

    pub fn binding(&self) -> Option<UiBinding> {
        self.binding
    }

    pub fn is_bound_to(&self, cell: CellId) -> bool {
        self.binding.is_some_and(|b| b.cell == cell)
    }

    /// Replaces the binding. Does not arm.
    pub fn bind(&mut self, binding: UiBinding) {
        self.binding = Some(binding);
    }

    /// Drops the binding and cancels any pending tick.
    pub fn unbind(&mut self) -> Option<UiBinding> {
        self.disarm();
        self.binding.take()
    }

    pub fn arm(&mut self, now: Instant) -> u64 {
        self.next_token += 1;
        let token = self.next_token;
        self.state = SyncState::Armed {
            token,
            due: now + self.interval,
        };
        token
    }

    pub fn disarm(&mut self) {
        if let SyncState::Armed { token, .. } = self.state {
            trace!(token, "progress sync disarmed");
        }
        self.state = SyncState::Disarmed;
    }

    pub fn armed_token(&self) -> Option<u64> {
        match self.state {
            SyncState::Armed { token, .. } => Some(token),
            SyncState::Disarmed => None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed_token().is_some()
    }

    pub fn tick<H, S>(
        &mut self,
        now: Instant,
        session: Option<&Session<H>>,
        surface: &mut S,
    ) -> TickOutcome
    where
        H: AudioHandle,
        S: ProgressSurface,
    {
        let SyncState::Armed { token, due } = self.state else {
            return TickOutcome::Idle;
        };

        if now < due {
            return TickOutcome::Pending;
        }

        let target = match (self.binding, session) {
            (Some(binding), Some(session)) if Self::is_live(&binding, session, surface) => {
                Some((binding.cell, session))
            }
            _ => None,
        };

        match target {
            Some((cell, session)) => {
                let position = session.position();
                surface.set_progress(cell, position);
                self.state = SyncState::Armed {
                    token,
                    due: now + self.interval,
                };
                TickOutcome::Pushed { token, position }
            }
            None => {
                self.disarm();
                TickOutcome::Disarmed
            }
        }
    }

    fn is_live<H: AudioHandle, S: ProgressSurface>(
        binding: &UiBinding,
        session: &Session<H>,
        surface: &S,
    ) -> bool {
        binding.handle == session.handle_id()
            && binding.entry == session.item_index()
            && session.is_playing()
            && surface.displayed_entry(binding.cell) == Some(binding.entry)
    }
}
