use crate::{domain::EntryIndex, ui_state::CellId};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveView {
    pub position: Duration,
    pub duration: Duration,
    pub playing: bool,
}

/// What the coordinator needs from the list that displays it. Cells are
/// owned by the list; the coordinator only ever holds their ids and must ask
/// which entry a cell shows before writing to it.
pub trait ProgressSurface {
    fn displayed_entry(&self, cell: CellId) -> Option<EntryIndex>;

    /// Enabled seek bar sized to the duration, pause icon while playing.
    fn show_active(&mut self, cell: CellId, view: ActiveView);

    /// Disabled seek bar at zero with the play icon.
    fn show_idle(&mut self, cell: CellId);

    fn set_progress(&mut self, cell: CellId, position: Duration);
}
