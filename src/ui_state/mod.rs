mod cells;
mod mode;
mod popup;
mod theme;
mod viewport;

pub use cells::{CellEvent, CellId, CellPool, CellView, PlayIcon, SeekBar};
pub use mode::Mode;
pub use popup::PopupType;
pub use theme::DisplayTheme;
pub use viewport::Viewport;

use crate::{domain::EntryList, player::PlaybackSnapshot};
use anyhow::Error;
use ratatui::layout::{Position, Rect};
use std::sync::Arc;
use tracing::warn;

pub struct UiState {
    pub(crate) entries: Arc<EntryList>,
    pub(crate) cells: CellPool,
    pub(crate) viewport: Viewport,
    pub(crate) theme: DisplayTheme,

    mode: Mode,
    pub(crate) popup: PopupType,
    now_playing: PlaybackSnapshot,

    // Filled in by the renderer, read by mouse handling
    pub(crate) row_areas: Vec<(Rect, usize)>,
    pub(crate) gauge_areas: Vec<(Rect, CellId)>,
}

impl UiState {
    pub fn new(entries: Arc<EntryList>) -> Self {
        let len = entries.len();
        UiState {
            entries,
            cells: CellPool::new(),
            viewport: Viewport::new(len),
            theme: DisplayTheme::default(),

            mode: Mode::default(),
            popup: PopupType::None,
            now_playing: PlaybackSnapshot::default(),

            row_areas: Vec::new(),
            gauge_areas: Vec::new(),
        }
    }

    pub fn get_mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode
    }

    pub fn cells(&self) -> &CellPool {
        &self.cells
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn get_now_playing(&self) -> &PlaybackSnapshot {
        &self.now_playing
    }

    pub fn update_player_state(&mut self, snapshot: PlaybackSnapshot) {
        self.now_playing = snapshot
    }

    pub fn set_error(&mut self, e: Error) {
        warn!("{e:#}");
        self.show_popup(PopupType::Error(format!("{e:#}")));
    }

    pub fn get_error(&self) -> Option<&str> {
        match &self.popup {
            PopupType::Error(e) => Some(e.as_str()),
            PopupType::None => None,
        }
    }

    pub fn selected_cell(&self) -> Option<(usize, CellId)> {
        let row = self.viewport.selected()?;
        let cell = self.cells.cell_for(crate::EntryIndex(row))?;
        Some((row, cell))
    }

    pub fn row_at(&self, pos: Position) -> Option<usize> {
        self.row_areas
            .iter()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, row)| *row)
    }

    /// The cell whose gauge is under `pos`, and where along it `pos` falls.
    pub fn gauge_at(&self, pos: Position) -> Option<(CellId, f64)> {
        self.gauge_areas
            .iter()
            .find(|(area, _)| area.contains(pos))
            .map(|(area, cell)| {
                let ratio = match area.width {
                    0 | 1 => 0.0,
                    w => (pos.x - area.x) as f64 / (w - 1) as f64,
                };
                (*cell, ratio)
            })
    }
}
