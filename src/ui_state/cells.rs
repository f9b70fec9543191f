use crate::{
    domain::EntryIndex,
    player::{ActiveView, ProgressSurface},
};
use std::{collections::HashMap, ops::Range, time::Duration};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub usize);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayIcon {
    #[default]
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeekBar {
    pub enabled: bool,
    pub max: Duration,
    pub value: Duration,
}

impl SeekBar {
    pub fn ratio(&self) -> f64 {
        match self.max.is_zero() {
            true => 0.0,
            false => (self.value.as_secs_f64() / self.max.as_secs_f64()).clamp(0.0, 1.0),
        }
    }

    /// Position under `ratio` of the bar, as a drag would produce it.
    pub fn position_at(&self, ratio: f64) -> Duration {
        self.max.mul_f64(ratio.clamp(0.0, 1.0))
    }
}

/// One reusable row view.
#[derive(Debug, Clone, Default)]
pub struct CellView {
    bound: Option<EntryIndex>,
    pub icon: PlayIcon,
    pub seek_bar: SeekBar,
}

impl CellView {
    pub fn bound_entry(&self) -> Option<EntryIndex> {
        self.bound
    }

    fn reset(&mut self) {
        self.icon = PlayIcon::Play;
        self.seek_bar = SeekBar::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEvent {
    Recycled(CellId),
    Bound(CellId, EntryIndex),
}

/// Row views shared by the visible window. Cells leaving the window are
/// recycled and handed to entries entering it, so a cell id says nothing
/// about which entry it shows.
#[derive(Debug, Default)]
pub struct CellPool {
    cells: Vec<CellView>,
    free: Vec<CellId>,
    shown: HashMap<EntryIndex, CellId>,
}

impl CellPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recycles cells outside `window`, then binds every entry in `window`
    /// that has no cell. Returns what happened, recycles first.
    pub fn layout(&mut self, window: Range<usize>) -> Vec<CellEvent> {
        let mut events = Vec::new();

        let mut leaving = self
            .shown
            .iter()
            .filter(|(entry, _)| !window.contains(&entry.0))
            .map(|(entry, cell)| (*entry, *cell))
            .collect::<Vec<_>>();
        leaving.sort();

        for (entry, cell) in leaving {
            self.shown.remove(&entry);
            self.cells[cell.0].bound = None;
            self.cells[cell.0].reset();
            self.free.push(cell);
            trace!(?cell, %entry, "recycled cell");
            events.push(CellEvent::Recycled(cell));
        }

        for idx in window {
            let entry = EntryIndex(idx);
            if self.shown.contains_key(&entry) {
                continue;
            }

            let cell = self.obtain();
            self.cells[cell.0].bound = Some(entry);
            self.shown.insert(entry, cell);
            events.push(CellEvent::Bound(cell, entry));
        }

        events
    }

    fn obtain(&mut self) -> CellId {
        self.free.pop().unwrap_or_else(|| {
            self.cells.push(CellView::default());
            CellId(self.cells.len() - 1)
        })
    }

    pub fn cell_for(&self, entry: EntryIndex) -> Option<CellId> {
        self.shown.get(&entry).copied()
    }

    pub fn view(&self, cell: CellId) -> Option<&CellView> {
        self.cells.get(cell.0)
    }

    /// Cells ever created. Bounded by the largest window laid out.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn bound_count(&self) -> usize {
        self.shown.len()
    }
}

impl ProgressSurface for CellPool {
    fn displayed_entry(&self, cell: CellId) -> Option<EntryIndex> {
        self.cells.get(cell.0).and_then(|c| c.bound)
    }

    fn show_active(&mut self, cell: CellId, view: ActiveView) {
        if let Some(c) = self.cells.get_mut(cell.0) {
            c.icon = match view.playing {
                true => PlayIcon::Pause,
                false => PlayIcon::Play,
            };
            c.seek_bar = SeekBar {
                enabled: true,
                max: view.duration,
                value: view.position,
            };
        }
    }

    fn show_idle(&mut self, cell: CellId) {
        if let Some(c) = self.cells.get_mut(cell.0) {
            c.reset();
        }
    }

    fn set_progress(&mut self, cell: CellId, position: Duration) {
        if let Some(c) = self.cells.get_mut(cell.0) {
            c.seek_bar.value = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound(events: &[CellEvent]) -> Vec<(CellId, EntryIndex)> {
        events
            .iter()
            .filter_map(|e| match e {
                CellEvent::Bound(c, i) => Some((*c, *i)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn first_layout_creates_one_cell_per_row() {
        let mut pool = CellPool::new();
        let events = pool.layout(0..4);

        assert_eq!(bound(&events).len(), 4);
        assert_eq!(pool.capacity(), 4);
        for i in 0..4 {
            let cell = pool.cell_for(EntryIndex(i)).unwrap();
            assert_eq!(pool.displayed_entry(cell), Some(EntryIndex(i)));
        }
    }

    #[test]
    fn relayout_of_same_window_is_quiet() {
        let mut pool = CellPool::new();
        pool.layout(0..4);
        assert!(pool.layout(0..4).is_empty());
    }

    #[test]
    fn scrolling_reuses_cells_that_left() {
        let mut pool = CellPool::new();
        pool.layout(0..4);
        let top = pool.cell_for(EntryIndex(0)).unwrap();

        let events = pool.layout(1..5);

        assert_eq!(events[0], CellEvent::Recycled(top));
        assert_eq!(bound(&events), vec![(top, EntryIndex(4))]);
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.cell_for(EntryIndex(0)), None);
        assert_eq!(pool.displayed_entry(top), Some(EntryIndex(4)));
    }

    #[test]
    fn long_jump_recycles_every_cell() {
        let mut pool = CellPool::new();
        pool.layout(0..3);
        let events = pool.layout(200..203);

        let recycled = events
            .iter()
            .filter(|e| matches!(e, CellEvent::Recycled(_)))
            .count();
        assert_eq!(recycled, 3);
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.bound_count(), 3);
    }

    #[test]
    fn recycled_cell_looks_idle() {
        let mut pool = CellPool::new();
        pool.layout(0..2);
        let cell = pool.cell_for(EntryIndex(0)).unwrap();
        pool.show_active(
            cell,
            ActiveView {
                position: Duration::from_secs(2),
                duration: Duration::from_secs(8),
                playing: true,
            },
        );
        assert_eq!(pool.view(cell).unwrap().icon, PlayIcon::Pause);

        pool.layout(1..3);
        let view = pool.view(cell).unwrap();
        assert_eq!(view.icon, PlayIcon::Play);
        assert!(!view.seek_bar.enabled);
        assert_eq!(view.seek_bar.value, Duration::ZERO);
    }

    #[test]
    fn seek_bar_ratio_and_position() {
        let bar = SeekBar {
            enabled: true,
            max: Duration::from_secs(10),
            value: Duration::from_millis(2500),
        };
        assert!((bar.ratio() - 0.25).abs() < f64::EPSILON);
        assert_eq!(bar.position_at(0.5), Duration::from_secs(5));
        assert_eq!(bar.position_at(3.0), Duration::from_secs(10));
        assert_eq!(SeekBar::default().ratio(), 0.0);
    }
}
