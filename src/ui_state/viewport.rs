use crate::key_handler::Director;
use std::ops::Range;

/// Selection and scroll offset over `len` rows, `height` of them visible.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Viewport {
    len: usize,
    height: usize,
    selected: usize,
    offset: usize,
}

impl Viewport {
    pub fn new(len: usize) -> Self {
        Viewport {
            len,
            ..Self::default()
        }
    }

    pub fn selected(&self) -> Option<usize> {
        (self.len > 0).then_some(self.selected)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.follow_selection();
    }

    pub fn window(&self) -> Range<usize> {
        self.offset..(self.offset + self.height).min(self.len)
    }

    pub fn select(&mut self, row: usize) {
        if self.len > 0 {
            self.selected = row.min(self.len - 1);
            self.follow_selection();
        }
    }

    pub fn scroll(&mut self, director: &Director) {
        if self.len == 0 {
            return;
        }

        let len = self.len;
        self.selected = match director {
            Director::Up(x) => (self.selected + len - (x % len)) % len,
            Director::Down(x) => (self.selected + x) % len,
            Director::Top => 0,
            Director::Bottom => len - 1,
        };
        self.follow_selection();
    }

    fn follow_selection(&mut self) {
        if self.height == 0 {
            self.offset = 0;
            return;
        }

        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.height {
            self.offset = self.selected + 1 - self.height;
        }

        let max_offset = self.len.saturating_sub(self.height);
        self.offset = self.offset.min(max_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_clamped_to_length() {
        let mut vp = Viewport::new(3);
        vp.set_height(10);
        assert_eq!(vp.window(), 0..3);
    }

    #[test]
    fn moving_past_the_bottom_scrolls() {
        let mut vp = Viewport::new(256);
        vp.set_height(10);
        vp.scroll(&Director::Down(12));

        assert_eq!(vp.selected(), Some(12));
        assert_eq!(vp.window(), 3..13);

        vp.scroll(&Director::Up(5));
        assert_eq!(vp.window(), 3..13);
        vp.scroll(&Director::Up(5));
        assert_eq!(vp.window(), 2..12);
    }

    #[test]
    fn single_steps_wrap_around() {
        let mut vp = Viewport::new(256);
        vp.set_height(10);
        vp.scroll(&Director::Up(1));

        assert_eq!(vp.selected(), Some(255));
        assert_eq!(vp.window(), 246..256);
    }

    #[test]
    fn shrinking_keeps_selection_visible() {
        let mut vp = Viewport::new(50);
        vp.set_height(20);
        vp.select(19);
        vp.set_height(5);
        assert!(vp.window().contains(&19));
    }

    #[test]
    fn empty_list_has_no_selection() {
        let mut vp = Viewport::new(0);
        vp.set_height(5);
        vp.scroll(&Director::Down(1));
        assert_eq!(vp.selected(), None);
        assert!(vp.window().is_empty());
    }
}
