mod action;

pub use action::{handle_key_event, handle_mouse_event, next_event};

use crate::ui_state::CellId;
use ratatui::crossterm::event::KeyModifiers;

const X: KeyModifiers = KeyModifiers::NONE;
const S: KeyModifiers = KeyModifiers::SHIFT;
const C: KeyModifiers = KeyModifiers::CONTROL;

const SCROLL_MID: usize = 5;
const SCROLL_XTRA: usize = 20;

#[derive(Debug, PartialEq)]
pub enum Action {
    // Player Controls
    Activate,
    Stop,
    Seek(SeekDirection),
    SeekTo { cell: CellId, ratio: f64 },

    // Navigation
    Scroll(Director),
    Select(usize),

    // Lifecycle
    FocusLost,
    ClosePopup,
    QUIT,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Director {
    Up(usize),
    Down(usize),
    Top,
    Bottom,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SeekDirection {
    Forward,
    Back,
}
