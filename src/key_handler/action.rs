use crate::{
    REFRESH_RATE,
    key_handler::*,
    ui_state::{PopupType, UiState},
};
use anyhow::Result;
use ratatui::{
    crossterm::event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    layout::Position,
};

use KeyCode::*;

pub fn handle_key_event(key_event: KeyEvent, state: &UiState) -> Option<Action> {
    if let Some(action) = global_commands(&key_event) {
        return Some(action);
    }

    match &state.popup {
        PopupType::Error(_) => Some(Action::ClosePopup),
        PopupType::None => handle_list(&key_event),
    }
}

fn global_commands(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (C, Char('c')) => Some(Action::QUIT),
        _ => None,
    }
}

fn handle_list(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (X, Char('q')) => Some(Action::QUIT),

        // PLAYBACK COMMANDS
        (X, Enter) | (X, Char(' ')) => Some(Action::Activate),
        (X, Char('s')) => Some(Action::Stop),
        (X, Right) | (X, Char('l')) => Some(Action::Seek(SeekDirection::Forward)),
        (X, Left) | (X, Char('h')) => Some(Action::Seek(SeekDirection::Back)),

        // SCROLLING
        (X, Char('j')) | (X, Down) => Some(Action::Scroll(Director::Down(1))),
        (X, Char('k')) | (X, Up) => Some(Action::Scroll(Director::Up(1))),
        (X, Char('d')) | (X, PageDown) => Some(Action::Scroll(Director::Down(SCROLL_MID))),
        (X, Char('u')) | (X, PageUp) => Some(Action::Scroll(Director::Up(SCROLL_MID))),
        (S, Char('D')) => Some(Action::Scroll(Director::Down(SCROLL_XTRA))),
        (S, Char('U')) => Some(Action::Scroll(Director::Up(SCROLL_XTRA))),
        (X, Char('g')) | (X, Home) => Some(Action::Scroll(Director::Top)),
        (S, Char('G')) | (X, End) => Some(Action::Scroll(Director::Bottom)),

        _ => None,
    }
}

pub fn handle_mouse_event(mouse: MouseEvent, state: &UiState) -> Option<Action> {
    let pos = Position::new(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if state.popup_is_open() => {
            Some(Action::ClosePopup)
        }
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            if let Some((cell, ratio)) = state.gauge_at(pos) {
                return Some(Action::SeekTo { cell, ratio });
            }
            match mouse.kind {
                MouseEventKind::Down(_) => state.row_at(pos).map(Action::Select),
                _ => None,
            }
        }
        MouseEventKind::ScrollDown => Some(Action::Scroll(Director::Down(1))),
        MouseEventKind::ScrollUp => Some(Action::Scroll(Director::Up(1))),
        _ => None,
    }
}

/// Waits up to one frame for input.
pub fn next_event() -> Result<Option<Event>> {
    match event::poll(REFRESH_RATE)? {
        true => Ok(Some(event::read()?)),
        false => Ok(None),
    }
}
