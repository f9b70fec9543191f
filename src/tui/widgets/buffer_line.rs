use super::PAUSE_ICON;
use crate::{get_readable_duration, ui_state::UiState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Buffer,
    style::Stylize,
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};

pub struct BufferLine;

impl StatefulWidget for BufferLine {
    type State = UiState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let theme = &state.theme;
        let np = state.get_now_playing();

        let [left, center, right] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .areas(area);

        format!("  {} entries", state.entries.len())
            .fg(theme.text_muted)
            .into_left_aligned_line()
            .render(left, buf);

        if let Some(index) = np.item_index {
            let title = state
                .entries
                .get(index)
                .map(|e| e.title())
                .unwrap_or_default();

            let separator = match np.is_playing {
                true => Span::from(" ✧ ").fg(theme.text_muted),
                false => Span::from(format!(" {PAUSE_ICON} ")).fg(theme.accent),
            };

            Line::from_iter([
                Span::from(format!("#{index} ")).fg(theme.text_muted),
                Span::from(title).fg(theme.text_secondary),
                separator,
                Span::from(get_readable_duration(np.position))
                    .fg(theme.text_primary),
            ])
            .centered()
            .render(center, buf);
        }

        " [⏎] Play/Pause ✧ [s] Stop ✧ [q] Quit "
            .fg(theme.text_muted)
            .into_right_aligned_line()
            .render(right, buf);
    }
}
