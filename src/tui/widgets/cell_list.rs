use super::{PAUSE_ICON, PLAY_ICON, TIME_WIDTH};
use crate::{
    EntryIndex, get_readable_duration,
    ui_state::{CellView, DisplayTheme, PlayIcon, UiState},
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::Buffer,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, LineGauge, Padding, StatefulWidget, Widget},
};

const INDEX_WIDTH: u16 = 6;
const ICON_WIDTH: u16 = 3;
const FORMAT_WIDTH: u16 = 6;

/// The scrollable list. Each visible row draws whatever its cell currently
/// shows, and records where it landed so mouse input can find it.
pub struct CellList;

impl StatefulWidget for CellList {
    type State = UiState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let theme = &state.theme;

        let title = Line::from_iter([
            Span::from(" listplayer ").fg(theme.accent),
            Span::from(format!("[{} entries] ", state.entries.len())).fg(theme.text_muted),
        ]);

        let keymaps = " [←/→] Seek ✧ [click] Seek to ✧ [g/G] Top/Bottom ".fg(theme.text_muted);

        let block = Block::bordered()
            .borders(theme.border_display)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title_top(title)
            .title_bottom(keymaps)
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .bg(theme.bg_global);

        let inner = block.inner(area);
        block.render(area, buf);

        let selected = state.viewport.selected();

        let mut row_areas = Vec::new();
        let mut gauge_areas = Vec::new();

        for (line, idx) in state.viewport.window().enumerate() {
            let y = inner.y + line as u16;
            if y >= inner.bottom() {
                break;
            }
            let row_area = Rect::new(inner.x, y, inner.width, 1);

            let entry = EntryIndex(idx);
            let Some(cell) = state.cells.cell_for(entry) else {
                continue;
            };
            let Some(view) = state.cells.view(cell) else {
                continue;
            };

            let is_selected = selected == Some(idx);
            if is_selected {
                Block::new().bg(theme.bg_selected).render(row_area, buf);
            }

            let [index_area, icon_area, gauge_area, format_area, time_area] = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(INDEX_WIDTH),
                    Constraint::Length(ICON_WIDTH),
                    Constraint::Fill(1),
                    Constraint::Length(FORMAT_WIDTH),
                    Constraint::Length(TIME_WIDTH),
                ])
                .areas(row_area);

            let index_color = match is_selected {
                true => theme.accent,
                false => theme.text_muted,
            };
            format!("{idx:>4}")
                .fg(index_color)
                .render(index_area, buf);

            icon_span(view, theme).render(icon_area, buf);
            gauge(view, theme).render(gauge_area, buf);
            if let Some(entry) = state.entries.get(entry) {
                format!("{}", entry.filetype())
                    .fg(theme.text_secondary)
                    .into_centered_line()
                    .render(format_area, buf);
            }
            time_span(view, theme)
                .into_right_aligned_line()
                .render(time_area, buf);

            row_areas.push((row_area, idx));
            gauge_areas.push((gauge_area, cell));
        }

        state.row_areas = row_areas;
        state.gauge_areas = gauge_areas;
    }
}

fn icon_span(view: &CellView, theme: &DisplayTheme) -> Span<'static> {
    match view.icon {
        PlayIcon::Play => Span::from(format!(" {PLAY_ICON}")).fg(theme.text_primary),
        PlayIcon::Pause => Span::from(format!(" {PAUSE_ICON}")).fg(theme.accent),
    }
}

fn gauge<'a>(view: &CellView, theme: &DisplayTheme) -> LineGauge<'a> {
    let bar = view.seek_bar;
    let filled = match bar.enabled {
        true => theme.progress_complete,
        false => theme.progress_disabled,
    };

    LineGauge::default()
        .filled_style(Style::default().fg(filled))
        .unfilled_style(Style::default().fg(theme.progress_incomplete))
        .label("")
        .ratio(bar.ratio())
}

fn time_span(view: &CellView, theme: &DisplayTheme) -> Span<'static> {
    let bar = view.seek_bar;
    if !bar.enabled {
        return Span::from("--:--").fg(theme.text_muted);
    }

    let elapsed = get_readable_duration(bar.value);
    let total = get_readable_duration(bar.max);
    Span::from(format!("{elapsed}/{total}")).fg(theme.text_secondary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryList;
    use std::sync::Arc;

    fn rendered(state: &mut UiState, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        CellList.render(area, &mut buf, state);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn rows_show_their_file_type() {
        let mut ui = UiState::new(Arc::new(EntryList::repeated("loop.flac", 8)));
        ui.viewport.set_height(3);
        ui.cells.layout(ui.viewport.window());

        let screen = rendered(&mut ui, Rect::new(0, 0, 60, 5));

        assert!(screen.contains("ᶠˡᵃᶜ"));
        assert_eq!(ui.row_areas.len(), 3);
        assert_eq!(ui.gauge_areas.len(), 3);
    }
}
