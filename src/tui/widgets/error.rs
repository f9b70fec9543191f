use crate::ui_state::UiState;
use ratatui::{
    layout::{Alignment, Rect},
    prelude::Buffer,
    style::Stylize,
    widgets::{Block, BorderType, Padding, Paragraph, StatefulWidget, Widget, Wrap},
};

static PADDING: Padding = Padding {
    left: 3,
    right: 3,
    top: 1,
    bottom: 1,
};

pub struct ErrorMsg;
impl StatefulWidget for ErrorMsg {
    type State = UiState;
    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let err_str = state.get_error().unwrap_or("Nothing went wrong");

        Paragraph::new(err_str)
            .wrap(Wrap { trim: true })
            .centered()
            .block(
                Block::bordered()
                    .border_type(BorderType::Double)
                    .title_top(" Playback error ")
                    .title_bottom(" Press <Esc> to clear ")
                    .title_alignment(Alignment::Center)
                    .padding(PADDING),
            )
            .fg(state.theme.text_primary)
            .bg(ratatui::style::Color::LightRed)
            .render(area, buf);
    }
}
