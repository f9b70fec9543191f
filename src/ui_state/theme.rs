use ratatui::{
    style::Color,
    widgets::{BorderType, Borders},
};

const DARK_WHITE: Color = Color::Rgb(210, 210, 210);
const MID_GRAY: Color = Color::Rgb(100, 100, 100);
const DARK_GRAY: Color = Color::Rgb(25, 25, 25);
const DARK_GRAY_FADED: Color = Color::Rgb(10, 10, 10);
const GOOD_RED: Color = Color::Rgb(255, 70, 70);
const GOLD: Color = Color::Rgb(220, 220, 100);
const GOLD_FADED: Color = Color::Rgb(130, 130, 60);

pub struct DisplayTheme {
    pub bg_global: Color,
    pub bg_selected: Color,
    pub border: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub accent: Color,

    pub progress_complete: Color,
    pub progress_incomplete: Color,
    pub progress_disabled: Color,

    pub border_display: Borders,
    pub border_type: BorderType,
}

impl Default for DisplayTheme {
    fn default() -> Self {
        DisplayTheme {
            bg_global: DARK_GRAY,
            bg_selected: DARK_GRAY_FADED,
            border: GOLD,

            text_primary: DARK_WHITE,
            text_secondary: GOOD_RED,
            text_muted: MID_GRAY,
            accent: GOLD,

            progress_complete: GOOD_RED,
            progress_incomplete: MID_GRAY,
            progress_disabled: GOLD_FADED,

            border_display: Borders::ALL,
            border_type: BorderType::Thick,
        }
    }
}
