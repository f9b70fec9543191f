use crate::ui_state::UiState;

#[derive(Debug, Clone, PartialEq)]
pub enum PopupType {
    None,
    Error(String),
}

impl UiState {
    pub fn show_popup(&mut self, popup: PopupType) {
        self.popup = popup
    }

    pub fn close_popup(&mut self) {
        self.popup = PopupType::None
    }

    pub fn popup_is_open(&self) -> bool {
        self.popup != PopupType::None
    }
}
