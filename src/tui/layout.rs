use ratatui::layout::{Constraint, Direction, Layout, Rect, Size};

// Borders above and below the rows
const LIST_CHROME: u16 = 2;

pub struct AppLayout {
    pub cell_list: Rect,
    pub buffer_line: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let [cell_list, buffer_line] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .areas(area);

        AppLayout {
            cell_list,
            buffer_line,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(Rect::new(0, 0, size.width, size.height))
    }

    /// Number of list rows that fit on screen.
    pub fn list_rows(&self) -> usize {
        self.cell_list.height.saturating_sub(LIST_CHROME) as usize
    }
}
