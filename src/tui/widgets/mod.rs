mod buffer_line;
mod cell_list;
mod error;

pub use buffer_line::BufferLine;
pub use cell_list::CellList;
pub use error::ErrorMsg;

const PLAY_ICON: &str = "▶";
const PAUSE_ICON: &str = "⏸";
const TIME_WIDTH: u16 = 11;
