mod entry;
mod filetype;

pub use entry::{EntryIndex, EntryList, ListEntry};
pub use filetype::FileType;
