/// Editable text surface backed by a rope, with linear undo/redo.
pub mod buffer;
pub mod document;

pub use buffer::TextBuffer;
pub use document::Document;
pub use simple_undo_history::{HistoryConfig, HistoryError, HistoryStatus};
