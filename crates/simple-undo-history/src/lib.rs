/// Linear undo/redo history.
///
/// Provides a `History` that records reversible `Command`s in a single
/// timeline with a cursor, plus `ReplaceContent`, a command that swaps the
/// whole content of a shared target between two captured values.
pub mod command;
pub mod config;
pub mod error;
pub mod manager;

pub use command::{Command, ContentTarget, ReplaceContent};
pub use config::HistoryConfig;
pub use error::HistoryError;
pub use manager::{History, HistoryStatus};
