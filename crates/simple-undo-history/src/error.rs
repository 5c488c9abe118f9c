use thiserror::Error;

/// Errors reported by the history and its commands.
///
/// Every variant is raised before any state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// A state change was attempted with no update observer registered.
    #[error("history has no update observer; register one with `History::subscribe`")]
    Unwired,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    /// The command's target no longer exists.
    #[error("command target is missing")]
    MissingTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(HistoryError::NothingToUndo.to_string(), "nothing to undo");
        assert_eq!(HistoryError::NothingToRedo.to_string(), "nothing to redo");
        assert_eq!(HistoryError::MissingTarget.to_string(), "command target is missing");
        assert!(HistoryError::Unwired.to_string().contains("observer"));
    }
}
