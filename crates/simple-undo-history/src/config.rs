/// Runtime configuration for a `History`.
use simple_undo_config::HistorySettings;

/// Configuration for the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// `execute` applies the command's forward effect before recording it.
    ///
    /// Turn off when callers apply their edits themselves and only hand the
    /// finished command over for bookkeeping.
    pub apply_on_execute: bool,
    /// Max commands kept. Oldest done commands are evicted past this bound.
    pub max_depth: Option<usize>,
    /// Treat a missing update observer as a configuration error.
    pub require_observer: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            apply_on_execute: true,
            max_depth: None,
            require_observer: true,
        }
    }
}

impl HistoryConfig {
    /// A config that runs without any observer. Handy for headless use and tests.
    pub fn headless() -> Self {
        Self {
            require_observer: false,
            ..Self::default()
        }
    }
}

impl From<&HistorySettings> for HistoryConfig {
    fn from(settings: &HistorySettings) -> Self {
        Self {
            apply_on_execute: settings.apply_on_execute,
            // Zero would forbid undo entirely
            max_depth: settings.max_depth.filter(|&n| n > 0),
            require_observer: settings.require_observer,
        }
    }
}
