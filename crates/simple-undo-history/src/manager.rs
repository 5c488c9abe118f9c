/// Linear undo/redo manager.
///
/// Commands live in a single log. A cursor separates the applied prefix from
/// the undone suffix; executing a new command drops that suffix, so there is
/// never more than one timeline.
use std::fmt;

use crate::command::Command;
use crate::config::HistoryConfig;
use crate::error::HistoryError;

/// Snapshot handed to observers after every state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryStatus {
    /// Number of commands in the log (applied + undone).
    pub len: usize,
    /// Index of the last applied command, `None` when nothing is applied.
    pub cursor: Option<usize>,
    pub can_undo: bool,
    pub can_redo: bool,
}

type Observer = Box<dyn FnMut(&HistoryStatus)>;

/// Undo/redo history for a single editable surface.
///
/// Observers run synchronously after `execute`, `undo`, `redo` and `clear`.
/// Re-entering the history from an observer is not supported.
pub struct History {
    /// Command log, oldest first.
    commands: Vec<Box<dyn Command>>,
    /// Count of applied commands. The cursor is `applied - 1`.
    applied: usize,
    observers: Vec<Observer>,
    config: HistoryConfig,
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("len", &self.commands.len())
            .field("cursor", &self.cursor())
            .field("observers", &self.observers.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl History {
    /// Creates an empty history with no observers.
    ///
    /// With `require_observer` set (the default), state changes fail with
    /// `HistoryError::Unwired` until `subscribe` has been called.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            commands: Vec::new(),
            applied: 0,
            observers: Vec::new(),
            config,
        }
    }

    /// Creates an empty history with a single observer already wired.
    pub fn with_observer(
        config: HistoryConfig,
        observer: impl FnMut(&HistoryStatus) + 'static,
    ) -> Self {
        let mut history = Self::new(config);
        history.subscribe(observer);
        history
    }

    /// Registers an observer called after every state change.
    pub fn subscribe(&mut self, observer: impl FnMut(&HistoryStatus) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Records `command` as the newest step, discarding anything undone.
    ///
    /// Applies the command's forward effect first unless
    /// `apply_on_execute` is off.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Unwired` if an observer is required but none
    /// is registered. Nothing is changed in that case.
    pub fn execute(&mut self, command: impl Command + 'static) -> Result<(), HistoryError> {
        self.execute_boxed(Box::new(command))
    }

    /// Same as [`History::execute`] for commands that are already boxed.
    pub fn execute_boxed(&mut self, mut command: Box<dyn Command>) -> Result<(), HistoryError> {
        self.ensure_wired()?;

        if self.commands.len() > self.applied {
            let discarded = self.commands.len() - self.applied;
            self.commands.truncate(self.applied);
            tracing::debug!(discarded, "Discarded redo branch");
        }

        if self.config.apply_on_execute {
            command.apply();
        }
        tracing::debug!(label = command.label(), "Executed command");
        self.commands.push(command);
        self.applied += 1;
        self.enforce_max_depth();

        self.notify();
        Ok(())
    }

    /// Reverts the command at the cursor and moves the cursor back.
    ///
    /// # Errors
    ///
    /// `HistoryError::NothingToUndo` when the cursor is already before the
    /// first command, `HistoryError::Unwired` when no observer is wired.
    pub fn undo(&mut self) -> Result<(), HistoryError> {
        self.ensure_wired()?;
        if !self.can_undo() {
            tracing::debug!("Undo requested with empty undo stack");
            return Err(HistoryError::NothingToUndo);
        }

        self.applied -= 1;
        let command = &mut self.commands[self.applied];
        command.revert();
        tracing::debug!(label = command.label(), applied = self.applied, "Undid command");

        self.notify();
        Ok(())
    }

    /// Moves the cursor forward and re-applies the command there.
    ///
    /// # Errors
    ///
    /// `HistoryError::NothingToRedo` when the cursor is at the newest
    /// command, `HistoryError::Unwired` when no observer is wired.
    pub fn redo(&mut self) -> Result<(), HistoryError> {
        self.ensure_wired()?;
        if !self.can_redo() {
            tracing::debug!("Redo requested with empty redo stack");
            return Err(HistoryError::NothingToRedo);
        }

        let command = &mut self.commands[self.applied];
        command.apply();
        self.applied += 1;
        tracing::debug!(label = command.label(), applied = self.applied, "Redid command");

        self.notify();
        Ok(())
    }

    /// Whether there is an applied command to revert.
    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    /// Whether there is an undone command to re-apply.
    pub fn can_redo(&self) -> bool {
        self.applied < self.commands.len()
    }

    /// Index of the last applied command, `None` if nothing is applied.
    pub fn cursor(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            len: self.commands.len(),
            cursor: self.cursor(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Labels of every recorded command, oldest first.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().map(|c| c.label())
    }

    /// Drops every recorded command without touching any target.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Unwired` if an observer is required but none
    /// is registered.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.ensure_wired()?;
        self.commands.clear();
        self.applied = 0;
        self.notify();
        Ok(())
    }

    fn ensure_wired(&self) -> Result<(), HistoryError> {
        if self.config.require_observer && self.observers.is_empty() {
            tracing::error!("History used without an update observer");
            return Err(HistoryError::Unwired);
        }
        Ok(())
    }

    /// Evicts the oldest commands once the log outgrows `max_depth`.
    ///
    /// Only called right after `execute`, when every command is applied.
    /// A bound of zero is ignored so the command just executed stays undoable.
    fn enforce_max_depth(&mut self) {
        let Some(max) = self.config.max_depth.filter(|&n| n > 0) else {
            return;
        };
        if self.commands.len() > max {
            let excess = self.commands.len() - max;
            self.commands.drain(..excess);
            self.applied -= excess;
            tracing::debug!(evicted = excess, "Evicted oldest history entries");
        }
    }

    fn notify(&mut self) {
        let status = self.status();
        for observer in &mut self.observers {
            observer(&status);
        }
    }
}
