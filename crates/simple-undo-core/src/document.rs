//! Document model combining a text buffer with its undo/redo history.
//!
//! Every edit is expressed as a whole-content replacement: the document
//! computes the text the edit would produce, then records a `ReplaceContent`
//! command holding the before/after pair.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use anyhow::{Context, Result};
use simple_undo_history::{
    Command, ContentTarget, History, HistoryConfig, HistoryStatus, ReplaceContent,
};

use crate::buffer::TextBuffer;

/// An editable text surface with linear undo/redo.
pub struct Document {
    buffer: Rc<RefCell<TextBuffer>>,
    history: History,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len_chars", &self.buffer.borrow().len_chars())
            .field("history", &self.history)
            .finish()
    }
}

impl Document {
    /// Creates an empty document.
    pub fn new(config: HistoryConfig) -> Self {
        Self::with_text("", config)
    }

    /// Creates a document pre-filled with `text`. The initial text is not undoable.
    pub fn with_text(text: &str, config: HistoryConfig) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(TextBuffer::from(text))),
            history: History::new(config),
        }
    }

    /// Registers an observer called after every history change.
    pub fn subscribe(&mut self, observer: impl FnMut(&HistoryStatus) + 'static) {
        self.history.subscribe(observer);
    }

    /// Returns the full text.
    pub fn text(&self) -> String {
        self.buffer.borrow().content()
    }

    /// Read access to the underlying buffer.
    pub fn buffer(&self) -> Ref<'_, TextBuffer> {
        self.buffer.borrow()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn status(&self) -> HistoryStatus {
        self.history.status()
    }

    /// Replaces the whole text.
    ///
    /// # Errors
    ///
    /// Returns an error if the history rejects the change.
    pub fn replace_all(&mut self, text: &str) -> Result<()> {
        self.record(text.to_string())
    }

    /// Inserts `text` at `char_idx`.
    ///
    /// # Errors
    ///
    /// Returns an error if `char_idx` is out of bounds or the history
    /// rejects the change.
    pub fn insert_text(&mut self, char_idx: usize, text: &str) -> Result<()> {
        let mut scratch = self.buffer.borrow().clone();
        scratch
            .insert(char_idx, text)
            .context("Failed to insert text")?;
        self.record(scratch.content())
    }

    /// Appends `text` at the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the history rejects the change.
    pub fn append(&mut self, text: &str) -> Result<()> {
        let end = self.buffer.borrow().len_chars();
        self.insert_text(end, text)
    }

    /// Removes the char range `[start..end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is invalid or the history rejects the
    /// change.
    pub fn delete_range(&mut self, start: usize, end: usize) -> Result<()> {
        let mut scratch = self.buffer.borrow().clone();
        scratch
            .remove(start, end)
            .context("Failed to delete range")?;
        self.record(scratch.content())
    }

    /// Reverts the most recent edit.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to undo.
    pub fn undo(&mut self) -> Result<()> {
        self.history.undo()?;
        Ok(())
    }

    /// Re-applies the most recently undone edit.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to redo.
    pub fn redo(&mut self) -> Result<()> {
        self.history.redo()?;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Forgets all recorded edits, keeping the current text.
    ///
    /// # Errors
    ///
    /// Returns an error if the history rejects the change.
    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear()?;
        Ok(())
    }

    /// Records a transition from the current text to `new_text`.
    fn record(&mut self, new_text: String) -> Result<()> {
        let mut command = ReplaceContent::capture(&self.buffer, new_text);
        if command.old_value() == command.new_value() {
            tracing::trace!("Skipping edit that leaves the text unchanged");
            return Ok(());
        }
        if self.history.config().apply_on_execute {
            return self.history.execute(command).context("Failed to record edit");
        }

        // History only does bookkeeping here, so the edit is written first
        let previous = command.old_value().to_string();
        command.apply();
        if let Err(e) = self.history.execute(command) {
            tracing::warn!("History rejected edit, restoring previous text");
            self.buffer.borrow_mut().set_content(&previous);
            return Err(anyhow::Error::new(e).context("Failed to record edit"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::with_text(text, HistoryConfig::headless())
    }

    #[test]
    fn test_with_text_is_not_undoable() {
        let d = doc("hello");
        assert_eq!(d.text(), "hello");
        assert!(!d.can_undo());
        assert!(!d.can_redo());
    }

    #[test]
    fn test_replace_all_undo_redo() {
        let mut d = doc("A");
        d.replace_all("B").unwrap();
        assert_eq!(d.text(), "B");
        d.undo().unwrap();
        assert_eq!(d.text(), "A");
        d.redo().unwrap();
        assert_eq!(d.text(), "B");
    }

    #[test]
    fn test_insert_and_append() {
        let mut d = doc("world");
        d.insert_text(0, "hello ").unwrap();
        d.append("!").unwrap();
        assert_eq!(d.text(), "hello world!");
        assert_eq!(d.history().len(), 2);

        d.undo().unwrap();
        assert_eq!(d.text(), "hello world");
    }

    #[test]
    fn test_delete_range() {
        let mut d = doc("hello world");
        d.delete_range(5, 11).unwrap();
        assert_eq!(d.text(), "hello");
        d.undo().unwrap();
        assert_eq!(d.text(), "hello world");
    }

    #[test]
    fn test_out_of_bounds_edit_is_not_recorded() {
        let mut d = doc("abc");
        assert!(d.insert_text(10, "x").is_err());
        assert!(d.delete_range(2, 1).is_err());
        assert!(d.history().is_empty());
        assert_eq!(d.text(), "abc");
    }

    #[test]
    fn test_noop_edit_is_not_recorded() {
        let mut d = doc("same");
        d.replace_all("same").unwrap();
        d.append("").unwrap();
        assert!(d.history().is_empty());
    }

    #[test]
    fn test_undo_on_fresh_document_errors() {
        let mut d = doc("");
        let err = d.undo().unwrap_err();
        assert!(err.to_string().contains("nothing to undo"));
        let err = d.redo().unwrap_err();
        assert!(err.to_string().contains("nothing to redo"));
    }

    #[test]
    fn test_caller_applied_mode_still_edits() {
        let config = HistoryConfig {
            apply_on_execute: false,
            ..HistoryConfig::headless()
        };
        let mut d = Document::with_text("A", config);
        d.replace_all("B").unwrap();
        assert_eq!(d.text(), "B");
        d.undo().unwrap();
        assert_eq!(d.text(), "A");
    }

    #[test]
    fn test_unwired_document_rejects_edit() {
        let mut d = Document::with_text("A", HistoryConfig::default());
        let err = d.replace_all("B").unwrap_err();
        assert!(format!("{err:#}").contains("observer"));
        assert_eq!(d.text(), "A");
    }

    #[test]
    fn test_rejected_caller_applied_edit_is_rolled_back() {
        let config = HistoryConfig {
            apply_on_execute: false,
            ..HistoryConfig::default()
        };
        let mut d = Document::with_text("A", config);
        assert!(d.replace_all("B").is_err());
        assert_eq!(d.text(), "A");
    }

    #[test]
    fn test_clear_history_keeps_text() {
        let mut d = doc("A");
        d.replace_all("B").unwrap();
        d.clear_history().unwrap();
        assert_eq!(d.text(), "B");
        assert!(!d.can_undo());
    }
}
