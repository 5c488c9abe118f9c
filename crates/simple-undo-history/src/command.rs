/// Reversible commands and the content-replacement command.
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::HistoryError;

/// A reversible unit of work.
///
/// `apply` performs the forward effect and `revert` takes it back. Calling
/// `revert` then `apply` must leave the target exactly as `apply` alone would.
pub trait Command: fmt::Debug {
    /// Applies the forward effect (redo).
    fn apply(&mut self);

    /// Applies the backward effect (undo).
    fn revert(&mut self);

    /// Short human-readable name, used in status displays and logs.
    fn label(&self) -> &str {
        "command"
    }
}

impl<C: Command + ?Sized> Command for Box<C> {
    fn apply(&mut self) {
        (**self).apply();
    }

    fn revert(&mut self) {
        (**self).revert();
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

/// Something with serialized content that can be read and overwritten whole.
pub trait ContentTarget {
    fn content(&self) -> String;
    fn set_content(&mut self, content: &str);
}

impl ContentTarget for String {
    fn content(&self) -> String {
        self.clone()
    }

    fn set_content(&mut self, content: &str) {
        self.clear();
        self.push_str(content);
    }
}

/// Replaces the whole content of a shared target.
///
/// Both values are captured at construction and never change, so `apply`
/// and `revert` can be repeated any number of times.
pub struct ReplaceContent<T: ContentTarget> {
    target: Rc<RefCell<T>>,
    old_value: String,
    new_value: String,
}

impl<T: ContentTarget> fmt::Debug for ReplaceContent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplaceContent")
            .field("old_len", &self.old_value.len())
            .field("new_len", &self.new_value.len())
            .finish()
    }
}

impl<T: ContentTarget> ReplaceContent<T> {
    /// Captures a before/after pair for `target`. Does not touch the target.
    pub fn new(
        target: &Rc<RefCell<T>>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            target: Rc::clone(target),
            old_value: old_value.into(),
            new_value: new_value.into(),
        }
    }

    /// Uses the target's current content as the old value.
    pub fn capture(target: &Rc<RefCell<T>>, new_value: impl Into<String>) -> Self {
        let old_value = target.borrow().content();
        Self::new(target, old_value, new_value)
    }

    /// Builds the command from a weak handle.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::MissingTarget` if the target has been dropped.
    pub fn from_weak(
        target: &Weak<RefCell<T>>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Result<Self, HistoryError> {
        let target = target.upgrade().ok_or(HistoryError::MissingTarget)?;
        Ok(Self::new(&target, old_value, new_value))
    }

    pub fn old_value(&self) -> &str {
        &self.old_value
    }

    pub fn new_value(&self) -> &str {
        &self.new_value
    }
}

impl<T: ContentTarget> Command for ReplaceContent<T> {
    fn apply(&mut self) {
        self.target.borrow_mut().set_content(&self.new_value);
    }

    fn revert(&mut self) {
        self.target.borrow_mut().set_content(&self.old_value);
    }

    fn label(&self) -> &str {
        "replace content"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(text: &str) -> Rc<RefCell<String>> {
        Rc::new(RefCell::new(text.to_string()))
    }

    #[test]
    fn test_new_does_not_touch_target() {
        let target = shared("A");
        let cmd = ReplaceContent::new(&target, "A", "B");
        assert_eq!(*target.borrow(), "A");
        assert_eq!(cmd.old_value(), "A");
        assert_eq!(cmd.new_value(), "B");
    }

    #[test]
    fn test_apply_and_revert() {
        let target = shared("A");
        let mut cmd = ReplaceContent::new(&target, "A", "B");
        cmd.apply();
        assert_eq!(*target.borrow(), "B");
        cmd.revert();
        assert_eq!(*target.borrow(), "A");
    }

    #[test]
    fn test_revert_then_apply_round_trip() {
        let target = shared("<p>one</p>");
        let mut cmd = ReplaceContent::new(&target, "<p>one</p>", "<p>two</p>");
        cmd.apply();
        let after_apply = target.borrow().clone();

        cmd.revert();
        cmd.apply();
        assert_eq!(*target.borrow(), after_apply);
    }

    #[test]
    fn test_repeated_apply_is_stable() {
        let target = shared("x");
        let mut cmd = ReplaceContent::new(&target, "x", "y");
        for _ in 0..3 {
            cmd.apply();
        }
        assert_eq!(*target.borrow(), "y");
        for _ in 0..3 {
            cmd.revert();
        }
        assert_eq!(*target.borrow(), "x");
    }

    #[test]
    fn test_capture_reads_current_content() {
        let target = shared("before");
        let cmd = ReplaceContent::capture(&target, "after");
        assert_eq!(cmd.old_value(), "before");
        assert_eq!(cmd.new_value(), "after");
    }

    #[test]
    fn test_from_weak_live_target() {
        let target = shared("A");
        let mut cmd = ReplaceContent::from_weak(&Rc::downgrade(&target), "A", "B").unwrap();
        cmd.apply();
        assert_eq!(*target.borrow(), "B");
    }

    #[test]
    fn test_from_weak_missing_target_fails() {
        let weak = {
            let target = shared("gone");
            Rc::downgrade(&target)
        };
        let err = ReplaceContent::from_weak(&weak, "a", "b").unwrap_err();
        assert_eq!(err, HistoryError::MissingTarget);
    }

    #[test]
    fn test_from_weak_never_created_target_fails() {
        let weak: Weak<RefCell<String>> = Weak::new();
        assert!(ReplaceContent::from_weak(&weak, "a", "b").is_err());
    }

    #[test]
    fn test_command_keeps_target_alive() {
        let target = shared("A");
        let weak = Rc::downgrade(&target);
        let mut cmd = ReplaceContent::new(&target, "A", "B");
        drop(target);

        cmd.apply();
        let alive = weak.upgrade().expect("command holds a strong handle");
        assert_eq!(*alive.borrow(), "B");
    }

    #[test]
    fn test_debug_omits_content() {
        let target = shared("secret");
        let cmd = ReplaceContent::new(&target, "secret", "longer secret");
        let dbg = format!("{cmd:?}");
        assert!(dbg.contains("ReplaceContent"));
        assert!(!dbg.contains("secret"));
    }

    #[test]
    fn test_boxed_command_forwards() {
        let target = shared("A");
        let mut cmd: Box<dyn Command> = Box::new(ReplaceContent::new(&target, "A", "B"));
        cmd.apply();
        assert_eq!(*target.borrow(), "B");
        assert_eq!(cmd.label(), "replace content");
    }
}
