//! # History Stack
//!
//! Linear undo/redo over whole-document snapshots.
//!
//! ## Design
//!
//! - Every entry is a complete document, not a delta
//! - A cursor marks the current entry; undo/redo only move the cursor
//! - Pushing while the cursor is below the top discards the redo branch
//! - Pushing the current document again is a no-op
//! - An optional level cap drops the oldest snapshots first
//!
//! ## Example
//!
//! ```rust
//! use cardrev_editor::HistoryStack;
//!
//! let mut history = HistoryStack::new("a");
//! history.push("b");
//! history.push("c");
//!
//! assert_eq!(history.undo(), Some("b"));
//! assert_eq!(history.undo(), Some("a"));
//! assert_eq!(history.redo(), Some("b"));
//! ```

/// Undo/redo stack of document snapshots
#[derive(Debug, Clone)]
pub struct HistoryStack {
    /// Snapshots, oldest first. Never empty.
    entries: Vec<String>,

    /// Index of the current snapshot
    cursor: usize,

    /// Maximum number of snapshots kept (0 = unlimited)
    max_levels: usize,
}

impl HistoryStack {
    /// Create a stack holding only `initial`, with no level cap
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_max_levels(initial, 0)
    }

    /// Create a stack that keeps at most `max_levels` snapshots
    pub fn with_max_levels(initial: impl Into<String>, max_levels: usize) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
            max_levels,
        }
    }

    /// Record a new document. Returns `false` if it equals the current one.
    pub fn push(&mut self, content: impl Into<String>) -> bool {
        let content = content.into();
        if content == self.current() {
            return false;
        }

        // New edit invalidates the redo branch
        self.entries.truncate(self.cursor + 1);
        self.entries.push(content);

        if self.max_levels > 0 && self.entries.len() > self.max_levels {
            let excess = self.entries.len() - self.max_levels;
            self.entries.drain(..excess);
        }

        self.cursor = self.entries.len() - 1;
        true
    }

    /// Step back one snapshot, `None` at the bottom of the stack
    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward one snapshot, `None` at the top of the stack
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Collapse to a single snapshot
    pub fn reset(&mut self, initial: impl Into<String>) {
        self.entries.clear();
        self.entries.push(initial.into());
        self.cursor = 0;
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false, the stack holds at least the initial snapshot
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_creation() {
        let history = HistoryStack::new("t0");
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current(), "t0");
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_undo_redo() {
        let mut history = HistoryStack::new("a");
        assert!(history.push("b"));
        assert!(history.push("c"));

        assert_eq!(history.undo(), Some("b"));
        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some("b"));
        assert_eq!(history.redo(), Some("c"));
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), "c");
    }

    #[test]
    fn test_push_same_content_is_noop() {
        let mut history = HistoryStack::new("a");
        assert!(!history.push("a"));
        assert_eq!(history.len(), 1);

        history.push("b");
        history.undo();
        // Equal to the entry under the cursor, not the top
        assert!(!history.push("a"));
        assert!(history.can_redo());
    }

    #[test]
    fn test_new_push_truncates_redo_branch() {
        let mut history = HistoryStack::new("t0");
        history.push("a");
        history.push("b");
        history.undo();
        history.push("c");

        assert!(!history.can_redo());
        assert_eq!(history.redo(), None);
        assert_eq!(history.len(), 3);
        assert_eq!(history.undo(), Some("a"));
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut history = HistoryStack::with_max_levels("v0", 3);
        for i in 1..=5 {
            history.push(format!("v{}", i));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current(), "v5");
        assert_eq!(history.undo(), Some("v4"));
        assert_eq!(history.undo(), Some("v3"));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_reset_collapses_stack() {
        let mut history = HistoryStack::new("a");
        history.push("b");
        history.push("c");
        history.undo();

        history.reset("fresh");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), "fresh");
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
