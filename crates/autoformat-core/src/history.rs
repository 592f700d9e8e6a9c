//! Snapshot history (undo/redo) for [`EditorState`](crate::EditorState).
//!
//! History is copy-on-write: pushing onto the history of one editor state never changes the
//! history seen by an older state.

use std::fmt;
use std::sync::Arc;

use crate::document::ContentState;
use crate::selection::SelectionState;

/// Label attached to every committed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    /// Characters typed or pasted.
    InsertCharacters,
    /// A range of text was deleted.
    RemoveRange,
    /// A block was split in two.
    SplitBlock,
    /// A block's type changed (possibly together with its text).
    ChangeBlockType,
    /// An inline style was toggled (possibly together with a text edit).
    ChangeInlineStyle,
    /// The previous snapshot was restored.
    Undo,
    /// An undone snapshot was re-applied.
    Redo,
}

impl ChangeType {
    /// The conventional change label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsertCharacters => "insert-characters",
            Self::RemoveRange => "remove-range",
            Self::SplitBlock => "split-block",
            Self::ChangeBlockType => "change-block-type",
            Self::ChangeInlineStyle => "change-inline-style",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document plus the selection that went with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub(crate) content: ContentState,
    pub(crate) selection: SelectionState,
}

#[derive(Debug, Clone)]
pub(crate) struct History {
    undo_stack: Arc<Vec<Snapshot>>,
    redo_stack: Arc<Vec<Snapshot>>,
    max_undo: usize,
    /// Clean point tracking. Uses `undo_stack.len()` as the saved position in the linear history.
    /// When `redo_stack` is non-empty, `clean_index` may be greater than `undo_stack.len()`.
    clean_index: Option<usize>,
}

impl History {
    pub(crate) fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: Arc::new(Vec::new()),
            redo_stack: Arc::new(Vec::new()),
            max_undo,
            clean_index: Some(0),
        }
    }

    pub(crate) fn with_limit(&self, max_undo: usize) -> Self {
        let mut next = self.clone();
        next.max_undo = max_undo;
        while next.undo_stack.len() > max_undo {
            next.drop_oldest();
        }
        next
    }

    pub(crate) fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub(crate) fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub(crate) fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub(crate) fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.clean_index == Some(self.undo_stack.len())
    }

    pub(crate) fn mark_clean(&self) -> Self {
        Self {
            clean_index: Some(self.undo_stack.len()),
            ..self.clone()
        }
    }

    /// Record `previous` as the state to return to on undo.
    pub(crate) fn push(&self, previous: Snapshot) -> Self {
        let mut next = self.clone();

        // If the clean point is in the redo area, it becomes unreachable after clearing redo.
        if !next.redo_stack.is_empty() {
            if let Some(clean_index) = next.clean_index
                && clean_index > next.undo_stack.len()
            {
                next.clean_index = None;
            }
            next.redo_stack = Arc::new(Vec::new());
        }

        if next.max_undo == 0 {
            next.clean_index = None;
            return next;
        }
        if next.undo_stack.len() >= next.max_undo {
            next.drop_oldest();
        }

        Arc::make_mut(&mut next.undo_stack).push(previous);
        next
    }

    /// Pop the most recent undo snapshot, parking `current` on the redo stack.
    pub(crate) fn undo(&self, current: Snapshot) -> Option<(Self, Snapshot)> {
        let mut next = self.clone();
        let restored = Arc::make_mut(&mut next.undo_stack).pop()?;
        Arc::make_mut(&mut next.redo_stack).push(current);
        Some((next, restored))
    }

    /// Pop the most recent redo snapshot, parking `current` on the undo stack.
    pub(crate) fn redo(&self, current: Snapshot) -> Option<(Self, Snapshot)> {
        let mut next = self.clone();
        let restored = Arc::make_mut(&mut next.redo_stack).pop()?;
        Arc::make_mut(&mut next.undo_stack).push(current);
        Some((next, restored))
    }

    fn drop_oldest(&mut self) {
        if self.undo_stack.is_empty() {
            return;
        }
        Arc::make_mut(&mut self.undo_stack).remove(0);
        self.clean_index = match self.clean_index {
            Some(0) | None => None,
            Some(clean_index) => Some(clean_index - 1),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(text: &str) -> Snapshot {
        let content = ContentState::from_text(text);
        let selection = SelectionState::at_start(&content);
        Snapshot { content, selection }
    }

    #[test]
    fn test_push_is_copy_on_write() {
        let base = History::new(10);
        let pushed = base.push(snapshot("a"));
        assert_eq!(base.undo_depth(), 0);
        assert_eq!(pushed.undo_depth(), 1);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let history = History::new(10).push(snapshot("a"));
        let (history, restored) = history.undo(snapshot("b")).unwrap();
        assert_eq!(restored, snapshot("a"));
        assert!(history.can_redo());
        let (history, restored) = history.redo(snapshot("a")).unwrap();
        assert_eq!(restored, snapshot("b"));
        assert!(!history.can_redo());
        assert!(history.undo(snapshot("b")).is_some());
    }

    #[test]
    fn test_limit_drops_oldest_and_clean_point() {
        let mut history = History::new(2);
        assert!(history.is_clean());
        for text in ["a", "b", "c"] {
            history = history.push(snapshot(text));
        }
        assert_eq!(history.undo_depth(), 2);
        assert!(!history.is_clean());
        let (_, restored) = history.undo(snapshot("d")).unwrap();
        assert_eq!(restored, snapshot("c"));
    }

    #[test]
    fn test_clean_point_lost_when_redo_cleared() {
        let history = History::new(10).push(snapshot("a")).mark_clean();
        let (history, _) = history.undo(snapshot("b")).unwrap();
        assert!(!history.is_clean());
        let history = history.push(snapshot("a"));
        assert!(!history.is_clean());
        assert_eq!(history.undo_depth(), 1);
    }
}
