//! Editor state: the current document snapshot, its selection and its history.
//!
//! # Example
//!
//! ```rust
//! use autoformat_core::{ChangeType, EditorState};
//!
//! let state = EditorState::create_empty().insert_text("hello");
//! assert_eq!(state.current_content().plain_text(), "hello");
//! assert_eq!(state.last_change_type(), Some(ChangeType::InsertCharacters));
//!
//! let undone = state.undo().unwrap();
//! assert_eq!(undone.current_content().plain_text(), "");
//! ```

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::document::{Block, ContentState};
use crate::error::DocumentError;
use crate::history::{ChangeType, History, Snapshot};
use crate::selection::SelectionState;
use crate::style::InlineStyle;

/// An immutable editor state.
///
/// Every method that changes something returns a new `EditorState`; the receiver is left as
/// it was. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct EditorState {
    content: ContentState,
    selection: SelectionState,
    history: History,
    last_change: Option<ChangeType>,
    inline_style_override: Option<BTreeSet<InlineStyle>>,
}

impl EditorState {
    /// An editor holding one empty `unstyled` block, caret at its start.
    pub fn create_empty() -> Self {
        Self::create_with_content(ContentState::empty())
    }

    /// An editor over `content`, caret at the start of the first block, empty history.
    pub fn create_with_content(content: ContentState) -> Self {
        let selection = SelectionState::at_start(&content);
        Self {
            content,
            selection,
            history: History::new(DEFAULT_HISTORY_LIMIT),
            last_change: None,
            inline_style_override: None,
        }
    }

    /// Replace the history depth limit. Oldest entries beyond the limit are discarded.
    pub fn with_history_limit(self, limit: usize) -> Self {
        Self {
            history: self.history.with_limit(limit),
            ..self
        }
    }

    /// The current document.
    pub fn current_content(&self) -> &ContentState {
        &self.content
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The block containing the selection's start point.
    pub fn current_block(&self) -> Option<&Block> {
        self.content.block_for_key(self.selection.start_key())
    }

    /// Label of the change that produced this state, if any.
    pub fn last_change_type(&self) -> Option<ChangeType> {
        self.last_change
    }

    /// Styles to apply to the next inserted characters, overriding the style at the caret.
    pub fn inline_style_override(&self) -> Option<&BTreeSet<InlineStyle>> {
        self.inline_style_override.as_ref()
    }

    /// Styles the next typed character would receive.
    ///
    /// For a caret after the first character this is the style of the character before it;
    /// at offset 0 of a non-empty block it is the style of the first character.
    pub fn current_inline_style(&self) -> BTreeSet<InlineStyle> {
        if let Some(styles) = &self.inline_style_override {
            return styles.clone();
        }
        let Some(block) = self.current_block() else {
            return BTreeSet::new();
        };
        let offset = self.selection.start_offset();
        if offset > 0 {
            block.inline_style_at(offset - 1)
        } else if !block.is_empty() {
            block.inline_style_at(0)
        } else {
            BTreeSet::new()
        }
    }

    /// Move the selection without recording history.
    pub fn force_selection(&self, selection: SelectionState) -> Result<Self, DocumentError> {
        selection.validate(&self.content)?;
        Ok(Self {
            selection,
            inline_style_override: None,
            ..self.clone()
        })
    }

    /// Commit `content` as a new snapshot labelled `change`, with `selection_after` as the new
    /// selection. The current snapshot becomes the undo target.
    pub fn push(
        &self,
        content: ContentState,
        selection_after: SelectionState,
        change: ChangeType,
    ) -> Result<Self, DocumentError> {
        selection_after.validate(&content)?;
        Ok(self.commit(content, selection_after, change))
    }

    /// Restore the previous snapshot.
    pub fn undo(&self) -> Option<Self> {
        let (history, restored) = self.history.undo(self.snapshot())?;
        Some(self.restore(history, restored, ChangeType::Undo))
    }

    /// Re-apply the most recently undone snapshot.
    pub fn redo(&self) -> Option<Self> {
        let (history, restored) = self.history.redo(self.snapshot())?;
        Some(self.restore(history, restored, ChangeType::Redo))
    }

    /// Returns `true` if there is a snapshot to undo to.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns `true` if there is a snapshot to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of snapshots on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Number of snapshots on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Whether the current snapshot is the last saved one.
    pub fn is_clean(&self) -> bool {
        self.history.is_clean()
    }

    /// Mark the current snapshot as saved (call after persisting).
    pub fn mark_clean(&self) -> Self {
        Self {
            history: self.history.mark_clean(),
            ..self.clone()
        }
    }

    /// Default typing behavior: replace the selection with `text`, styled with
    /// [`current_inline_style`](Self::current_inline_style).
    pub fn insert_text(&self, text: &str) -> Self {
        let styles = self.current_inline_style();
        match self.content.insert_text(&self.selection, text, &styles) {
            Ok((content, after)) => self.commit(content, after, ChangeType::InsertCharacters),
            // The selection is valid for the content by construction.
            Err(err) => {
                debug!(%err, "text insertion declined");
                self.clone()
            }
        }
    }

    pub(crate) fn commit(
        &self,
        content: ContentState,
        selection: SelectionState,
        change: ChangeType,
    ) -> Self {
        Self {
            history: self.history.push(self.snapshot()),
            content,
            selection,
            last_change: Some(change),
            inline_style_override: None,
        }
    }

    pub(crate) fn with_inline_style_override(&self, styles: BTreeSet<InlineStyle>) -> Self {
        Self {
            inline_style_override: Some(styles),
            ..self.clone()
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            content: self.content.clone(),
            selection: self.selection.clone(),
        }
    }

    fn restore(&self, history: History, snapshot: Snapshot, change: ChangeType) -> Self {
        Self {
            content: snapshot.content,
            selection: snapshot.selection,
            history,
            last_change: Some(change),
            inline_style_override: None,
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create_empty()
    }
}
