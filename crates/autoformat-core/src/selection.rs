//! Selections expressed as `(block key, character offset)` points.

use crate::document::{BlockKey, ContentState};
use crate::error::DocumentError;

/// One end of a selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionPoint {
    /// The block the point lives in.
    pub key: BlockKey,
    /// Character offset within the block, `0..=len(text)`.
    pub offset: usize,
}

impl SelectionPoint {
    /// Create a new point.
    pub fn new(key: impl Into<BlockKey>, offset: usize) -> Self {
        Self {
            key: key.into(),
            offset,
        }
    }
}

/// Anchor/focus selection. A caret when anchor == focus.
///
/// Selections handed out by [`EditorState`](crate::EditorState) are always valid for the
/// document they belong to. Public constructors that take a document validate against it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionState {
    anchor: SelectionPoint,
    focus: SelectionPoint,
    /// `true` when the focus precedes the anchor in reading order.
    is_backward: bool,
}

impl SelectionState {
    /// Caret at `offset` in `key`, validated against `content`.
    pub fn caret_in(
        content: &ContentState,
        key: impl Into<BlockKey>,
        offset: usize,
    ) -> Result<Self, DocumentError> {
        let point = SelectionPoint::new(key, offset);
        content.check_point(&point)?;
        Ok(Self {
            anchor: point.clone(),
            focus: point,
            is_backward: false,
        })
    }

    /// Selection from `anchor` to `focus`, validated against `content`.
    pub fn range_in(
        content: &ContentState,
        anchor: SelectionPoint,
        focus: SelectionPoint,
    ) -> Result<Self, DocumentError> {
        content.check_point(&anchor)?;
        content.check_point(&focus)?;
        let anchor_index = content
            .block_index(&anchor.key)
            .ok_or_else(|| DocumentError::UnknownBlock(anchor.key.clone()))?;
        let focus_index = content
            .block_index(&focus.key)
            .ok_or_else(|| DocumentError::UnknownBlock(focus.key.clone()))?;
        let is_backward = (focus_index, focus.offset) < (anchor_index, anchor.offset);
        Ok(Self {
            anchor,
            focus,
            is_backward,
        })
    }

    /// Caret at the start of the document's first block.
    pub fn at_start(content: &ContentState) -> Self {
        Self::caret(content.first_block().key().clone(), 0)
    }

    /// Caret without validation, for points known to be in bounds.
    pub(crate) fn caret(key: BlockKey, offset: usize) -> Self {
        let point = SelectionPoint { key, offset };
        Self {
            anchor: point.clone(),
            focus: point,
            is_backward: false,
        }
    }

    /// Forward or backward range without validation.
    pub(crate) fn range(anchor: SelectionPoint, focus: SelectionPoint, is_backward: bool) -> Self {
        Self {
            anchor,
            focus,
            is_backward,
        }
    }

    /// Check that both ends address existing blocks and in-bounds offsets.
    pub fn validate(&self, content: &ContentState) -> Result<(), DocumentError> {
        content.check_point(&self.anchor)?;
        content.check_point(&self.focus)?;
        Ok(())
    }

    /// The fixed end.
    pub fn anchor(&self) -> &SelectionPoint {
        &self.anchor
    }

    /// The moving end.
    pub fn focus(&self) -> &SelectionPoint {
        &self.focus
    }

    /// Returns `true` when the focus precedes the anchor.
    pub fn is_backward(&self) -> bool {
        self.is_backward
    }

    /// Returns `true` for a caret.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The end that comes first in reading order.
    pub fn start(&self) -> &SelectionPoint {
        if self.is_backward {
            &self.focus
        } else {
            &self.anchor
        }
    }

    /// The end that comes last in reading order.
    pub fn end(&self) -> &SelectionPoint {
        if self.is_backward {
            &self.anchor
        } else {
            &self.focus
        }
    }

    /// Key of the start point.
    pub fn start_key(&self) -> &BlockKey {
        &self.start().key
    }

    /// Offset of the start point.
    pub fn start_offset(&self) -> usize {
        self.start().offset
    }

    /// Offset of the end point.
    pub fn end_offset(&self) -> usize {
        self.end().offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, BlockType};

    fn two_blocks() -> ContentState {
        ContentState::from_blocks(vec![
            Block::new("a", BlockType::Unstyled, "hello"),
            Block::new("b", BlockType::Unstyled, "world"),
        ])
        .unwrap()
    }

    #[test]
    fn test_caret_rejects_out_of_bounds_offset() {
        let content = two_blocks();
        assert!(SelectionState::caret_in(&content, "a", 5).is_ok());
        assert_eq!(
            SelectionState::caret_in(&content, "a", 6),
            Err(DocumentError::OffsetOutOfBounds {
                key: "a".into(),
                offset: 6,
                len: 5
            })
        );
        assert_eq!(
            SelectionState::caret_in(&content, "zz", 0),
            Err(DocumentError::UnknownBlock("zz".into()))
        );
    }

    #[test]
    fn test_backward_range_orders_start_and_end() {
        let content = two_blocks();
        let selection = SelectionState::range_in(
            &content,
            SelectionPoint::new("b", 2),
            SelectionPoint::new("a", 1),
        )
        .unwrap();
        assert!(selection.is_backward());
        assert_eq!(selection.start(), &SelectionPoint::new("a", 1));
        assert_eq!(selection.end(), &SelectionPoint::new("b", 2));
        assert!(!selection.is_collapsed());
    }

    #[test]
    fn test_same_block_backward_range() {
        let content = two_blocks();
        let selection = SelectionState::range_in(
            &content,
            SelectionPoint::new("a", 4),
            SelectionPoint::new("a", 1),
        )
        .unwrap();
        assert_eq!(selection.start_offset(), 1);
        assert_eq!(selection.end_offset(), 4);
    }
}
