//! Document and command errors.

use thiserror::Error;

use crate::document::BlockKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced when constructing or validating documents and selections.
///
/// Transformers never return these: a shortcut that cannot apply reports
/// [`HandleValue::NotHandled`](crate::HandleValue::NotHandled) instead.
pub enum DocumentError {
    #[error("unknown block key '{0}'")]
    /// A selection or operation referenced a block that is not in the document.
    UnknownBlock(BlockKey),

    #[error("offset {offset} is out of bounds for block '{key}' (length {len})")]
    /// An offset lies outside `0..=len(block.text)`.
    OffsetOutOfBounds {
        /// The addressed block.
        key: BlockKey,
        /// The rejected character offset.
        offset: usize,
        /// The block's length in characters.
        len: usize,
    },

    #[error("invalid style range {start}..{end} for block of length {len}")]
    /// A style range violated `start < end <= len`.
    InvalidStyleRange {
        /// Inclusive start offset.
        start: usize,
        /// Exclusive end offset.
        end: usize,
        /// The block's length in characters.
        len: usize,
    },

    #[error("duplicate block key '{0}'")]
    /// Two blocks in one document share a key.
    DuplicateBlockKey(BlockKey),

    #[error("a document must contain at least one block")]
    /// A document was built from an empty block list.
    EmptyDocument,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shortcut command '{0}'")]
/// A host supplied a command name that is not a known shortcut.
pub struct UnknownCommand(pub String);
