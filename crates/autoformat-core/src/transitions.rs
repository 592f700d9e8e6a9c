//! Block-type state machine.
//!
//! ```text
//! unstyled   --HeadingShortcut-->   header-one
//! unstyled   --CodeFenceShortcut--> code-block
//! header-one --ParagraphBreak-->    unstyled   (new block only)
//! code-block --ParagraphBreak-->    unstyled   (new block only)
//! ```
//!
//! Any `(type, event)` pair missing from [`TRANSITIONS`] has no defined outcome; transformers
//! that consult it decline instead of guessing.

use crate::document::BlockType;

/// Events that can move a block from one type to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockEvent {
    /// `#` followed by space.
    HeadingShortcut,
    /// ```` ``` ```` followed by space.
    CodeFenceShortcut,
    /// Enter; applies to the block created after the split point.
    ParagraphBreak,
}

/// The complete transition table, `(from, event, to)`.
pub const TRANSITIONS: &[(BlockType, BlockEvent, BlockType)] = &[
    (
        BlockType::Unstyled,
        BlockEvent::HeadingShortcut,
        BlockType::HeaderOne,
    ),
    (
        BlockType::Unstyled,
        BlockEvent::CodeFenceShortcut,
        BlockType::CodeBlock,
    ),
    (
        BlockType::HeaderOne,
        BlockEvent::ParagraphBreak,
        BlockType::Unstyled,
    ),
    (
        BlockType::CodeBlock,
        BlockEvent::ParagraphBreak,
        BlockType::Unstyled,
    ),
];

/// The type a block of type `from` takes after `event`, if the transition is defined.
pub fn transition(from: &BlockType, event: BlockEvent) -> Option<BlockType> {
    TRANSITIONS
        .iter()
        .find(|(source, on, _)| source == from && *on == event)
        .map(|(_, _, target)| target.clone())
}

/// Locked block types: Enter inside them never carries the type into the next block.
pub fn is_locked(block_type: &BlockType) -> bool {
    transition(block_type, BlockEvent::ParagraphBreak).is_some()
}
