//! Immutable document model.
//!
//! A [`ContentState`] is an ordered list of [`Block`]s. Every operation returns a new
//! `ContentState`; unchanged blocks are shared between the old and the new value through `Arc`,
//! and block text lives in a [`Rope`], so cloning a document or a block is cheap.
//!
//! All offsets are character offsets (Unicode scalar values) within one block.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use ropey::Rope;

use crate::error::DocumentError;
use crate::selection::{SelectionPoint, SelectionState};
use crate::style::{InlineStyle, StyleRange, StyleRanges};

/// Opaque, stable block identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockKey(Arc<str>);

impl BlockKey {
    /// Create a key from any string.
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Block type. Types other than the three the engine knows are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// `unstyled`
    #[default]
    Unstyled,
    /// `header-one`
    HeaderOne,
    /// `code-block`
    CodeBlock,
    /// Any other block type name (`blockquote`, `unordered-list-item`, ...).
    Other(String),
}

impl BlockType {
    /// The raw type name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unstyled => "unstyled",
            Self::HeaderOne => "header-one",
            Self::CodeBlock => "code-block",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for BlockType {
    fn from(name: &str) -> Self {
        match name {
            "unstyled" => Self::Unstyled,
            "header-one" => Self::HeaderOne,
            "code-block" => Self::CodeBlock,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One paragraph-like unit of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    key: BlockKey,
    block_type: BlockType,
    text: Rope,
    styles: StyleRanges,
    depth: u8,
}

impl Block {
    /// Create an unstyled-text block of the given type.
    pub fn new(key: impl Into<BlockKey>, block_type: BlockType, text: &str) -> Self {
        Self {
            key: key.into(),
            block_type,
            text: Rope::from_str(text),
            styles: StyleRanges::new(),
            depth: 0,
        }
    }

    /// Attach style ranges, validating them against the block's length.
    pub fn with_styles(
        mut self,
        ranges: impl IntoIterator<Item = StyleRange>,
    ) -> Result<Self, DocumentError> {
        let len = self.len();
        let ranges: Vec<StyleRange> = ranges.into_iter().collect();
        if let Some(bad) = ranges.iter().find(|r| r.start >= r.end || r.end > len) {
            return Err(DocumentError::InvalidStyleRange {
                start: bad.start,
                end: bad.end,
                len,
            });
        }
        self.styles = StyleRanges::from_ranges(ranges);
        Ok(self)
    }

    /// Set the nesting depth.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Block key.
    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    /// Block type.
    pub fn block_type(&self) -> &BlockType {
        &self.block_type
    }

    /// Nesting depth.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Block text as an owned string.
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.len_chars()
    }

    /// Returns `true` if the block has no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the block text begins with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        let n = prefix.chars().count();
        n <= self.len() && self.text.slice(..n).chars().eq(prefix.chars())
    }

    /// Inline style ranges.
    pub fn styles(&self) -> &StyleRanges {
        &self.styles
    }

    /// Styles applied to the character at `offset`.
    pub fn inline_style_at(&self, offset: usize) -> BTreeSet<InlineStyle> {
        self.styles.styles_at(offset)
    }

    fn check_offset(&self, offset: usize) -> Result<(), DocumentError> {
        if offset > self.len() {
            return Err(DocumentError::OffsetOutOfBounds {
                key: self.key.clone(),
                offset,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn remove_text(&self, start: usize, end: usize) -> Result<Self, DocumentError> {
        self.check_offset(end)?;
        if start > end {
            return Err(DocumentError::OffsetOutOfBounds {
                key: self.key.clone(),
                offset: start,
                len: self.len(),
            });
        }
        let mut text = self.text.clone();
        text.remove(start..end);
        Ok(Self {
            text,
            styles: self.styles.remove_text(start, end),
            ..self.clone()
        })
    }

    fn insert_text(
        &self,
        at: usize,
        inserted: &str,
        styles: &BTreeSet<InlineStyle>,
    ) -> Result<Self, DocumentError> {
        self.check_offset(at)?;
        let mut text = self.text.clone();
        text.insert(at, inserted);
        Ok(Self {
            text,
            styles: self
                .styles
                .insert_text(at, inserted.chars().count(), styles),
            ..self.clone()
        })
    }

    fn split_at(&self, at: usize, new_key: BlockKey) -> Result<(Self, Self), DocumentError> {
        self.check_offset(at)?;
        let mut head = self.text.clone();
        let tail = head.split_off(at);
        let (head_styles, tail_styles) = self.styles.split_at(at);
        let before = Self {
            text: head,
            styles: head_styles,
            ..self.clone()
        };
        let after = Self {
            key: new_key,
            text: tail,
            styles: tail_styles,
            ..self.clone()
        };
        Ok((before, after))
    }
}

/// An immutable document snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentState {
    blocks: Arc<Vec<Arc<Block>>>,
}

impl ContentState {
    /// Build a document from blocks in reading order.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, DocumentError> {
        if blocks.is_empty() {
            return Err(DocumentError::EmptyDocument);
        }
        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            if !seen.insert(block.key.clone()) {
                return Err(DocumentError::DuplicateBlockKey(block.key.clone()));
            }
        }
        Ok(Self {
            blocks: Arc::new(blocks.into_iter().map(Arc::new).collect()),
        })
    }

    /// A document holding a single empty `unstyled` block.
    pub fn empty() -> Self {
        Self {
            blocks: Arc::new(vec![Arc::new(Block::new(
                key_for_counter(0),
                BlockType::Unstyled,
                "",
            ))]),
        }
    }

    /// One `unstyled` block per line of `text`.
    pub fn from_text(text: &str) -> Self {
        let blocks = text
            .split('\n')
            .enumerate()
            .map(|(i, line)| Arc::new(Block::new(key_for_counter(i), BlockType::Unstyled, line)))
            .collect();
        Self {
            blocks: Arc::new(blocks),
        }
    }

    /// Blocks in reading order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().map(|b| b.as_ref())
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// First block.
    pub fn first_block(&self) -> &Block {
        // A ContentState is never empty.
        &self.blocks[0]
    }

    /// Last block.
    pub fn last_block(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    /// Look up a block by key.
    pub fn block_for_key(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.key == key).map(|b| b.as_ref())
    }

    /// Index of the block with `key` in reading order.
    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| &b.key == key)
    }

    /// Returns `true` if both documents hold the very same block allocation for `key`.
    pub fn shares_block(&self, other: &ContentState, key: &BlockKey) -> bool {
        match (self.arc_for_key(key), other.arc_for_key(key)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Plain text of the whole document, blocks joined by `'\n'`.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Generate a key that no block in this document uses.
    ///
    /// Deterministic: the same document always yields the same key.
    pub fn generate_key(&self) -> BlockKey {
        let mut counter = self.blocks.len();
        loop {
            let key = key_for_counter(counter);
            if self.block_for_key(&key).is_none() {
                return key;
            }
            counter += 1;
        }
    }

    /// Validate that `point` addresses an existing block and a valid offset in it.
    pub fn check_point(&self, point: &SelectionPoint) -> Result<&Block, DocumentError> {
        let block = self
            .block_for_key(&point.key)
            .ok_or_else(|| DocumentError::UnknownBlock(point.key.clone()))?;
        block.check_offset(point.offset)?;
        Ok(block)
    }

    /// Delete `[start, end)` from one block.
    pub fn remove_text(
        &self,
        key: &BlockKey,
        start: usize,
        end: usize,
    ) -> Result<Self, DocumentError> {
        self.update_block(key, |block| block.remove_text(start, end))
    }

    /// Assign a block type.
    pub fn set_block_type(
        &self,
        key: &BlockKey,
        block_type: BlockType,
    ) -> Result<Self, DocumentError> {
        self.update_block(key, |block| {
            Ok(Block {
                block_type: block_type.clone(),
                ..block.clone()
            })
        })
    }

    /// Toggle `style` over `[start, end)` of one block.
    pub fn toggle_inline_style(
        &self,
        key: &BlockKey,
        start: usize,
        end: usize,
        style: &InlineStyle,
    ) -> Result<Self, DocumentError> {
        self.update_block(key, |block| {
            block.check_offset(end)?;
            Ok(Block {
                styles: block.styles.toggle(style, start, end),
                ..block.clone()
            })
        })
    }

    /// Delete the selected range, merging blocks when it spans more than one.
    ///
    /// Returns the new document and a caret at the start of the removed range.
    pub fn remove_range(
        &self,
        selection: &SelectionState,
    ) -> Result<(Self, SelectionState), DocumentError> {
        let mut start = selection.start().clone();
        let mut end = selection.end().clone();
        self.check_point(&start)?;
        self.check_point(&end)?;

        if start.key == end.key {
            let (from, to) = (start.offset.min(end.offset), start.offset.max(end.offset));
            let next = self.remove_text(&start.key, from, to)?;
            return Ok((next, SelectionState::caret(start.key, from)));
        }

        let (mut first, mut last) = match (self.block_index(&start.key), self.block_index(&end.key))
        {
            (Some(first), Some(last)) => (first, last),
            (None, _) => return Err(DocumentError::UnknownBlock(start.key)),
            (_, None) => return Err(DocumentError::UnknownBlock(end.key)),
        };
        if first > last {
            std::mem::swap(&mut first, &mut last);
            std::mem::swap(&mut start, &mut end);
        }
        let caret = SelectionState::caret(start.key.clone(), start.offset);

        let head = &self.blocks[first];
        let tail = &self.blocks[last];
        let mut text: Rope = head.text.slice(..start.offset).into();
        text.append(tail.text.slice(end.offset..).into());
        let (_, tail_styles) = tail.styles.split_at(end.offset);
        let merged = Block {
            text,
            styles: head
                .styles
                .truncate(start.offset)
                .concat(&tail_styles, start.offset),
            ..head.as_ref().clone()
        };

        let mut blocks = Vec::with_capacity(self.blocks.len() - (last - first));
        blocks.extend(self.blocks[..first].iter().cloned());
        blocks.push(Arc::new(merged));
        blocks.extend(self.blocks[last + 1..].iter().cloned());
        Ok((
            Self {
                blocks: Arc::new(blocks),
            },
            caret,
        ))
    }

    /// Insert `text` at the selection (replacing a non-collapsed selection first), styling the
    /// inserted characters with `styles`.
    pub fn insert_text(
        &self,
        selection: &SelectionState,
        text: &str,
        styles: &BTreeSet<InlineStyle>,
    ) -> Result<(Self, SelectionState), DocumentError> {
        let (content, caret) = if selection.is_collapsed() {
            self.check_point(selection.start())?;
            (self.clone(), selection.clone())
        } else {
            self.remove_range(selection)?
        };
        let at = caret.start_offset();
        let key = caret.start_key().clone();
        let next = content.update_block(&key, |block| block.insert_text(at, text, styles))?;
        let after = SelectionState::caret(key, at + text.chars().count());
        Ok((next, after))
    }

    /// Split the block at the selection into two blocks.
    ///
    /// A non-collapsed selection is removed first. The block after the split point gets a
    /// fresh key and inherits the original type and depth; the returned selection is a caret at
    /// its start.
    pub fn split_block(
        &self,
        selection: &SelectionState,
    ) -> Result<(Self, SelectionState), DocumentError> {
        let (content, caret) = if selection.is_collapsed() {
            self.check_point(selection.start())?;
            (self.clone(), selection.clone())
        } else {
            self.remove_range(selection)?
        };
        let key = caret.start_key();
        let index = content
            .block_index(key)
            .ok_or_else(|| DocumentError::UnknownBlock(key.clone()))?;
        let new_key = content.generate_key();
        let (before, after) = content.blocks[index].split_at(caret.start_offset(), new_key.clone())?;

        let mut blocks = Vec::with_capacity(content.blocks.len() + 1);
        blocks.extend(content.blocks[..index].iter().cloned());
        blocks.push(Arc::new(before));
        blocks.push(Arc::new(after));
        blocks.extend(content.blocks[index + 1..].iter().cloned());
        Ok((
            Self {
                blocks: Arc::new(blocks),
            },
            SelectionState::caret(new_key, 0),
        ))
    }

    fn arc_for_key(&self, key: &BlockKey) -> Option<&Arc<Block>> {
        self.blocks.iter().find(|b| &b.key == key)
    }

    fn update_block(
        &self,
        key: &BlockKey,
        f: impl FnOnce(&Block) -> Result<Block, DocumentError>,
    ) -> Result<Self, DocumentError> {
        let index = self
            .block_index(key)
            .ok_or_else(|| DocumentError::UnknownBlock(key.clone()))?;
        let updated = f(&self.blocks[index])?;
        let mut blocks = self.blocks.as_ref().clone();
        blocks[index] = Arc::new(updated);
        Ok(Self {
            blocks: Arc::new(blocks),
        })
    }
}

impl Default for ContentState {
    fn default() -> Self {
        Self::empty()
    }
}

fn key_for_counter(mut n: usize) -> BlockKey {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut digits = Vec::with_capacity(5);
    loop {
        digits.push(DIGITS[n % 36]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    while digits.len() < 5 {
        digits.push(b'0');
    }
    digits.reverse();
    BlockKey::new(String::from_utf8_lossy(&digits))
}
