//! Raw representation of a document.
//!
//! The JSON layout follows the conventional rich-text raw format:
//!
//! ```json
//! {
//!   "blocks": [
//!     {
//!       "key": "00000",
//!       "text": "note",
//!       "type": "unstyled",
//!       "depth": 0,
//!       "inlineStyleRanges": [{ "offset": 0, "length": 4, "style": "COLOR_RED" }],
//!       "entityRanges": [],
//!       "data": {}
//!     }
//!   ],
//!   "entityMap": {}
//! }
//! ```
//!
//! Offsets and lengths count characters. Entities and block data are not modelled: they are
//! written empty and ignored when reading.

use autoformat_core::{Block, BlockType, ContentState, InlineStyle, StyleRange};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;

/// A whole document in raw form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    /// Blocks in reading order.
    pub blocks: Vec<RawBlock>,
    /// Entity map (always empty on write).
    #[serde(default)]
    pub entity_map: Map<String, Value>,
}

/// One block in raw form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    /// Block key.
    pub key: String,
    /// Block text.
    pub text: String,
    /// Block type name.
    #[serde(rename = "type", default = "default_block_type")]
    pub block_type: String,
    /// Nesting depth.
    #[serde(default)]
    pub depth: u8,
    /// Inline style ranges, one entry per style run.
    #[serde(default)]
    pub inline_style_ranges: Vec<RawInlineStyleRange>,
    /// Entity ranges (always empty on write).
    #[serde(default)]
    pub entity_ranges: Vec<Value>,
    /// Block data (always empty on write).
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// One inline style run in raw form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInlineStyleRange {
    /// Start offset in characters.
    pub offset: usize,
    /// Length in characters.
    pub length: usize,
    /// Style name.
    pub style: String,
}

fn default_block_type() -> String {
    BlockType::Unstyled.as_str().to_string()
}

/// Convert a document into its raw form.
pub fn convert_to_raw(content: &ContentState) -> RawDocument {
    let blocks = content
        .blocks()
        .map(|block| RawBlock {
            key: block.key().to_string(),
            text: block.text(),
            block_type: block.block_type().to_string(),
            depth: block.depth(),
            inline_style_ranges: block
                .styles()
                .ranges()
                .iter()
                .map(|range| RawInlineStyleRange {
                    offset: range.start,
                    length: range.len(),
                    style: range.style.to_string(),
                })
                .collect(),
            entity_ranges: Vec::new(),
            data: Map::new(),
        })
        .collect();
    RawDocument {
        blocks,
        entity_map: Map::new(),
    }
}

/// Rebuild a document from its raw form.
///
/// Fails with [`StoreError::Corrupt`] if the raw document has no blocks, repeats a key, or
/// carries a style range outside its block's text.
pub fn convert_from_raw(raw: &RawDocument) -> Result<ContentState, StoreError> {
    let blocks = raw
        .blocks
        .iter()
        .map(block_from_raw)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ContentState::from_blocks(blocks)?)
}

fn block_from_raw(raw: &RawBlock) -> Result<Block, StoreError> {
    let ranges = raw
        .inline_style_ranges
        .iter()
        .map(|range| {
            let end = range.offset.checked_add(range.length).ok_or_else(|| {
                StoreError::Corrupt(format!("style range overflows in block '{}'", raw.key))
            })?;
            Ok(StyleRange::new(
                InlineStyle::from(range.style.as_str()),
                range.offset,
                end,
            ))
        })
        .collect::<Result<Vec<_>, StoreError>>()?;

    let block = Block::new(raw.key.as_str(), BlockType::from(raw.block_type.as_str()), &raw.text)
        .with_styles(ranges)?
        .with_depth(raw.depth);
    Ok(block)
}

/// Serialize a document to raw JSON.
pub fn to_json(content: &ContentState) -> Result<String, StoreError> {
    Ok(serde_json::to_string(&convert_to_raw(content))?)
}

/// Parse raw JSON into a document.
///
/// Any malformed input, syntactic or structural, is reported as [`StoreError::Corrupt`].
pub fn from_json(json: &str) -> Result<ContentState, StoreError> {
    let raw: RawDocument =
        serde_json::from_str(json).map_err(|err| StoreError::Corrupt(err.to_string()))?;
    convert_from_raw(&raw)
}
