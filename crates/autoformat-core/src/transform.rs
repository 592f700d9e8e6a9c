//! Block and inline transformers.
//!
//! Each transformer is a pure function from an [`EditorState`] to the next one. It either
//! performs all of its steps and commits exactly one snapshot, or returns `None` and leaves the
//! caller's state untouched.

use tracing::debug;

use crate::config::DelimiterSearch;
use crate::document::BlockKey;
use crate::editor::EditorState;
use crate::history::ChangeType;
use crate::selection::{SelectionPoint, SelectionState};
use crate::style::InlineStyle;
use crate::transitions::{BlockEvent, transition};

/// Token stripped by [`hashtag_to_heading`].
pub const HEADING_TOKEN: &str = "#";
/// Token stripped by [`insert_code_block`].
pub const CODE_FENCE_TOKEN: &str = "```";
/// Character repeated to form inline style delimiters.
pub const DELIMITER_CHAR: char = '*';

/// Strip a leading `#` and turn the block into `header-one`.
pub fn hashtag_to_heading(state: &EditorState) -> Option<EditorState> {
    convert_block(state, HEADING_TOKEN, BlockEvent::HeadingShortcut)
}

/// Strip a leading ```` ``` ```` and turn the block into `code-block`.
pub fn insert_code_block(state: &EditorState) -> Option<EditorState> {
    convert_block(state, CODE_FENCE_TOKEN, BlockEvent::CodeFenceShortcut)
}

fn convert_block(state: &EditorState, token: &str, event: BlockEvent) -> Option<EditorState> {
    let block = state.current_block()?;
    let key = block.key().clone();
    if !block.starts_with(token) {
        debug!(block = %key, token, "block does not start with the shortcut token");
        return None;
    }
    let Some(target) = transition(block.block_type(), event) else {
        debug!(
            block = %key,
            block_type = %block.block_type(),
            ?event,
            "no block-type transition defined"
        );
        return None;
    };

    let content = state
        .current_content()
        .remove_text(&key, 0, token.chars().count())
        .and_then(|content| content.set_block_type(&key, target))
        .ok()?;
    let caret = SelectionState::caret(key, 0);
    Some(state.commit(content, caret, ChangeType::ChangeBlockType))
}

/// Locate a run of `len` delimiter characters in `text`.
///
/// Returns the character offset of the run's first character. `caret` is only consulted by
/// [`DelimiterSearch::BeforeCaret`].
pub fn find_delimiter_run(
    text: &str,
    len: usize,
    caret: usize,
    policy: DelimiterSearch,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let run: String = std::iter::repeat_n(DELIMITER_CHAR, len).collect();
    match policy {
        DelimiterSearch::FirstOccurrence => {
            let byte = text.find(&run)?;
            Some(text[..byte].chars().count())
        }
        DelimiterSearch::BeforeCaret => {
            let start = caret.checked_sub(len)?;
            let mut chars = text.chars().skip(start);
            (0..len)
                .all(|_| chars.next() == Some(DELIMITER_CHAR))
                .then_some(start)
        }
    }
}

/// Strip a run of `delimiter_len` asterisks from the current block and toggle `style` over the
/// whole remaining text.
///
/// The resulting selection spans the entire block. When nothing is left to style, the style is
/// toggled in the editor's inline-style override instead, so it applies to what is typed next.
pub fn asterisk_to_style(
    state: &EditorState,
    style: &InlineStyle,
    delimiter_len: usize,
    policy: DelimiterSearch,
) -> Option<EditorState> {
    let block = state.current_block()?;
    let key = block.key().clone();
    let caret = state.selection().start_offset();
    let Some(index) = find_delimiter_run(&block.text(), delimiter_len, caret, policy) else {
        debug!(block = %key, delimiter_len, ?policy, "no delimiter run found");
        return None;
    };
    let remaining = block.len() - delimiter_len;

    let content = state
        .current_content()
        .remove_text(&key, index, index + delimiter_len)
        .and_then(|content| content.toggle_inline_style(&key, 0, remaining, style))
        .ok()?;
    let whole_block = whole_block_selection(key, remaining);
    let next = state.commit(content, whole_block, ChangeType::ChangeInlineStyle);

    if remaining > 0 {
        return Some(next);
    }
    let mut styles = next.current_inline_style();
    if !styles.remove(style) {
        styles.insert(style.clone());
    }
    Some(next.with_inline_style_override(styles))
}

fn whole_block_selection(key: BlockKey, len: usize) -> SelectionState {
    SelectionState::range(
        SelectionPoint {
            key: key.clone(),
            offset: 0,
        },
        SelectionPoint { key, offset: len },
        false,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, BlockType, ContentState};
    use crate::style::StyleRange;
    use pretty_assertions::assert_eq;

    fn state_at(blocks: Vec<Block>, key: &str, offset: usize) -> EditorState {
        let state = EditorState::create_with_content(ContentState::from_blocks(blocks).unwrap());
        let caret = SelectionState::caret_in(state.current_content(), key, offset).unwrap();
        state.force_selection(caret).unwrap()
    }

    fn unstyled(key: &str, text: &str) -> Block {
        Block::new(key, BlockType::Unstyled, text)
    }

    #[test]
    fn test_find_first_occurrence_ignores_caret() {
        let policy = DelimiterSearch::FirstOccurrence;
        assert_eq!(find_delimiter_run("a*b*", 1, 4, policy), Some(1));
        assert_eq!(find_delimiter_run("a*b**", 2, 5, policy), Some(3));
        assert_eq!(find_delimiter_run("ab", 1, 2, policy), None);
        assert_eq!(find_delimiter_run("é**", 2, 3, policy), Some(1));
    }

    #[test]
    fn test_find_before_caret_requires_run_at_caret() {
        let policy = DelimiterSearch::BeforeCaret;
        assert_eq!(find_delimiter_run("a*b*", 1, 4, policy), Some(3));
        assert_eq!(find_delimiter_run("a*b*", 1, 3, policy), None);
        assert_eq!(find_delimiter_run("**", 2, 1, policy), None);
        assert_eq!(find_delimiter_run("**x", 2, 2, policy), Some(0));
    }

    #[test]
    fn test_heading_keeps_styles_of_remaining_text() {
        let block = Block::new("a", BlockType::Unstyled, "#title")
            .with_styles([StyleRange::new(InlineStyle::Bold, 1, 6)])
            .unwrap();
        let state = state_at(vec![block], "a", 1);
        let next = hashtag_to_heading(&state).unwrap();
        let block = next.current_block().unwrap();
        assert_eq!(block.text(), "title");
        assert_eq!(block.block_type(), &BlockType::HeaderOne);
        assert_eq!(
            block.styles().ranges(),
            &[StyleRange::new(InlineStyle::Bold, 0, 5)]
        );
        assert_eq!(next.last_change_type(), Some(ChangeType::ChangeBlockType));
        assert_eq!(next.undo_depth(), state.undo_depth() + 1);
    }

    #[test]
    fn test_heading_declines_without_token_or_transition() {
        let state = state_at(vec![unstyled("a", "title")], "a", 1);
        assert!(hashtag_to_heading(&state).is_none());

        let heading = Block::new("a", BlockType::HeaderOne, "#again");
        let state = state_at(vec![heading], "a", 1);
        assert!(hashtag_to_heading(&state).is_none());
    }

    #[test]
    fn test_code_block_strips_fence() {
        let state = state_at(vec![unstyled("a", "```fn main")], "a", 3);
        let next = insert_code_block(&state).unwrap();
        let block = next.current_block().unwrap();
        assert_eq!(block.text(), "fn main");
        assert_eq!(block.block_type(), &BlockType::CodeBlock);
        assert_eq!(next.selection(), &SelectionState::caret("a".into(), 0));
    }

    #[test]
    fn test_unanchored_search_consumes_earlier_run() {
        // The caret sits after the second asterisk, yet the first one is removed.
        let state = state_at(vec![unstyled("a", "x*y*")], "a", 4);
        let next = asterisk_to_style(
            &state,
            &InlineStyle::Bold,
            1,
            DelimiterSearch::FirstOccurrence,
        )
        .unwrap();
        assert_eq!(next.current_block().unwrap().text(), "xy*");

        let next = asterisk_to_style(&state, &InlineStyle::Bold, 1, DelimiterSearch::BeforeCaret)
            .unwrap();
        assert_eq!(next.current_block().unwrap().text(), "x*y");
    }

    #[test]
    fn test_inline_toggle_removes_existing_style() {
        let block = Block::new("a", BlockType::Unstyled, "*hello")
            .with_styles([StyleRange::new(InlineStyle::Bold, 0, 6)])
            .unwrap();
        let state = state_at(vec![block], "a", 1);
        let next = asterisk_to_style(
            &state,
            &InlineStyle::Bold,
            1,
            DelimiterSearch::FirstOccurrence,
        )
        .unwrap();
        let block = next.current_block().unwrap();
        assert_eq!(block.text(), "hello");
        assert!(block.styles().is_empty());
    }

    #[test]
    fn test_inline_on_empty_remainder_sets_override() {
        let state = state_at(vec![unstyled("a", "**")], "a", 2);
        let next = asterisk_to_style(
            &state,
            &InlineStyle::ColorRed,
            2,
            DelimiterSearch::FirstOccurrence,
        )
        .unwrap();
        assert_eq!(next.current_block().unwrap().text(), "");
        assert!(next.selection().is_collapsed());
        assert!(next
            .inline_style_override()
            .is_some_and(|styles| styles.contains(&InlineStyle::ColorRed)));

        let typed = next.insert_text("red");
        assert_eq!(
            typed.current_block().unwrap().styles().ranges(),
            &[StyleRange::new(InlineStyle::ColorRed, 0, 3)]
        );
    }
}
