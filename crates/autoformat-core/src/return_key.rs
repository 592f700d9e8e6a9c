//! Enter handling for locked block types.

use tracing::debug;

use crate::commands::HandleValue;
use crate::editor::EditorState;
use crate::history::ChangeType;
use crate::keys::{KeyCode, KeyEvent};
use crate::transitions::{BlockEvent, is_locked, transition};

/// Split the current locked block at the selection and reset the new block's type.
///
/// Returns `None` when the current block's type is not locked. The original block keeps its
/// type; the block after the split point takes the type given by the
/// [`ParagraphBreak`](BlockEvent::ParagraphBreak) transition and receives the caret.
pub fn split_locked_block(state: &EditorState) -> Option<EditorState> {
    let block = state.current_block()?;
    if !is_locked(block.block_type()) {
        return None;
    }
    let target = transition(block.block_type(), BlockEvent::ParagraphBreak)?;

    let (content, caret) = state
        .current_content()
        .split_block(state.selection())
        .ok()?;
    let content = content.set_block_type(caret.start_key(), target).ok()?;
    Some(state.commit(content, caret, ChangeType::ChangeBlockType))
}

/// Return handler hook, evaluated on every Enter key press.
pub fn handle_return(
    state: &EditorState,
    event: &KeyEvent,
    set_state: impl FnOnce(EditorState),
) -> HandleValue {
    if event.code != KeyCode::Enter {
        return HandleValue::NotHandled;
    }
    match split_locked_block(state) {
        Some(next) => {
            debug!(
                block = %state.selection().start_key(),
                "paragraph break reset the new block type"
            );
            set_state(next);
            HandleValue::Handled
        }
        None => HandleValue::NotHandled,
    }
}
