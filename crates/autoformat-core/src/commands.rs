//! Command dispatch.
//!
//! Routes a [`ShortcutCommand`] to its transformer. The match is exhaustive, so adding a
//! command without a transformer does not compile.
//!
//! # Example
//!
//! ```rust
//! use autoformat_core::{
//!     AutoformatConfig, BlockType, ContentState, EditorState, HandleValue, SelectionState,
//!     ShortcutCommand, handle_key_command,
//! };
//!
//! let content = ContentState::from_text("# ");
//! let key = content.first_block().key().clone();
//! let state = EditorState::create_with_content(content.clone())
//!     .force_selection(SelectionState::caret_in(&content, key, 1).unwrap())
//!     .unwrap();
//!
//! let mut committed = None;
//! let verdict = handle_key_command(
//!     &state,
//!     ShortcutCommand::HashtagToHeading,
//!     &AutoformatConfig::default(),
//!     |next| committed = Some(next),
//! );
//!
//! assert_eq!(verdict, HandleValue::Handled);
//! let next = committed.unwrap();
//! assert_eq!(next.current_block().unwrap().block_type(), &BlockType::HeaderOne);
//! ```

use tracing::debug;

use crate::config::AutoformatConfig;
use crate::editor::EditorState;
use crate::transform::{asterisk_to_style, hashtag_to_heading, insert_code_block};
use crate::trigger::ShortcutCommand;

/// Whether a hook consumed the key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleValue {
    /// An edit was committed; the host must suppress its default behavior.
    Handled,
    /// Nothing changed; the host applies its default behavior.
    NotHandled,
}

impl HandleValue {
    /// The conventional verdict string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Handled => "handled",
            Self::NotHandled => "not-handled",
        }
    }

    /// Returns `true` for [`HandleValue::Handled`].
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// Run the transformer for `command`, returning the committed state or `None` if the
/// transformer declined.
pub fn apply_command(
    state: &EditorState,
    command: ShortcutCommand,
    config: &AutoformatConfig,
) -> Option<EditorState> {
    match command {
        ShortcutCommand::HashtagToHeading => hashtag_to_heading(state),
        ShortcutCommand::AsteriskToBold
        | ShortcutCommand::AsteriskToRed
        | ShortcutCommand::AsteriskToUnderline => {
            let (style, delimiter_len) = command.inline_style()?;
            asterisk_to_style(state, &style, delimiter_len, config.delimiter_search)
        }
        ShortcutCommand::InsertCodeBlock => insert_code_block(state),
    }
}

/// Command handler hook.
///
/// Calls `set_state` exactly once with the new state when the command is handled, and never
/// otherwise.
pub fn handle_key_command(
    state: &EditorState,
    command: ShortcutCommand,
    config: &AutoformatConfig,
    set_state: impl FnOnce(EditorState),
) -> HandleValue {
    match apply_command(state, command, config) {
        Some(next) => {
            debug!(%command, "shortcut applied");
            set_state(next);
            HandleValue::Handled
        }
        None => {
            debug!(%command, "shortcut declined");
            HandleValue::NotHandled
        }
    }
}

/// Command handler hook for hosts that route commands by name.
///
/// Names that are not shortcut commands are not handled.
pub fn handle_key_command_name(
    state: &EditorState,
    name: &str,
    config: &AutoformatConfig,
    set_state: impl FnOnce(EditorState),
) -> HandleValue {
    match name.parse::<ShortcutCommand>() {
        Ok(command) => handle_key_command(state, command, config, set_state),
        Err(err) => {
            debug!(%err, "ignoring command");
            HandleValue::NotHandled
        }
    }
}
