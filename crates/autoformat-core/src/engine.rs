//! The host-facing entry point bundling the three hooks with a configuration.

use tracing::trace;

use crate::commands::{HandleValue, handle_key_command, handle_key_command_name};
use crate::config::AutoformatConfig;
use crate::document::ContentState;
use crate::editor::EditorState;
use crate::keys::{KeyCode, KeyEvent};
use crate::return_key::handle_return;
use crate::trigger::{KeyBinding, ShortcutCommand, key_binding};

/// Shortcut engine.
///
/// Stateless apart from its configuration: every hook takes the current [`EditorState`] and
/// reports the committed successor through a setter.
///
/// # Example
///
/// ```rust
/// use autoformat_core::{BlockType, EditorState, HandleValue, KeyEvent, ShortcutEngine};
///
/// let engine = ShortcutEngine::default();
/// let state = EditorState::create_empty().insert_text("#");
///
/// let (verdict, next) = engine.process_key(&state, &KeyEvent::space());
/// assert_eq!(verdict, HandleValue::Handled);
/// let block = next.current_block().unwrap();
/// assert_eq!(block.text(), "");
/// assert_eq!(block.block_type(), &BlockType::HeaderOne);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShortcutEngine {
    config: AutoformatConfig,
}

impl ShortcutEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: AutoformatConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &AutoformatConfig {
        &self.config
    }

    /// An empty editor state honoring the configured history limit.
    pub fn create_empty(&self) -> EditorState {
        self.create_with_content(ContentState::empty())
    }

    /// An editor state over `content` honoring the configured history limit.
    pub fn create_with_content(&self, content: ContentState) -> EditorState {
        EditorState::create_with_content(content).with_history_limit(self.config.history_limit)
    }

    /// Key classifier hook.
    pub fn key_binding(&self, state: &EditorState, event: &KeyEvent) -> KeyBinding {
        key_binding(state, event)
    }

    /// Command handler hook.
    pub fn handle_key_command(
        &self,
        state: &EditorState,
        command: ShortcutCommand,
        set_state: impl FnOnce(EditorState),
    ) -> HandleValue {
        handle_key_command(state, command, &self.config, set_state)
    }

    /// Command handler hook for hosts that route commands by name.
    pub fn handle_key_command_name(
        &self,
        state: &EditorState,
        name: &str,
        set_state: impl FnOnce(EditorState),
    ) -> HandleValue {
        handle_key_command_name(state, name, &self.config, set_state)
    }

    /// Return handler hook.
    pub fn handle_return(
        &self,
        state: &EditorState,
        event: &KeyEvent,
        set_state: impl FnOnce(EditorState),
    ) -> HandleValue {
        handle_return(state, event, set_state)
    }

    /// Run one key press through the engine: Enter goes to the return handler, everything
    /// else through the classifier and, on a match, the dispatcher.
    pub fn handle_key_down(
        &self,
        state: &EditorState,
        event: &KeyEvent,
        set_state: impl FnOnce(EditorState),
    ) -> HandleValue {
        if event.code == KeyCode::Enter {
            return self.handle_return(state, event, set_state);
        }
        match self.key_binding(state, event) {
            KeyBinding::Command(command) => self.handle_key_command(state, command, set_state),
            KeyBinding::Default => {
                trace!(?event, "default key binding");
                HandleValue::NotHandled
            }
        }
    }

    /// [`handle_key_down`](Self::handle_key_down) returning the resulting state directly; the
    /// input state is returned unchanged when the key is not handled.
    pub fn process_key(&self, state: &EditorState, event: &KeyEvent) -> (HandleValue, EditorState) {
        let mut committed = None;
        let verdict = self.handle_key_down(state, event, |next| committed = Some(next));
        (verdict, committed.unwrap_or_else(|| state.clone()))
    }
}
