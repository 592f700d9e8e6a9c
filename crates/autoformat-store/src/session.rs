//! Saving and restoring an editor session.

use autoformat_core::{AutoformatConfig, EditorState};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::raw::{from_json, to_json};
use crate::storage::Storage;

/// Storage key the editor content is saved under.
pub const CONTENT_KEY: &str = "editorContent";

/// Save the current content under [`CONTENT_KEY`].
///
/// Returns `state` marked clean, so the host can track unsaved changes.
pub fn save_editor_state(
    storage: &mut impl Storage,
    state: &EditorState,
) -> Result<EditorState, StoreError> {
    save_editor_state_as(storage, CONTENT_KEY, state)
}

/// Save the current content under `key`.
pub fn save_editor_state_as(
    storage: &mut impl Storage,
    key: &str,
    state: &EditorState,
) -> Result<EditorState, StoreError> {
    let json = to_json(state.current_content())?;
    storage.set_item(key, &json)?;
    info!(
        key,
        blocks = state.current_content().block_count(),
        "saved editor content"
    );
    Ok(state.mark_clean())
}

/// Restore the content saved under [`CONTENT_KEY`], or an empty editor if nothing was saved.
pub fn load_editor_state(
    storage: &impl Storage,
    config: &AutoformatConfig,
) -> Result<EditorState, StoreError> {
    load_editor_state_from(storage, CONTENT_KEY, config)
}

/// Restore the content saved under `key`, or an empty editor if nothing was saved.
///
/// The restored state has an empty history, the caret at the start of the document and honors
/// `config.history_limit`. A stored value that does not parse as a document fails with
/// [`StoreError::Corrupt`].
pub fn load_editor_state_from(
    storage: &impl Storage,
    key: &str,
    config: &AutoformatConfig,
) -> Result<EditorState, StoreError> {
    let content = match storage.get_item(key)? {
        Some(json) => from_json(&json).inspect_err(|err| {
            warn!(key, %err, "discarding corrupt saved state");
        })?,
        None => {
            info!(key, "no saved editor content");
            return Ok(EditorState::create_empty().with_history_limit(config.history_limit));
        }
    };
    info!(key, blocks = content.block_count(), "loaded editor content");
    Ok(EditorState::create_with_content(content).with_history_limit(config.history_limit))
}

/// Delete the content saved under [`CONTENT_KEY`].
pub fn clear_editor_state(storage: &mut impl Storage) -> Result<(), StoreError> {
    storage.remove_item(CONTENT_KEY)
}
