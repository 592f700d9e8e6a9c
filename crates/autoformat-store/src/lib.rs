#![warn(missing_docs)]
//! Autoformat Store - persistence for autoformat editor sessions
//!
//! # Overview
//!
//! Converts [`autoformat_core::ContentState`] to and from the raw JSON layout used by
//! rich-text editors, and saves it through a small key/value [`Storage`] abstraction under
//! the fixed key [`CONTENT_KEY`].
//!
//! # Quick Start
//!
//! ```rust
//! use autoformat_core::{AutoformatConfig, EditorState};
//! use autoformat_store::{MemoryStorage, load_editor_state, save_editor_state};
//!
//! let mut storage = MemoryStorage::new();
//! let state = EditorState::create_empty().insert_text("hello");
//! let saved = save_editor_state(&mut storage, &state).unwrap();
//! assert!(saved.is_clean());
//!
//! let restored = load_editor_state(&storage, &AutoformatConfig::default()).unwrap();
//! assert_eq!(restored.current_content(), state.current_content());
//! ```
//!
//! # Module Description
//!
//! - [`raw`] - Raw document representation and JSON conversion
//! - [`storage`] - Storage trait with memory and file backends
//! - [`session`] - Save/load of editor state
//! - [`config`] - Store configuration

pub mod config;
pub mod error;
pub mod raw;
pub mod session;
pub mod storage;

pub use config::StoreConfig;
pub use error::StoreError;
pub use raw::{
    RawBlock, RawDocument, RawInlineStyleRange, convert_from_raw, convert_to_raw, from_json,
    to_json,
};
pub use session::{
    CONTENT_KEY, clear_editor_state, load_editor_state, load_editor_state_from,
    save_editor_state, save_editor_state_as,
};
pub use storage::{FileStorage, MemoryStorage, Storage};
