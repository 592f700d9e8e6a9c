#![warn(missing_docs)]
//! Autoformat Core - markdown-style shortcuts for a headless rich-text editor
//!
//! # Overview
//!
//! `autoformat-core` turns typed token sequences into formatting. When the user types `#`,
//! `*`, `**`, `***` or ```` ``` ```` at the start of a block and presses space, the engine
//! removes the token and applies the matching structural or inline format. Pressing Enter in a
//! heading or code block starts a fresh `unstyled` block.
//!
//! It does not render anything and it does not own the editing session: the host feeds key
//! events and the current [`EditorState`] into the hooks and commits whatever state they hand
//! back.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  ShortcutEngine (hooks + configuration)     │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Trigger Detector │ Dispatcher │ Return Key │  ← Classification & routing
//! ├─────────────────────────────────────────────┤
//! │  Block / Inline Transformers                │  ← Pure state → state
//! ├─────────────────────────────────────────────┤
//! │  EditorState (selection + snapshot history) │  ← Commit & undo
//! ├─────────────────────────────────────────────┤
//! │  ContentState / Block / StyleRanges (Rope)  │  ← Immutable document
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use autoformat_core::{EditorState, HandleValue, InlineStyle, KeyEvent, ShortcutEngine};
//!
//! let engine = ShortcutEngine::default();
//! let mut state = EditorState::create_empty();
//!
//! for ch in "* note".chars() {
//!     let (verdict, next) = engine.process_key(&state, &KeyEvent::from_char(ch));
//!     state = match verdict {
//!         HandleValue::Handled => next,
//!         HandleValue::NotHandled => state.insert_text(&ch.to_string()),
//!     };
//! }
//!
//! let block = state.current_block().unwrap();
//! assert_eq!(block.text(), "note");
//! assert!(block.styles().covers(&InlineStyle::Bold, 0, 4));
//! ```
//!
//! # Module Description
//!
//! - [`document`] - Immutable blocks and documents
//! - [`selection`] - Anchor/focus selections
//! - [`style`] - Inline styles and normalized style ranges
//! - [`editor`] - Editor state and snapshot history
//! - [`trigger`] - Trigger detector
//! - [`commands`] - Command dispatcher
//! - [`transform`] - Block and inline transformers
//! - [`return_key`] - Enter handling for locked block types
//! - [`transitions`] - Block-type transition table
//! - [`style_map`] - Style declarations for the rendering layer
//! - [`config`] - Engine configuration

pub mod commands;
pub mod config;
pub mod document;
pub mod editor;
mod engine;
pub mod error;
mod history;
pub mod keys;
pub mod return_key;
pub mod selection;
pub mod style;
pub mod style_map;
pub mod transform;
pub mod transitions;
pub mod trigger;

pub use commands::{HandleValue, apply_command, handle_key_command, handle_key_command_name};
pub use config::{AutoformatConfig, DEFAULT_HISTORY_LIMIT, DelimiterSearch};
pub use document::{Block, BlockKey, BlockType, ContentState};
pub use editor::EditorState;
pub use engine::ShortcutEngine;
pub use error::{DocumentError, UnknownCommand};
pub use history::ChangeType;
pub use keys::{KeyCode, KeyEvent, Modifiers};
pub use return_key::{handle_return, split_locked_block};
pub use selection::{SelectionPoint, SelectionState};
pub use style::{InlineStyle, StyleRange, StyleRanges};
pub use style_map::{Rgba, StyleDeclaration, StyleMap, block_style_class};
pub use transform::{asterisk_to_style, find_delimiter_run, hashtag_to_heading, insert_code_block};
pub use transitions::{BlockEvent, TRANSITIONS, is_locked, transition};
pub use trigger::{KeyBinding, ShortcutCommand, TRIGGER_RULES, TriggerRule, key_binding};
