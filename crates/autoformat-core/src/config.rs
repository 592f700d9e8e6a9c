//! Engine configuration.

use std::env;

use serde::Deserialize;

/// Default number of snapshots kept on the undo stack.
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// How the inline style transformer locates the delimiter run it strips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DelimiterSearch {
    /// The first occurrence of the run anywhere in the block, regardless of the caret.
    ///
    /// An earlier run in the same block is consumed instead of the one just typed.
    #[default]
    FirstOccurrence,
    /// Only a run ending exactly at the selection's start offset.
    BeforeCaret,
}

impl DelimiterSearch {
    /// Parse the kebab-case policy name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "first-occurrence" => Some(Self::FirstOccurrence),
            "before-caret" => Some(Self::BeforeCaret),
            _ => None,
        }
    }
}

/// Runtime configuration for [`ShortcutEngine`](crate::ShortcutEngine).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AutoformatConfig {
    /// Delimiter search policy for the inline style shortcuts.
    pub delimiter_search: DelimiterSearch,
    /// Maximum undo depth applied to editor states the engine creates.
    pub history_limit: usize,
}

impl Default for AutoformatConfig {
    fn default() -> Self {
        Self {
            delimiter_search: DelimiterSearch::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl AutoformatConfig {
    /// Load configuration from environment variables.
    ///
    /// - `AUTOFORMAT_DELIMITER_SEARCH`: `first-occurrence` (default) or `before-caret`
    /// - `AUTOFORMAT_HISTORY_LIMIT`: undo depth (default 1000)
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            delimiter_search: env::var("AUTOFORMAT_DELIMITER_SEARCH")
                .ok()
                .and_then(|v| DelimiterSearch::from_name(&v))
                .unwrap_or(defaults.delimiter_search),
            history_limit: env::var("AUTOFORMAT_HISTORY_LIMIT")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.history_limit),
        }
    }
}
