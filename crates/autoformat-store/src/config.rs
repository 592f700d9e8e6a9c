//! Store configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::StoreError;
use crate::session::CONTENT_KEY;
use crate::storage::FileStorage;

/// Where and under which key editor content is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory for [`FileStorage`].
    pub dir: PathBuf,
    /// Storage key for the editor content.
    pub content_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            content_key: CONTENT_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// - `AUTOFORMAT_STORE_DIR`: storage directory, `~/` expanded (default `~/.cache/autoformat`)
    /// - `AUTOFORMAT_CONTENT_KEY`: storage key (default `editorContent`)
    pub fn from_env() -> Self {
        Self {
            dir: env::var("AUTOFORMAT_STORE_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(expand_tilde)
                .unwrap_or_else(default_dir),
            content_key: env::var("AUTOFORMAT_CONTENT_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .unwrap_or_else(|| CONTENT_KEY.to_string()),
        }
    }

    /// Open a [`FileStorage`] rooted at [`dir`](Self::dir).
    pub fn open_storage(&self) -> Result<FileStorage, StoreError> {
        FileStorage::open(&self.dir)
    }
}

fn default_dir() -> PathBuf {
    resolve_home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cache")
        .join("autoformat")
}

fn expand_tilde(path: String) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = resolve_home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

fn resolve_home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(|name| env::var(name).ok())
        .find(|home| !home.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_and_dir() {
        let config = StoreConfig::default();
        assert_eq!(config.content_key, "editorContent");
        assert!(config.dir.ends_with(".cache/autoformat"));
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let config: StoreConfig = serde_json::from_str(r#"{"dir":"/tmp/notes"}"#).unwrap();
        assert_eq!(config.dir, PathBuf::from("/tmp/notes"));
        assert_eq!(config.content_key, CONTENT_KEY);
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/var/data".into()), PathBuf::from("/var/data"));
        assert!(!expand_tilde("~/notes".into()).starts_with("~"));
    }
}
