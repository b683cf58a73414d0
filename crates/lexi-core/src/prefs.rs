//! Preferences: one named, persisted key/value container.
//!
//! The only value the application keeps is the last query text, under
//! [`KEY_LAST_SEARCH`]. The container is a JSON object on disk; other keys
//! found in the file are carried through untouched.
//!
//! Writes are fire-and-forget: the in-memory value changes immediately and a
//! failed disk write is logged, never returned to the caller.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Name of the container, and the stem of its file.
pub const PREF_NAME: &str = "dictionary_prefs";

/// Key holding the last query text.
pub const KEY_LAST_SEARCH: &str = "last_search";

#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl PreferenceStore {
    /// Path of the container under `data_dir`.
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join("shared_prefs").join(format!("{PREF_NAME}.json"))
    }

    /// Load the container at `path`. A missing file is an empty container; an
    /// unreadable or corrupt one is logged and also treated as empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Map<String, Value>>(&bytes) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "discarding corrupt preference file");
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read preference file");
                Map::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The last persisted query, or `""` when none was ever stored.
    pub fn get_last_query(&self) -> String {
        self.values
            .get(KEY_LAST_SEARCH)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Record `text` as the last query and write the container out.
    pub fn set_last_query(&mut self, text: &str) {
        self.values
            .insert(KEY_LAST_SEARCH.to_string(), Value::String(text.to_string()));
        if let Err(e) = self.flush() {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist last query");
        }
    }

    fn flush(&self) -> crate::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(&self.values)?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
