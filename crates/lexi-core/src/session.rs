//! Session: the process-wide dictionary handle.
//!
//! [`Dictionary`] owns the single database connection, the preference
//! container and the resolved export locations for the lifetime of the
//! process. Every front end (TUI, headless CLI) goes through it, one call at a
//! time on the thread that received the input.

use crate::config::StorageConfig;
use crate::error::Result;
use crate::export::{ExportAction, Locations};
use crate::prefs::PreferenceStore;
use crate::search::{self, SearchResults};
use crate::store::{DictionaryStore, DB_FILE_NAME};
use crate::types::Notification;
use std::path::Path;

#[derive(Debug)]
pub struct Dictionary {
    store: DictionaryStore,
    prefs: PreferenceStore,
    locations: Locations,
}

impl Dictionary {
    /// Open the session described by the `[storage]` config section.
    pub fn open(storage: &StorageConfig) -> Result<Self> {
        Self::open_at(&storage.data_dir(), &storage.external_root())
    }

    /// Open the session rooted at `data_dir`, exporting externally under
    /// `external_root`.
    pub fn open_at(data_dir: &Path, external_root: &Path) -> Result<Self> {
        let store = DictionaryStore::initialize(&data_dir.join("databases").join(DB_FILE_NAME))?;
        let prefs = PreferenceStore::load(PreferenceStore::path_in(data_dir));
        let locations = Locations::new(data_dir, external_root);
        tracing::debug!(
            data_dir = %data_dir.display(),
            external_root = %external_root.display(),
            "dictionary session opened"
        );
        Ok(Self::from_parts(store, prefs, locations))
    }

    pub fn from_parts(store: DictionaryStore, prefs: PreferenceStore, locations: Locations) -> Self {
        Self { store, prefs, locations }
    }

    pub fn store(&self) -> &DictionaryStore {
        &self.store
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    /// The query restored at startup.
    pub fn last_query(&self) -> String {
        self.prefs.get_last_query()
    }

    /// Persist `query`, then evaluate it. See [`search::search`].
    pub fn search(&mut self, query: &str) -> Result<Vec<String>> {
        search::search(&self.store, &mut self.prefs, query)
    }

    /// Persist `query`, then evaluate it, keeping the branch that matched.
    pub fn search_results(&mut self, query: &str) -> Result<SearchResults> {
        self.prefs.set_last_query(query);
        search::lookup(&self.store, query)
    }

    /// Evaluate `query` without recording it.
    pub fn lookup(&self, query: &str) -> Result<SearchResults> {
        search::lookup(&self.store, query)
    }

    /// Run one export action. Failures are logged here and folded into the
    /// returned notification; they never propagate further.
    pub fn run(&self, action: ExportAction) -> Notification {
        let outcome = action.perform(&self.store, &self.locations);
        if let Err(ref e) = outcome {
            tracing::error!(action = %action, kind = %e.kind(), error = %e, "export action failed");
        }
        action.notification(&outcome)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let external = dir.path().join("external");
        std::fs::create_dir_all(&external).unwrap();

        let mut dict = Dictionary::open_at(&data, &external).unwrap();
        assert_eq!(dict.last_query(), "");
        assert_eq!(dict.search("piano").unwrap(), vec!["A musical instrument with a keyboard"]);
        drop(dict);

        let dict = Dictionary::open_at(&data, &external).unwrap();
        assert_eq!(dict.last_query(), "piano");
    }

    #[test]
    fn run_never_propagates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let dict = Dictionary::open_at(&dir.path().join("data"), &dir.path().join("nowhere")).unwrap();

        let note = dict.run(ExportAction::CopyExternal);
        assert!(!note.is_success());
        assert_eq!(note.message, "External storage is not available");

        let note = dict.run(ExportAction::SaveInternal);
        assert!(note.is_success());
    }
}
