//! Test builders: a throwaway on-disk environment and in-memory stores.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use lexi::{Dictionary, DictionaryEntry, DictionaryStore, Locations};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// TestEnv
// ---------------------------------------------------------------------------

/// A temp directory laid out as `<root>/data` (application data) and
/// `<root>/external` (the shared storage root). Removed on drop.
pub struct TestEnv {
    root: TempDir,
}

impl TestEnv {
    /// Both directories exist, so the secondary location is available.
    pub fn new() -> Self {
        let env = Self::without_external();
        std::fs::create_dir_all(env.external_root()).unwrap();
        env
    }

    /// The external root is never created.
    pub fn without_external() -> Self {
        Self { root: tempfile::tempdir().unwrap() }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.path().join("data")
    }

    pub fn external_root(&self) -> PathBuf {
        self.root.path().join("external")
    }

    pub fn config_home(&self) -> PathBuf {
        self.root.path().join("config")
    }

    pub fn locations(&self) -> Locations {
        Locations::new(&self.data_dir(), self.external_root())
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join("databases").join("dictionary.db")
    }

    /// Open a full session on this environment.
    pub fn open(&self) -> Dictionary {
        Dictionary::open_at(&self.data_dir(), &self.external_root()).unwrap()
    }

    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(path).unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// StoreBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for in-memory [`DictionaryStore`] fixtures.
///
/// ```rust
/// let store = StoreBuilder::new().word("apple", "A fruit").build();
/// ```
#[derive(Default)]
pub struct StoreBuilder {
    entries: Vec<DictionaryEntry>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn word(mut self, word: &str, definition: &str) -> Self {
        self.entries.push(DictionaryEntry::new(word, definition));
        self
    }

    pub fn words(mut self, table: &[(&str, &str)]) -> Self {
        self.entries.extend(crate::common::entries(table));
        self
    }

    pub fn build(self) -> DictionaryStore {
        DictionaryStore::open_in_memory(&self.entries).unwrap()
    }

    /// Build the store as a real file at `path`.
    pub fn build_at(self, path: &Path) -> DictionaryStore {
        DictionaryStore::initialize_with_seed(path, &self.entries).unwrap()
    }
}
