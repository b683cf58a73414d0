//! Store: the `dictionary(word, definition)` table in an embedded SQLite file.
//!
//! [`DictionaryStore::initialize`] is idempotent: the first call on a path
//! creates the table and inserts the seed set, later calls just open it. Rows
//! are never updated or deleted afterwards, so `rowid` order is the store's
//! natural iteration order.

use crate::error::{Error, Result};
use crate::types::DictionaryEntry;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Schema version recorded in SQLite's `user_version`.
pub const SCHEMA_VERSION: i32 = 1;

/// File name of the database inside `<data_dir>/databases/`.
pub const DB_FILE_NAME: &str = "dictionary.db";

/// Entries inserted the first time the store is created.
pub const SEED: &[(&str, &str)] = &[
    ("apple", "A round fruit with red or green skin and crisp flesh"),
    ("banana", "A long curved fruit with a yellow skin"),
    ("cat", "A small domesticated carnivorous mammal"),
    ("dog", "A domesticated carnivorous mammal"),
    ("elephant", "A large mammal with a long trunk and tusks"),
    ("flower", "The reproductive structure of a plant"),
    ("guitar", "A stringed musical instrument"),
    ("hamburger", "A sandwich consisting of a cooked patty of ground meat"),
    ("island", "A piece of land surrounded by water"),
    ("jungle", "A dense forest in a tropical region"),
    ("koala", "A small herbivorous marsupial native to Australia"),
    ("lion", "A large carnivorous feline"),
    ("mountain", "A large natural elevation of the earth"),
    ("night", "The period of darkness between sunset and sunrise"),
    ("ocean", "A vast body of saltwater that covers most of the Earth"),
    ("piano", "A musical instrument with a keyboard"),
    ("quartz", "A hard mineral consisting of silicon dioxide"),
    ("rainbow", "A meteorological phenomenon that is caused by reflection"),
    ("sun", "The star that is the central body of the solar system"),
    ("tree", "A woody perennial plant"),
];

/// The built-in seed set as owned entries.
pub fn seed_entries() -> Vec<DictionaryEntry> {
    SEED.iter()
        .map(|(word, definition)| DictionaryEntry::new(*word, *definition))
        .collect()
}

/// Handle to an opened dictionary database.
///
/// Holds the single connection for the session; it is closed when the store
/// is dropped.
pub struct DictionaryStore {
    conn: Connection,
}

impl std::fmt::Debug for DictionaryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl DictionaryStore {
    /// Open (creating if needed) the database at `path`, seeded with [`SEED`].
    pub fn initialize(path: &Path) -> Result<Self> {
        Self::initialize_with_seed(path, &seed_entries())
    }

    /// Open (creating if needed) the database at `path`. `seed` is only
    /// inserted when the file has no schema yet.
    ///
    /// Fails with [`Error::StorageUnavailable`] when the directory or the
    /// file cannot be created.
    pub fn initialize_with_seed(path: &Path, seed: &[DictionaryEntry]) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    tracing::error!(path = %parent.display(), error = %e, "cannot create database directory");
                    Error::StorageUnavailable(parent.to_path_buf())
                })?;
            }
        }

        let conn = Connection::open(path).map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref code, _)
                if code.code == rusqlite::ErrorCode::CannotOpen =>
            {
                tracing::error!(path = %path.display(), error = %e, "cannot open database file");
                Error::StorageUnavailable(path.to_path_buf())
            }
            other => Error::Database(other),
        })?;

        let mut store = Self { conn };
        store.prepare_schema(seed)?;
        tracing::info!(path = %path.display(), rows = store.len()?, "dictionary store ready");
        Ok(store)
    }

    /// An in-memory store seeded with `seed`. Nothing touches the disk.
    pub fn open_in_memory(seed: &[DictionaryEntry]) -> Result<Self> {
        let mut store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.prepare_schema(seed)?;
        Ok(store)
    }

    fn prepare_schema(&mut self, seed: &[DictionaryEntry]) -> Result<()> {
        let version: i32 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;

        match version {
            0 => {
                let tx = self.conn.transaction()?;
                tx.execute("CREATE TABLE dictionary (word TEXT, definition TEXT)", [])?;
                {
                    let mut insert = tx.prepare("INSERT INTO dictionary VALUES (?1, ?2)")?;
                    for entry in seed {
                        insert.execute(params![entry.word, entry.definition])?;
                    }
                }
                tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
                tx.commit()?;
                tracing::info!(seeded = seed.len(), "created dictionary table");
            }
            v if v < SCHEMA_VERSION => {
                // No migrations exist between versions; only the stamp moves.
                tracing::debug!(from = v, to = SCHEMA_VERSION, "upgrading schema version");
                self.conn
                    .pragma_update(None, "user_version", SCHEMA_VERSION)?;
            }
            v if v > SCHEMA_VERSION => {
                tracing::warn!(found = v, expected = SCHEMA_VERSION, "database schema is newer than this build");
            }
            _ => {}
        }
        Ok(())
    }

    /// Definition of the first row whose word equals `word` exactly.
    pub fn lookup_exact(&self, word: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT definition FROM dictionary WHERE word = ?1 ORDER BY rowid LIMIT 1",
                params![word],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Every word containing `substring`, case-sensitive, in row order.
    ///
    /// `instr` is used instead of `LIKE` because `LIKE` folds ASCII case and
    /// treats `%`/`_` as wildcards. An empty `substring` matches every row.
    pub fn lookup_contains(&self, substring: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT word FROM dictionary WHERE instr(word, ?1) > 0 ORDER BY rowid",
        )?;
        let words = stmt
            .query_map(params![substring], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(words)
    }

    /// Full scan in row order.
    pub fn read_all(&self) -> Result<Vec<DictionaryEntry>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT word, definition FROM dictionary ORDER BY rowid")?;
        let entries = stmt
            .query_map([], |row| {
                Ok(DictionaryEntry {
                    word: row.get(0)?,
                    definition: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    pub fn len(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM dictionary", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn schema_version(&self) -> Result<i32> {
        self.conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
