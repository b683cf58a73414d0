//! Search layer: exact lookup with a substring fallback.
//!
//! A query is first tried as a whole word. A hit yields that word's
//! *definition*; a miss falls back to every *word* containing the query.
//! The two branches return different kinds of text and callers rely on it.
//!
//! [`search`] persists the query into the preference store before running
//! it, so every keystroke is remembered even when nothing matches.

use crate::error::Result;
use crate::prefs::PreferenceStore;
use crate::store::DictionaryStore;

/// What a query resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResults {
    /// The query equals a stored word; this is its definition.
    Definition(String),
    /// No exact match; these words contain the query (possibly none).
    Words(Vec<String>),
}

impl SearchResults {
    /// Flatten into the list shown to the user.
    pub fn into_items(self) -> Vec<String> {
        match self {
            SearchResults::Definition(definition) => vec![definition],
            SearchResults::Words(words) => words,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SearchResults::Definition(_) => 1,
            SearchResults::Words(words) => words.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_definition(&self) -> bool {
        matches!(self, SearchResults::Definition(_))
    }
}

/// Evaluate `query` against the store without touching preferences.
pub fn lookup(store: &DictionaryStore, query: &str) -> Result<SearchResults> {
    if let Some(definition) = store.lookup_exact(query)? {
        tracing::debug!(query, "search: exact match");
        return Ok(SearchResults::Definition(definition));
    }
    let words = store.lookup_contains(query)?;
    tracing::debug!(query, hits = words.len(), "search: substring match");
    Ok(SearchResults::Words(words))
}

/// Persist `query` as the last search, then evaluate it.
pub fn search(
    store: &DictionaryStore,
    prefs: &mut PreferenceStore,
    query: &str,
) -> Result<Vec<String>> {
    prefs.set_last_query(query);
    lookup(store, query).map(SearchResults::into_items)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
