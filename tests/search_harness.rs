#![allow(unused)]
//! Search layer integration harness.
//!
//! # What this covers
//!
//! - **Exact branch**: a query equal to a stored word yields exactly one
//!   line, the first matching row's definition, and no word list.
//! - **Substring branch**: any other query yields every word containing it,
//!   in row order. Case matters and `%` / `_` are plain characters.
//! - **Empty query**: matches every word.
//! - **Persistence**: every search records the query, even when nothing
//!   matched, and the record survives a reopen.
//! - **Property: model agreement**: for random stores and random queries the
//!   result equals a direct scan of the entries. Verified with proptest.
//!
//! # Running
//!
//! ```sh
//! cargo test --test search_harness
//! ```

mod common;
use common::*;
use lexi::search::{lookup, search};
use lexi::{DictionaryEntry, PreferenceStore, SearchResults};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------------

#[test]
fn exact_and_substring_branches() {
    let store = StoreBuilder::new().words(SMALL).build();
    assert_results!(store, "apple", ["A round fruit"]);
    assert_results!(store, "Apple", ["A technology company"]);
    assert_results!(store, "pple", ["apple", "pineapple", "Apple"]);
    assert_results!(store, "App", ["Apple"]);
    assert_results!(store, "kiwi", []);
}

#[test]
fn exact_hit_does_not_list_longer_words() {
    // "apple" is inside "pineapple", but only the definition comes back.
    let store = StoreBuilder::new().words(SMALL).build();
    let results = lookup(&store, "apple").unwrap();
    assert!(results.is_definition());
    assert_eq!(results.len(), 1);
}

#[test]
fn wildcard_characters_are_literal() {
    let store = StoreBuilder::new().words(AWKWARD).words(SMALL).build();
    assert_results!(store, "%", ["100%"]);
    assert_results!(store, "_", ["snake_case"]);
    assert_results!(store, "'", ["it's"]);
    assert_results!(store, "ï", ["naïve"]);
}

#[test]
fn empty_query_lists_every_word() {
    let store = StoreBuilder::new().words(SMALL).build();
    assert_results!(store, "", ["apple", "pineapple", "grape", "Apple"]);
}

#[test]
fn single_word_store_scenario() {
    let env = TestEnv::new();
    let store = StoreBuilder::new()
        .word("apple", "A round fruit with red or green skin and crisp flesh")
        .build();
    let mut prefs = PreferenceStore::load(PreferenceStore::path_in(&env.data_dir()));

    assert_eq!(
        search(&store, &mut prefs, "apple").unwrap(),
        vec!["A round fruit with red or green skin and crisp flesh"]
    );
    assert!(search(&store, &mut prefs, "an").unwrap().is_empty());
    assert_eq!(prefs.get_last_query(), "an");
}

#[test]
fn seeded_store_substring_scenario() {
    let env = TestEnv::new();
    let mut dict = env.open();
    assert_eq!(
        dict.search("an").unwrap(),
        vec!["banana", "elephant", "island", "ocean"]
    );
    assert_eq!(dict.search("dog").unwrap(), vec!["A domesticated carnivorous mammal"]);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn every_search_is_recorded_and_survives_reopen() {
    let env = TestEnv::new();
    {
        let mut dict = env.open();
        dict.search("no such word").unwrap();
        assert_eq!(dict.last_query(), "no such word");
        dict.search("koala").unwrap();
    }
    let dict = env.open();
    assert_eq!(dict.last_query(), "koala");
}

#[test]
fn lookup_does_not_record() {
    let env = TestEnv::new();
    let dict = env.open();
    dict.lookup("tree").unwrap();
    assert_eq!(dict.last_query(), "");
    assert!(!PreferenceStore::path_in(&env.data_dir()).exists());
}

#[test]
fn search_free_function_records_before_returning() {
    let env = TestEnv::new();
    let store = StoreBuilder::new().words(SMALL).build();
    let mut prefs = PreferenceStore::load(PreferenceStore::path_in(&env.data_dir()));

    let hits = search(&store, &mut prefs, "grape").unwrap();
    assert_eq!(hits, vec!["A small fruit that grows in bunches"]);

    let reloaded = PreferenceStore::load(PreferenceStore::path_in(&env.data_dir()));
    assert_eq!(reloaded.get_last_query(), "grape");
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn model(entries: &[DictionaryEntry], query: &str) -> SearchResults {
    match entries.iter().find(|e| e.word == query) {
        Some(hit) => SearchResults::Definition(hit.definition.clone()),
        None => SearchResults::Words(
            entries
                .iter()
                .filter(|e| e.word.contains(query))
                .map(|e| e.word.clone())
                .collect(),
        ),
    }
}

fn arb_entries() -> impl Strategy<Value = Vec<DictionaryEntry>> {
    prop::collection::vec(("[abAB%_]{1,4}", "[a-z ]{0,12}"), 0..24).prop_map(|rows| {
        rows.into_iter()
            .map(|(w, d)| DictionaryEntry::new(w, d))
            .collect()
    })
}

proptest! {
    #[test]
    fn lookup_agrees_with_a_direct_scan(
        entries in arb_entries(),
        query in "[abAB%_]{0,3}",
    ) {
        let store = lexi::DictionaryStore::open_in_memory(&entries).unwrap();
        let actual = lookup(&store, &query).unwrap();
        prop_assert_eq!(actual, model(&entries, &query));
    }

    #[test]
    fn every_stored_word_finds_its_first_definition(entries in arb_entries()) {
        let store = lexi::DictionaryStore::open_in_memory(&entries).unwrap();
        for entry in &entries {
            let first = entries.iter().find(|e| e.word == entry.word).unwrap();
            prop_assert_eq!(
                lookup(&store, &entry.word).unwrap(),
                SearchResults::Definition(first.definition.clone())
            );
        }
    }
}
