#![allow(unused)]
//! Preference container integration harness.
//!
//! # What this covers
//!
//! - **Default**: with no file on disk the last query is `""`.
//! - **Round trip across instances**: a value written by one instance is read
//!   by the next one loaded from the same path.
//! - **On-disk shape**: the file is a JSON object with a `last_search` key,
//!   and unrelated keys already in it are preserved on write.
//! - **Corrupt file**: unreadable JSON is treated as an empty container and
//!   is replaced on the next write.
//! - **Unwritable location**: a failed write keeps the in-memory value and
//!   does not panic or return an error.
//!
//! # Running
//!
//! ```sh
//! cargo test --test prefs_harness
//! ```

mod common;
use common::*;
use lexi::prefs::KEY_LAST_SEARCH;
use lexi::PreferenceStore;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn prefs_path(env: &TestEnv) -> std::path::PathBuf {
    PreferenceStore::path_in(&env.data_dir())
}

#[test]
fn missing_file_means_empty_query() {
    let env = TestEnv::new();
    let prefs = PreferenceStore::load(prefs_path(&env));
    assert_eq!(prefs.get_last_query(), "");
    assert_missing!(prefs_path(&env));
}

#[rstest]
#[case("apple")]
#[case("")]
#[case("  spaced  ")]
#[case("naïve \"quoted\"")]
fn value_survives_reload(#[case] text: &str) {
    let env = TestEnv::new();
    PreferenceStore::load(prefs_path(&env)).set_last_query(text);
    assert_eq!(PreferenceStore::load(prefs_path(&env)).get_last_query(), text);
}

#[test]
fn file_is_a_json_object_keyed_by_last_search() {
    let env = TestEnv::new();
    PreferenceStore::load(prefs_path(&env)).set_last_query("tree");

    let raw: serde_json::Value = serde_json::from_str(&env.read(prefs_path(&env))).unwrap();
    assert_eq!(raw, serde_json::json!({ "last_search": "tree" }));
    assert!(raw.get(KEY_LAST_SEARCH).is_some());
}

#[test]
fn unrelated_keys_are_preserved() {
    let env = TestEnv::new();
    let path = prefs_path(&env);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"theme":"gruvbox","last_search":"old"}"#).unwrap();

    let mut prefs = PreferenceStore::load(&path);
    assert_eq!(prefs.get_last_query(), "old");
    prefs.set_last_query("new");

    let raw: serde_json::Value = serde_json::from_str(&env.read(&path)).unwrap();
    assert_eq!(raw["theme"], "gruvbox");
    assert_eq!(raw["last_search"], "new");
}

#[test]
fn corrupt_file_is_treated_as_empty_and_replaced() {
    let env = TestEnv::new();
    let path = prefs_path(&env);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    let mut prefs = PreferenceStore::load(&path);
    assert_eq!(prefs.get_last_query(), "");
    prefs.set_last_query("sun");
    assert_eq!(PreferenceStore::load(&path).get_last_query(), "sun");
}

#[test]
fn non_string_value_reads_as_empty() {
    let env = TestEnv::new();
    let path = prefs_path(&env);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"last_search": 42}"#).unwrap();
    assert_eq!(PreferenceStore::load(&path).get_last_query(), "");
}

#[test]
fn failed_write_keeps_value_in_memory() {
    let env = TestEnv::new();
    // The container's parent directory is a regular file, so every flush fails.
    let blocker = env.root().join("blocked");
    std::fs::write(&blocker, "file").unwrap();

    let mut prefs = PreferenceStore::load(blocker.join("dictionary_prefs.json"));
    prefs.set_last_query("lion");
    assert_eq!(prefs.get_last_query(), "lion");
}
