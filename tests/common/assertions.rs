//! Domain-specific assertion macros for lexi harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! query or which file broke the expectation.

/// Assert that `search` (or `lookup(..).into_items()`) returned exactly
/// these lines, in this order.
///
/// ```rust
/// assert_results!(store, "ap", ["apple", "pineapple"]);
/// ```
#[macro_export]
macro_rules! assert_results {
    ($store:expr, $query:expr, [$($item:expr),* $(,)?]) => {{
        let query: &str = $query;
        let expected: Vec<String> = vec![$(String::from($item)),*];
        let actual = lexi::search::lookup(&$store, query)
            .unwrap_or_else(|e| panic!("lookup({:?}) failed: {}", query, e))
            .into_items();
        pretty_assertions::assert_eq!(actual, expected, "results for query {:?}", query);
    }};
}

/// Assert that a text file exists and holds exactly `expected`.
#[macro_export]
macro_rules! assert_file_eq {
    ($path:expr, $expected:expr) => {{
        let path = AsRef::<std::path::Path>::as_ref(&$path).to_path_buf();
        let actual = std::fs::read_to_string(&path).unwrap_or_else(|e| {
            panic!("assert_file_eq! failed: cannot read {}: {}", path.display(), e)
        });
        pretty_assertions::assert_eq!(actual, $expected, "contents of {}", path.display());
    }};
}

/// Assert that a path does not exist.
#[macro_export]
macro_rules! assert_missing {
    ($path:expr) => {{
        let path = AsRef::<std::path::Path>::as_ref(&$path).to_path_buf();
        if path.exists() {
            panic!("assert_missing! failed: {} exists", path.display());
        }
    }};
}
