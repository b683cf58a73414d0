//! Static word lists used across harnesses.

use lexi::DictionaryEntry;

/// A small store whose contents are easy to reason about in assertions.
pub const SMALL: &[(&str, &str)] = &[
    ("apple", "A round fruit"),
    ("pineapple", "A tropical fruit"),
    ("grape", "A small fruit that grows in bunches"),
    ("Apple", "A technology company"),
];

/// Words that need literal handling by the substring search.
pub const AWKWARD: &[(&str, &str)] = &[
    ("100%", "All of it"),
    ("snake_case", "words_joined_by_underscores"),
    ("it's", "It is"),
    ("naïve", "Lacking experience"),
];

/// Owned entries for a fixture table.
pub fn entries(table: &[(&str, &str)]) -> Vec<DictionaryEntry> {
    table.iter().map(|(w, d)| DictionaryEntry::new(*w, *d)).collect()
}
