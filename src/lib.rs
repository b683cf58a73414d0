//! lexi: terminal dictionary lookup.
//!
//! The binary is a thin front end over [`lexi_core`]; this facade re-exports
//! the core layers so that integration tests and benches can import them from
//! one place.
//!
//! # Architecture
//!
//! ```text
//! TUI / CLI ──► Dictionary ──► Search ──► Store
//!                   │            │
//!                   │            └──► Preferences
//!                   └──► Export
//! ```

pub use lexi_core::{
    config, error, export, prefs, search, session, store, types, Dictionary, DictionaryEntry,
    DictionaryStore, Error, ErrorKind, ExportAction, Locations, Notification, NotificationLevel,
    PreferenceStore, Result, SearchResults,
};
