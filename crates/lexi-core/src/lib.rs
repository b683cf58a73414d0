//! lexi-core: dictionary store, search, preferences and export.
//!
//! # Architecture
//!
//! ```text
//!  input ──► Search ──► Store (SQLite)
//!              │           │
//!              ▼           ▼
//!          Preferences   Export ──► primary / secondary files
//! ```
//!
//! Everything is synchronous. [`Dictionary`] ties the layers together and is
//! the only type the front ends hold on to.

pub mod config;
pub mod error;
pub mod export;
pub mod prefs;
pub mod search;
pub mod session;
pub mod store;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use export::{ExportAction, Locations};
pub use prefs::PreferenceStore;
pub use search::SearchResults;
pub use session::Dictionary;
pub use store::DictionaryStore;
pub use types::{DictionaryEntry, Notification, NotificationLevel};
