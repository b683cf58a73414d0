//! Core types for lexi-core.
//!
//! This module defines the data shared across all layers: the stored
//! [`DictionaryEntry`], the user-facing [`Notification`] produced by every
//! export action, and the [`NotificationLevel`] discriminant.

use std::fmt;
use std::time::Instant;

/// One word/definition row of the dictionary table.
///
/// No uniqueness is enforced on `word`; the store keeps rows in insertion
/// order and never updates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DictionaryEntry {
    pub word: String,
    pub definition: String,
}

impl DictionaryEntry {
    pub fn new(word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
        }
    }
}

/// Renders the export line format, `<word>: <definition>`, without the
/// trailing newline. Delimiters inside either field are written verbatim.
impl fmt::Display for DictionaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.word, self.definition)
    }
}

/// Outcome class of a user-triggered action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Success,
    Failure,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationLevel::Success => write!(f, "ok"),
            NotificationLevel::Failure => write!(f, "failed"),
        }
    }
}

/// A short transient status message, the terminal equivalent of a toast.
///
/// Nothing downstream consumes it as a structured result; the UI shows the
/// message until it expires and the headless CLI prints it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// When the notification was raised. Used by the UI to expire it.
    pub raised_at: Instant,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Failure,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NotificationLevel::Success
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
