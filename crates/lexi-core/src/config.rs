//! Configuration types for lexi.
//!
//! [`Config::load`] reads `~/.config/lexi/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[storage]
# Empty means the platform default: $XDG_DATA_HOME/lexi
data_dir      = ""
# Empty means the platform default: $HOME/Documents
external_root = ""

[ui]
toast_ms         = 2000
timestamp_format = "%H:%M:%S"

[keybindings]
toggle_focus  = "Tab"
query_focus   = "/"
save_internal = "i"
save_external = "e"
copy_external = "c"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/lexi/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// `[storage]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// App-private directory holding the database, preferences and the
    /// primary export.
    #[serde(default)]
    pub data_dir: String,
    /// Shared location the secondary export and the copy are written under.
    #[serde(default)]
    pub external_root: String,
}

impl StorageConfig {
    /// Resolved app-private directory.
    pub fn data_dir(&self) -> PathBuf {
        if self.data_dir.is_empty() {
            default_data_dir()
        } else {
            expand_home(&self.data_dir)
        }
    }

    /// Resolved shared storage root. Whether it is usable is decided at
    /// export time, not here.
    pub fn external_root(&self) -> PathBuf {
        if self.external_root.is_empty() {
            home_dir().join("Documents")
        } else {
            expand_home(&self.external_root)
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// How long a status notification stays on screen.
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
    /// `chrono` format for the time shown beside a notification.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_toast_ms() -> u64 { 2000 }
fn default_timestamp_format() -> String { "%H:%M:%S".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_ms: default_toast_ms(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

/// `[keybindings]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_toggle_focus")]
    pub toggle_focus: String,
    #[serde(default = "default_query_focus")]
    pub query_focus: String,
    #[serde(default = "default_save_internal")]
    pub save_internal: String,
    #[serde(default = "default_save_external")]
    pub save_external: String,
    #[serde(default = "default_copy_external")]
    pub copy_external: String,
}

fn default_toggle_focus() -> String { "Tab".to_string() }
fn default_query_focus() -> String { "/".to_string() }
fn default_save_internal() -> String { "i".to_string() }
fn default_save_external() -> String { "e".to_string() }
fn default_copy_external() -> String { "c".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            toggle_focus: default_toggle_focus(),
            query_focus: default_query_focus(),
            save_internal: default_save_internal(),
            save_external: default_save_external(),
            copy_external: default_copy_external(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/lexi/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Same as [`Config::load`] with an explicit file path.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

fn expand_home(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(raw),
    }
}

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
        .join("lexi")
        .join("config.toml")
}

fn default_data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"))
        .join("lexi")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
