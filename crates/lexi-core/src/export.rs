//! Export layer: writes the whole dictionary out as `word: definition` lines.
//!
//! Two destinations exist. The *primary* location is the app-private files
//! directory and is always writable. The *secondary* location lives under a
//! shared root (a documents folder, a removable card) that may be absent or
//! read-only, so it is checked before every write.
//!
//! Every operation overwrites its target in full. None are atomic: a crash
//! mid-write leaves a truncated file.

use crate::error::{Error, Result};
use crate::store::DictionaryStore;
use crate::types::{DictionaryEntry, Notification};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// File written by both export operations.
pub const EXPORT_FILE_NAME: &str = "dictionary.txt";

/// File written by the copy operation in the secondary location.
pub const COPY_FILE_NAME: &str = "dictionary_copy.txt";

/// Sub-directory of the shared root owned by this application.
pub const APP_DIR_NAME: &str = "lexi";

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Resolved primary and secondary destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    primary_dir: PathBuf,
    external_root: PathBuf,
}

impl Locations {
    /// `data_dir` is the app-private directory; exports go to its `files/`
    /// sub-directory. `external_root` is the shared storage root.
    pub fn new(data_dir: &Path, external_root: impl Into<PathBuf>) -> Self {
        Self {
            primary_dir: data_dir.join("files"),
            external_root: external_root.into(),
        }
    }

    pub fn primary_dir(&self) -> &Path {
        &self.primary_dir
    }

    pub fn primary_file(&self) -> PathBuf {
        self.primary_dir.join(EXPORT_FILE_NAME)
    }

    pub fn external_root(&self) -> &Path {
        &self.external_root
    }

    pub fn secondary_dir(&self) -> PathBuf {
        self.external_root.join(APP_DIR_NAME)
    }

    pub fn secondary_file(&self) -> PathBuf {
        self.secondary_dir().join(EXPORT_FILE_NAME)
    }

    pub fn copy_file(&self) -> PathBuf {
        self.secondary_dir().join(COPY_FILE_NAME)
    }

    /// The shared root is "mounted" when it is an existing directory, and
    /// "writable" when its permissions are not read-only.
    ///
    /// Permission bits alone do not say who may write, so a root that passes
    /// this check can still refuse the write itself; those refusals are
    /// reported as [`Error::StorageUnavailable`] too.
    pub fn secondary_available(&self) -> bool {
        match std::fs::metadata(&self.external_root) {
            Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
            Err(_) => false,
        }
    }

    fn ensure_secondary(&self) -> Result<PathBuf> {
        if !self.secondary_available() {
            return Err(Error::StorageUnavailable(self.external_root.clone()));
        }
        let dir = self.secondary_dir();
        std::fs::create_dir_all(&dir).map_err(|e| self.refused(Error::Io(e)))?;
        Ok(dir)
    }

    /// Turn a permission or read-only-filesystem failure under the shared
    /// root into [`Error::StorageUnavailable`]. Other errors pass through.
    fn refused(&self, err: Error) -> Error {
        match err {
            Error::Io(ref e) if is_refusal(e) => {
                tracing::warn!(root = %self.external_root.display(), error = %e, "shared storage refused write");
                Error::StorageUnavailable(self.external_root.clone())
            }
            other => other,
        }
    }
}

fn is_refusal(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem
    )
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Write one `<word>: <definition>\n` line per entry.
pub fn write_entries<W: Write>(entries: &[DictionaryEntry], out: W) -> io::Result<()> {
    let mut out = BufWriter::new(out);
    for entry in entries {
        writeln!(out, "{entry}")?;
    }
    out.flush()
}

fn write_store_to(store: &DictionaryStore, path: &Path) -> Result<()> {
    let entries = store.read_all()?;
    let file = File::create(path)?;
    write_entries(&entries, file)?;
    tracing::info!(path = %path.display(), rows = entries.len(), "dictionary exported");
    Ok(())
}

/// Export every entry to the primary location. Returns the written path.
pub fn export_to_primary(store: &DictionaryStore, locations: &Locations) -> Result<PathBuf> {
    std::fs::create_dir_all(locations.primary_dir())?;
    let path = locations.primary_file();
    write_store_to(store, &path)?;
    Ok(path)
}

/// Export every entry to the secondary location, if it is available.
///
/// Fails with [`Error::StorageUnavailable`] without writing anything when the
/// shared root is missing, read-only, or refuses the write.
pub fn export_to_secondary(store: &DictionaryStore, locations: &Locations) -> Result<PathBuf> {
    locations.ensure_secondary()?;
    let path = locations.secondary_file();
    write_store_to(store, &path).map_err(|e| locations.refused(e))?;
    Ok(path)
}

/// Copy the primary export byte-for-byte to `dictionary_copy.txt` in the
/// secondary location.
///
/// The source is opened before the destination is touched, so a missing
/// primary export ([`Error::SourceMissing`]) leaves any earlier copy intact.
pub fn duplicate_to_secondary(locations: &Locations) -> Result<PathBuf> {
    locations.ensure_secondary()?;

    let source_path = locations.primary_file();
    let mut source = File::open(&source_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::SourceMissing(source_path.clone()),
        _ => Error::Io(e),
    })?;

    let dest_path = locations.copy_file();
    let mut dest = File::create(&dest_path).map_err(|e| locations.refused(Error::Io(e)))?;
    let copied = io::copy(&mut source, &mut dest)?;
    dest.sync_all()?;
    tracing::info!(
        from = %source_path.display(),
        to = %dest_path.display(),
        bytes = copied,
        "dictionary copied"
    );
    Ok(dest_path)
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// The three user-triggerable export operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportAction {
    /// Export to the primary (app-private) location.
    SaveInternal,
    /// Export to the secondary (shared) location.
    SaveExternal,
    /// Copy the primary export into the secondary location.
    CopyExternal,
}

impl ExportAction {
    pub const ALL: [ExportAction; 3] = [
        ExportAction::SaveInternal,
        ExportAction::SaveExternal,
        ExportAction::CopyExternal,
    ];

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            ExportAction::SaveInternal => "Save internal",
            ExportAction::SaveExternal => "Save external",
            ExportAction::CopyExternal => "Copy external",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            ExportAction::SaveInternal => "Dictionary data saved to internal storage",
            ExportAction::SaveExternal => "Dictionary data saved to external storage",
            ExportAction::CopyExternal => "Dictionary data copied to external storage",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            ExportAction::SaveInternal | ExportAction::SaveExternal => {
                "Failed to save dictionary data"
            }
            ExportAction::CopyExternal => "Failed to copy dictionary data",
        }
    }

    /// Run the operation against `store` and `locations`.
    pub fn perform(self, store: &DictionaryStore, locations: &Locations) -> Result<PathBuf> {
        match self {
            ExportAction::SaveInternal => export_to_primary(store, locations),
            ExportAction::SaveExternal => export_to_secondary(store, locations),
            ExportAction::CopyExternal => duplicate_to_secondary(locations),
        }
    }

    /// The message shown to the user for `outcome`.
    pub fn notification(self, outcome: &Result<PathBuf>) -> Notification {
        match outcome {
            Ok(_) => Notification::success(self.success_message()),
            Err(Error::StorageUnavailable(_)) if self != ExportAction::SaveInternal => {
                Notification::failure("External storage is not available")
            }
            Err(_) => Notification::failure(self.failure_message()),
        }
    }
}

impl std::fmt::Display for ExportAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportAction::SaveInternal => write!(f, "save-internal"),
            ExportAction::SaveExternal => write!(f, "save-external"),
            ExportAction::CopyExternal => write!(f, "copy-external"),
        }
    }
}

impl std::str::FromStr for ExportAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "save-internal" | "internal" => Ok(ExportAction::SaveInternal),
            "save-external" | "external" => Ok(ExportAction::SaveExternal),
            "copy-external" | "copy" => Ok(ExportAction::CopyExternal),
            other => Err(format!("unknown export action: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_entries;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    struct Fixture {
        _dir: tempfile::TempDir,
        store: DictionaryStore,
        locations: Locations,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let external = dir.path().join("sdcard");
        std::fs::create_dir_all(&external).unwrap();
        let locations = Locations::new(&dir.path().join("data"), external);
        let store = DictionaryStore::open_in_memory(&seed_entries()).unwrap();
        Fixture { _dir: dir, store, locations }
    }

    #[test]
    fn write_entries_formats_lines() {
        let mut out = Vec::new();
        write_entries(
            &[
                DictionaryEntry::new("a", "first"),
                DictionaryEntry::new("b", "second: with colon"),
            ],
            &mut out,
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a: first\nb: second: with colon\n");
    }

    #[test]
    fn primary_export_writes_every_row() {
        let fx = fixture();
        let path = export_to_primary(&fx.store, &fx.locations).unwrap();
        assert_eq!(path, fx.locations.primary_file());

        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 20);
        assert_eq!(
            text.lines().next(),
            Some("apple: A round fruit with red or green skin and crisp flesh")
        );
    }

    #[test]
    fn secondary_export_requires_mounted_root() {
        let mut fx = fixture();
        fx.locations = Locations::new(
            fx.locations.primary_dir().parent().unwrap(),
            fx.locations.external_root().join("missing"),
        );
        let err = export_to_secondary(&fx.store, &fx.locations).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
        assert!(!fx.locations.secondary_dir().exists());
    }

    #[test]
    fn copy_before_export_is_source_missing() {
        let fx = fixture();
        let err = duplicate_to_secondary(&fx.locations).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceMissing);
        assert!(!fx.locations.copy_file().exists());
    }

    #[test]
    fn copy_is_byte_identical() {
        let fx = fixture();
        export_to_primary(&fx.store, &fx.locations).unwrap();
        let copy = duplicate_to_secondary(&fx.locations).unwrap();
        assert_eq!(
            std::fs::read(copy).unwrap(),
            std::fs::read(fx.locations.primary_file()).unwrap()
        );
    }

    #[test]
    fn notifications_name_the_failed_operation() {
        let missing: Result<PathBuf> = Err(Error::SourceMissing(PathBuf::from("x")));
        let unavailable: Result<PathBuf> = Err(Error::StorageUnavailable(PathBuf::from("x")));
        let io: Result<PathBuf> = Err(Error::Io(io::Error::other("boom")));

        assert_eq!(
            ExportAction::CopyExternal.notification(&missing).message,
            "Failed to copy dictionary data"
        );
        assert_eq!(
            ExportAction::SaveExternal.notification(&unavailable).message,
            "External storage is not available"
        );
        assert_eq!(
            ExportAction::SaveInternal.notification(&io).message,
            "Failed to save dictionary data"
        );
        assert!(ExportAction::SaveInternal
            .notification(&Ok(PathBuf::new()))
            .is_success());
    }

    #[test]
    fn action_names_round_trip_through_from_str() {
        for action in ExportAction::ALL {
            assert_eq!(action.to_string().parse::<ExportAction>(), Ok(action));
        }
        assert!("frobnicate".parse::<ExportAction>().is_err());
    }

    #[test]
    fn refusal_kinds_map_to_storage_unavailable() {
        let fx = fixture();
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(
            fx.locations.refused(Error::Io(denied)).kind(),
            ErrorKind::StorageUnavailable
        );
        let other = io::Error::from(io::ErrorKind::Other);
        assert_eq!(fx.locations.refused(Error::Io(other)).kind(), ErrorKind::IoFailure);
    }

    /// Mode 0o077 keeps group/other write bits, so `readonly()` is false, but
    /// the owning user has no access at all. Privileged users bypass the
    /// check, in which case the test has nothing to observe.
    #[cfg(unix)]
    #[test]
    fn owner_denied_root_is_unavailable() {
        use std::os::unix::fs::PermissionsExt;

        let fx = fixture();
        let root = fx.locations.external_root().to_path_buf();
        std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o077)).unwrap();
        let privileged = std::fs::create_dir(root.join("scratch")).is_ok();

        if !privileged {
            assert!(fx.locations.secondary_available());
            let err = export_to_secondary(&fx.store, &fx.locations).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
            assert_eq!(
                ExportAction::SaveExternal.notification(&Err(err)).message,
                "External storage is not available"
            );
        }

        std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}
