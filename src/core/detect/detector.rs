//! Snapshot-based change detection
//!
//! The last fetched page for each (year, subtype) is kept on disk as
//! `{snapshot_dir}/{year}-{subtype}.html`. Detection and saving are separate calls so a
//! run can keep the old snapshot when reconciliation fails.

use super::fingerprint::fingerprint;
use crate::domain::{LegTrackError, Result, StoreError};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Identifies one snapshot: a year plus a subtype such as `hb`, `hearings` or `spa`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub year: i32,
    pub subtype: String,
}

impl SnapshotKey {
    pub fn new(year: i32, subtype: impl Into<String>) -> Self {
        Self {
            year,
            subtype: subtype.into(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}-{}.html", self.year, self.subtype)
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.subtype)
    }
}

/// Compares fetched content against the saved snapshot for its key
///
/// # Examples
///
/// ```
/// use legtrack::core::detect::{ChangeDetector, SnapshotKey};
///
/// # fn main() -> legtrack::domain::Result<()> {
/// let dir = tempfile::tempdir()?;
/// let detector = ChangeDetector::new(dir.path());
/// let key = SnapshotKey::new(2024, "hb");
///
/// assert!(detector.is_changed("<html>v1</html>", &key)?);
/// detector.save("<html>v1</html>", &key)?;
/// assert!(!detector.is_changed("<html>v1</html>", &key)?);
/// assert!(detector.is_changed("<html>v2</html>", &key)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    snapshot_dir: PathBuf,
}

impl ChangeDetector {
    pub fn new(snapshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_dir: snapshot_dir.into(),
        }
    }

    pub fn snapshot_path(&self, key: &SnapshotKey) -> PathBuf {
        self.snapshot_dir.join(key.file_name())
    }

    /// Returns true when `content` differs from the saved snapshot, or none exists
    ///
    /// # Errors
    ///
    /// Returns a store error if an existing snapshot cannot be read.
    pub fn is_changed(&self, content: &str, key: &SnapshotKey) -> Result<bool> {
        let path = self.snapshot_path(key);
        let previous = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(snapshot = %key, "No previous snapshot");
                return Ok(true);
            }
            Err(e) => {
                return Err(LegTrackError::Store(StoreError::Local(format!(
                    "Failed to read snapshot {}: {}",
                    path.display(),
                    e
                ))))
            }
        };

        let changed = fingerprint(&previous) != fingerprint(content.as_bytes());
        tracing::debug!(snapshot = %key, changed, "Compared snapshot fingerprints");
        Ok(changed)
    }

    /// Replaces the saved snapshot for `key`
    ///
    /// The content is written to a temporary file first and renamed into place.
    ///
    /// # Errors
    ///
    /// Returns a store error if the directory or file cannot be written.
    pub fn save(&self, content: &str, key: &SnapshotKey) -> Result<()> {
        let write_err = |e: std::io::Error| {
            LegTrackError::Store(StoreError::Local(format!(
                "Failed to write snapshot {key}: {e}"
            )))
        };

        fs::create_dir_all(&self.snapshot_dir).map_err(write_err)?;

        let path = self.snapshot_path(key);
        let tmp_path = path.with_extension("html.tmp");
        fs::write(&tmp_path, content).map_err(write_err)?;
        fs::rename(&tmp_path, &path).map_err(write_err)?;

        tracing::debug!(snapshot = %key, path = %path.display(), "Saved snapshot");
        Ok(())
    }
}
