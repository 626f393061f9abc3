//! On-disk archive of the raw notification collection.
//!
//! The archive is a warm-start snapshot: `save` overwrites it wholesale with
//! the latest full record batch, and `load` treats a missing or unreadable
//! file as the normal cold-start case.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use super::models::NotificationRecord;

const ARCHIVE_FILE_NAME: &str = "cached_notifications.json";

/// Errors from persisting the archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Serializes the full record collection to a fixed file in a cache
/// directory. Safe to call from a blocking worker.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    path: PathBuf,
}

impl ArchiveStore {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            path: cache_dir.join(ARCHIVE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the archive with `records`.
    ///
    /// Writes to a sibling temp file first and renames it into place so a
    /// failed write never truncates an existing archive.
    pub fn save(&self, records: &[NotificationRecord]) -> Result<(), ArchiveError> {
        let bytes = serde_json::to_vec(records)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &bytes)?;
        std::fs::rename(&tmp_path, &self.path)?;
        debug!(count = records.len(), path = ?self.path, "archived notifications");
        Ok(())
    }

    /// Load the archived records, or an empty collection if there is no
    /// usable archive. Never an error: missing and corrupt archives both
    /// degrade to the cold-start path.
    pub fn load(&self) -> Vec<NotificationRecord> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "no notification archive, cold start");
                return Vec::new();
            }
            Err(err) => {
                warn!(path = ?self.path, %err, "failed to read notification archive");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(err) => {
                warn!(path = ?self.path, %err, "discarding corrupt notification archive");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::models::SubjectKind;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn record(id: &str, read: bool) -> NotificationRecord {
        NotificationRecord {
            id: id.to_string(),
            read,
            title: format!("title for {}", id),
            repo: "octocat/hello-world".to_string(),
            subject: SubjectKind::Issue,
            updated_at: Utc.timestamp_opt(1700000000, 0).unwrap(),
        }
    }

    #[test]
    fn test_load_on_fresh_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ArchiveStore::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ArchiveStore::new(dir.path());

        let records = vec![record("1", false), record("2", true)];
        store.save(&records).unwrap();

        assert_eq!(store.load(), records);
    }

    #[test]
    fn test_save_fully_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = ArchiveStore::new(dir.path());

        store
            .save(&[record("1", false), record("2", false), record("3", false)])
            .unwrap();
        store.save(&[record("9", true)]).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "9");
    }

    #[test]
    fn test_corrupt_archive_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let store = ArchiveStore::new(dir.path());

        std::fs::write(store.path(), b"{ not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_shape_mismatch_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let store = ArchiveStore::new(dir.path());

        // valid JSON, wrong shape
        std::fs::write(store.path(), b"{\"version\": 2}").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_into_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        let store = ArchiveStore::new(&missing);

        let result = store.save(&[record("1", false)]);
        assert!(matches!(result, Err(ArchiveError::Io(_))));
    }

    #[test]
    fn test_empty_collection_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ArchiveStore::new(dir.path());

        store.save(&[]).unwrap();
        assert!(store.load().is_empty());
    }
}
