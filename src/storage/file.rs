//! File-backed storage for the store document
//!
//! Writes are atomic: the document is serialized to a temp file, synced,
//! then renamed over the destination. A crash mid-write leaves either the
//! old document or the new one, never a truncated mix.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::types::StoreDocument;

use super::{EventStorage, StorageResult};

/// Stores the document as one pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create storage backed by the given file path
    ///
    /// Parent directories are created on first save.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn atomic_write(&self, content: &str) -> StorageResult<()> {
        let temp_path = self.path.with_extension("tmp");

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;

        // Atomic rename
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

impl EventStorage for FileStorage {
    fn load(&self) -> StorageResult<Option<StoreDocument>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let document = serde_json::from_str(&content)?;
        Ok(Some(document))
    }

    fn save(&self, document: &StoreDocument) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(document)?;
        self.atomic_write(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Event, EventPayload};
    use crate::utils::{generate_event_id, now_iso8601};
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("event-store.json"));

        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("event-store.json"));

        let mut document = StoreDocument::empty();
        document.events.push(Event {
            id: generate_event_id(),
            timestamp: now_iso8601(),
            session_id: Some("sess-1".to_string()),
            user_agent: None,
            payload: EventPayload::PageView,
        });

        storage.save(&document).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded, document);

        // No temp file left behind
        assert!(!storage.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("data").join("event-store.json"));

        storage.save(&StoreDocument::empty()).unwrap();
        assert!(storage.path().exists());
    }

    #[test]
    fn test_save_overwrites_previous_document() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("event-store.json"));

        let empty = StoreDocument::empty();
        storage.save(&empty).unwrap();

        let mut updated = StoreDocument::empty();
        updated.events.push(Event {
            id: generate_event_id(),
            timestamp: now_iso8601(),
            session_id: None,
            user_agent: None,
            payload: EventPayload::Visitor,
        });
        storage.save(&updated).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded.events.len(), 1);
    }

    #[test]
    fn test_load_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("event-store.json");
        fs::write(&path, "{ not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(storage.load().is_err());
    }
}
