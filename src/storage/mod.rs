//! Pluggable persistence for the store document
//!
//! The store is storage-agnostic: it talks to an [`EventStorage`]
//! implementation that can load and save the whole document. Production
//! uses [`FileStorage`]; tests and embedders can use [`MemoryStorage`]
//! or provide their own backend (database, object store, ...).

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::types::StoreDocument;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while loading or saving the document
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

/// Whole-document persistence for the event store
///
/// `load` returns `Ok(None)` when no document has been persisted yet;
/// the store then lazily initializes an empty one. `save` replaces the
/// persisted document in full.
pub trait EventStorage: Send + Sync {
    fn load(&self) -> StorageResult<Option<StoreDocument>>;
    fn save(&self, document: &StoreDocument) -> StorageResult<()>;
}
