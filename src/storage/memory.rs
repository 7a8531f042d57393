//! In-memory storage backend
//!
//! Keeps the document behind an `RwLock`. Used by tests and by embedders
//! that want the store's semantics without a file on disk.

use parking_lot::RwLock;

use crate::types::StoreDocument;

use super::{EventStorage, StorageResult};

/// Holds the document in memory; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: RwLock<Option<StoreDocument>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStorage for MemoryStorage {
    fn load(&self) -> StorageResult<Option<StoreDocument>> {
        Ok(self.document.read().clone())
    }

    fn save(&self, document: &StoreDocument) -> StorageResult<()> {
        *self.document.write() = Some(document.clone());
        Ok(())
    }
}
