//! Durable keyed storage slots.
//!
//! The cache and the sync queue each own one slot. The trait exists so
//! tests can substitute an in-memory fake for the file-backed slot;
//! everything above this module is storage-agnostic.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

/// One durable key-value slot: a named place that holds a single
/// serialized snapshot and survives process restart.
pub trait StorageSlot {
    /// Slot name, used in error messages.
    fn name(&self) -> &str;

    /// Read the current contents. `None` means the slot has never been
    /// written (cold start on a fresh install).
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Overwrite the contents. Must complete before returning -- the
    /// optimistic-update guarantee depends on it.
    fn write(&self, contents: &str) -> Result<(), StorageError>;
}

/// File-backed slot: one JSON file under the app data directory.
#[derive(Debug, Clone)]
pub struct FileSlot {
    name: String,
    path: PathBuf,
}

impl FileSlot {
    pub fn new(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl StorageSlot for FileSlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|source| StorageError::ReadFailed {
                name: self.name.clone(),
                source,
            })
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        std::fs::write(&self.path, contents).map_err(|source| StorageError::WriteFailed {
            name: self.name.clone(),
            source,
        })
    }
}

/// In-memory slot for tests. Cloning shares the underlying contents so
/// a test can hand one clone to the core and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    name: String,
    contents: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: Arc::new(Mutex::new(None)),
        }
    }

    /// Current raw contents, for assertions.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

impl StorageSlot for MemorySlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.contents.lock().ok().and_then(|guard| guard.clone()))
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        if let Ok(mut guard) = self.contents.lock() {
            *guard = Some(contents.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_slot_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let slot = FileSlot::new("events", dir.path().join("events.json"));

        assert_eq!(slot.read().unwrap(), None);
        slot.write("[1,2,3]").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_memory_slot_shares_contents_across_clones() {
        let slot = MemorySlot::new("queue");
        let observer = slot.clone();

        slot.write("{}").unwrap();
        assert_eq!(observer.contents().as_deref(), Some("{}"));
    }
}
