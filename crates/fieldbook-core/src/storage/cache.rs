//! Durable mirror of the event collection.
//!
//! Written synchronously on every store mutation, read once on cold
//! start as the offline-safe baseline. Dates serialize as `YYYY-MM-DD`
//! and times as `HH:MM` through the event types themselves, so a
//! snapshot read back in a different timezone reproduces the same
//! calendar days.

use crate::error::StorageError;
use crate::event::Event;
use crate::storage::slot::StorageSlot;

/// Snapshot store for the event collection, backed by one durable slot.
#[derive(Debug)]
pub struct PersistentCache<S: StorageSlot> {
    slot: S,
}

impl<S: StorageSlot> PersistentCache<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    /// Serialize the whole collection and write it to the slot. Completes
    /// before returning.
    pub fn save(&self, events: &[Event]) -> Result<(), StorageError> {
        let json = serde_json::to_string(events).map_err(|source| StorageError::Corrupt {
            name: self.slot.name().to_string(),
            source,
        })?;
        self.slot.write(&json)
    }

    /// Load the snapshot. An unwritten slot yields an empty collection.
    pub fn load(&self) -> Result<Vec<Event>, StorageError> {
        match self.slot.read()? {
            None => Ok(Vec::new()),
            Some(json) => {
                serde_json::from_str(&json).map_err(|source| StorageError::Corrupt {
                    name: self.slot.name().to_string(),
                    source,
                })
            }
        }
    }
}
