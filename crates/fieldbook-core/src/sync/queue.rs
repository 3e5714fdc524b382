//! Durable, ordered log of pending remote operations.
//!
//! Append order is mutation order and is preserved across restarts.
//! Coalescing happens at append time, not at drain time: operations on
//! an event the remote store has never seen collapse into (or cancel)
//! the pending insert.

use crate::error::StorageError;
use crate::event::EventPayload;
use crate::storage::slot::StorageSlot;
use crate::sync::types::SyncOp;

/// Ordered queue of pending sync operations, mirrored to a durable slot
/// after every change.
#[derive(Debug)]
pub struct SyncQueue<S: StorageSlot> {
    items: Vec<SyncOp>,
    slot: S,
}

impl<S: StorageSlot> SyncQueue<S> {
    /// Open the queue, restoring any pending operations from the slot.
    pub fn open(slot: S) -> Result<Self, StorageError> {
        let items = match slot.read()? {
            None => Vec::new(),
            Some(json) => serde_json::from_str(&json).map_err(|source| StorageError::Corrupt {
                name: slot.name().to_string(),
                source,
            })?,
        };
        Ok(Self { items, slot })
    }

    /// Append an operation, applying the coalescing rules, then rewrite
    /// the slot.
    ///
    /// - UPDATE onto a pending INSERT for the same event merges the new
    ///   fields into the insert in place (the remote store has never
    ///   seen the id; only the eventual insert needs the latest fields).
    /// - DELETE onto a pending INSERT removes the insert entirely (an
    ///   object that never existed remotely need not be deleted there).
    /// - Everything else appends unchanged.
    pub fn push(&mut self, op: SyncOp) -> Result<(), StorageError> {
        match op {
            SyncOp::Update { event_id, payload } => {
                match self.pending_insert_index(event_id) {
                    Some(idx) => self.merge_into_insert(idx, payload),
                    None => self.items.push(SyncOp::Update { event_id, payload }),
                }
            }
            SyncOp::Delete { event_id } => match self.pending_insert_index(event_id) {
                Some(idx) => {
                    self.items.remove(idx);
                }
                None => self.items.push(SyncOp::Delete { event_id }),
            },
            insert => self.items.push(insert),
        }
        self.persist()
    }

    /// Whether an insert for this event is still waiting to be synced.
    pub fn has_pending_insert(&self, event_id: i64) -> bool {
        self.pending_insert_index(event_id).is_some()
    }

    /// Pending operations in append order.
    pub fn items(&self) -> &[SyncOp] {
        &self.items
    }

    /// Empty the queue after a fully successful drain.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.persist()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn pending_insert_index(&self, event_id: i64) -> Option<usize> {
        self.items
            .iter()
            .position(|op| matches!(op, SyncOp::Insert { event_id: id, .. } if *id == event_id))
    }

    fn merge_into_insert(&mut self, idx: usize, payload: EventPayload) {
        if let SyncOp::Insert {
            payload: pending, ..
        } = &mut self.items[idx]
        {
            *pending = payload;
        }
    }

    fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.items).map_err(|source| StorageError::Corrupt {
            name: self.slot.name().to_string(),
            source,
        })?;
        self.slot.write(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ClockTime;
    use crate::storage::slot::MemorySlot;

    fn payload(text: &str) -> EventPayload {
        EventPayload {
            date: "2024-06-10".parse().unwrap(),
            start: ClockTime::new(9, 0).unwrap(),
            end: ClockTime::new(10, 0),
            text: text.to_string(),
            client_id: None,
        }
    }

    fn queue() -> SyncQueue<MemorySlot> {
        SyncQueue::open(MemorySlot::new("sync_queue")).unwrap()
    }

    #[test]
    fn test_updates_coalesce_into_pending_insert() {
        let mut q = queue();
        q.push(SyncOp::Insert {
            event_id: 1,
            payload: payload("a"),
        })
        .unwrap();
        q.push(SyncOp::Update {
            event_id: 1,
            payload: payload("b"),
        })
        .unwrap();
        q.push(SyncOp::Update {
            event_id: 1,
            payload: payload("c"),
        })
        .unwrap();

        assert_eq!(q.len(), 1);
        match &q.items()[0] {
            SyncOp::Insert { payload, .. } => assert_eq!(payload.text, "c"),
            other => panic!("expected a single insert, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_cancels_pending_insert() {
        let mut q = queue();
        q.push(SyncOp::Insert {
            event_id: 1,
            payload: payload("a"),
        })
        .unwrap();
        q.push(SyncOp::Delete { event_id: 1 }).unwrap();

        assert!(q.is_empty());
    }

    #[test]
    fn test_update_without_pending_insert_appends() {
        let mut q = queue();
        q.push(SyncOp::Update {
            event_id: 42,
            payload: payload("edited"),
        })
        .unwrap();
        assert_eq!(q.len(), 1);
        assert!(matches!(q.items()[0], SyncOp::Update { event_id: 42, .. }));
    }

    #[test]
    fn test_delete_without_pending_insert_appends() {
        let mut q = queue();
        q.push(SyncOp::Delete { event_id: 42 }).unwrap();
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_coalescing_only_touches_matching_id() {
        let mut q = queue();
        q.push(SyncOp::Insert {
            event_id: 1,
            payload: payload("one"),
        })
        .unwrap();
        q.push(SyncOp::Insert {
            event_id: 2,
            payload: payload("two"),
        })
        .unwrap();
        q.push(SyncOp::Delete { event_id: 1 }).unwrap();

        assert_eq!(q.len(), 1);
        assert_eq!(q.items()[0].event_id(), 2);
    }

    #[test]
    fn test_order_preserved_across_restart() {
        let slot = MemorySlot::new("sync_queue");

        let mut q = SyncQueue::open(slot.clone()).unwrap();
        q.push(SyncOp::Delete { event_id: 9 }).unwrap();
        q.push(SyncOp::Insert {
            event_id: 1,
            payload: payload("a"),
        })
        .unwrap();
        q.push(SyncOp::Update {
            event_id: 8,
            payload: payload("b"),
        })
        .unwrap();

        // "Restart": reopen from the same slot.
        let reopened = SyncQueue::open(slot).unwrap();
        let ids: Vec<i64> = reopened.items().iter().map(|op| op.event_id()).collect();
        assert_eq!(ids, vec![9, 1, 8]);
    }

    #[test]
    fn test_clear_persists_empty_queue() {
        let slot = MemorySlot::new("sync_queue");
        let mut q = SyncQueue::open(slot.clone()).unwrap();
        q.push(SyncOp::Delete { event_id: 9 }).unwrap();
        q.clear().unwrap();

        assert!(SyncQueue::open(slot).unwrap().is_empty());
    }
}
