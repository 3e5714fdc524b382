//! Core types for remote synchronization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::EventPayload;

/// One pending remote operation.
///
/// For inserts and updates the payload is the full remote field set;
/// deletes carry only the event id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SyncOp {
    Insert { event_id: i64, payload: EventPayload },
    Update { event_id: i64, payload: EventPayload },
    Delete { event_id: i64 },
}

impl SyncOp {
    /// The event this operation targets.
    pub fn event_id(&self) -> i64 {
        match self {
            SyncOp::Insert { event_id, .. }
            | SyncOp::Update { event_id, .. }
            | SyncOp::Delete { event_id } => *event_id,
        }
    }
}

/// Current sync status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncStatus {
    /// Last successful drain timestamp.
    pub last_drain_at: Option<DateTime<Utc>>,
    /// Number of pending operations in the queue.
    pub pending_count: usize,
    /// Whether a drain is currently in flight.
    pub in_progress: bool,
    /// Whether the session fell back to cached, possibly-stale data.
    pub offline_fallback: bool,
}

/// Sync error types.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Remote service error: {0}")]
    Remote(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error during sync: {0}")]
    Storage(#[from] crate::error::StorageError),

    #[error("Malformed remote record: {0}")]
    MalformedRecord(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ClockTime;

    fn payload() -> EventPayload {
        EventPayload {
            date: "2024-06-10".parse().unwrap(),
            start: ClockTime::new(9, 0).unwrap(),
            end: ClockTime::new(10, 0),
            text: "bait stations".to_string(),
            client_id: None,
        }
    }

    #[test]
    fn test_op_event_id() {
        assert_eq!(
            SyncOp::Insert {
                event_id: 5,
                payload: payload()
            }
            .event_id(),
            5
        );
        assert_eq!(SyncOp::Delete { event_id: 9 }.event_id(), 9);
    }

    #[test]
    fn test_op_serde_tagging() {
        let op = SyncOp::Delete { event_id: 3 };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], "delete");
        assert_eq!(json["event_id"], 3);

        let back: SyncOp = serde_json::from_value(json).unwrap();
        assert_eq!(back, op);
    }
}
