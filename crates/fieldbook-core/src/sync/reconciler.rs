//! Queue drain against the remote event service.
//!
//! Runs on the reconnect trigger and at startup. Items are processed
//! strictly in append order; the whole batch either lands and the queue
//! clears, or the queue is left exactly as it was for the next attempt.
//! The retry-from-the-start policy can duplicate remote writes for
//! items that landed just before a failure -- a known, accepted
//! tradeoff inherited from the drain being non-transactional.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::storage::slot::StorageSlot;
use crate::sync::queue::SyncQueue;
use crate::sync::remote::RemoteEventService;
use crate::sync::types::{SyncError, SyncOp};

/// What a drain attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Queue had no pending operations.
    Empty,
    /// All pending operations were applied remotely; the queue is clear.
    Drained(usize),
    /// Another drain was already in flight; this trigger was ignored.
    Busy,
    /// Connectivity was down; no attempt was made.
    Offline,
    /// The attempt failed mid-batch; the queue is preserved for retry.
    Failed,
}

/// Drains the sync queue. One pass at a time: a trigger that arrives
/// while a pass is in flight is ignored rather than interleaved, so a
/// batch is never double-submitted by overlapping passes.
#[derive(Debug, Default)]
pub struct SyncReconciler {
    in_flight: bool,
    last_drain_at: Option<DateTime<Utc>>,
}

impl SyncReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn last_drain_at(&self) -> Option<DateTime<Utc>> {
        self.last_drain_at
    }

    /// One drain pass. On any mid-batch failure the queue is left
    /// untouched and the error returned; the caller logs it and retries
    /// the whole batch on the next trigger.
    pub async fn drain<S, R>(
        &mut self,
        queue: &mut SyncQueue<S>,
        remote: &R,
    ) -> Result<DrainOutcome, SyncError>
    where
        S: StorageSlot,
        R: RemoteEventService,
    {
        if self.in_flight {
            debug!("drain trigger ignored: pass already in flight");
            return Ok(DrainOutcome::Busy);
        }
        if queue.is_empty() {
            return Ok(DrainOutcome::Empty);
        }

        self.in_flight = true;
        let result = Self::apply_all(queue.items(), remote).await;
        self.in_flight = false;

        match result {
            Ok(count) => {
                queue.clear()?;
                self.last_drain_at = Some(Utc::now());
                debug!(count, "sync queue drained");
                Ok(DrainOutcome::Drained(count))
            }
            Err(e) => {
                warn!(error = %e, pending = queue.len(), "drain aborted; queue preserved for retry");
                Err(e)
            }
        }
    }

    async fn apply_all<R: RemoteEventService>(
        items: &[SyncOp],
        remote: &R,
    ) -> Result<usize, SyncError> {
        let mut applied = 0;
        for op in items {
            match op {
                SyncOp::Insert { payload, .. } => {
                    // The remote store assigns its own identity; the local
                    // temporary id never leaves the process.
                    remote.insert(payload).await?;
                }
                SyncOp::Update { event_id, payload } => {
                    remote.update(*event_id, payload).await?;
                }
                SyncOp::Delete { event_id } => {
                    remote.delete(*event_id).await?;
                }
            }
            applied += 1;
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ClockTime, EventPayload};
    use crate::storage::slot::MemorySlot;
    use crate::sync::remote::InMemoryRemote;

    fn payload(text: &str) -> EventPayload {
        EventPayload {
            date: "2024-06-10".parse().unwrap(),
            start: ClockTime::new(9, 0).unwrap(),
            end: ClockTime::new(10, 0),
            text: text.to_string(),
            client_id: None,
        }
    }

    fn queue_with(ops: Vec<SyncOp>) -> SyncQueue<MemorySlot> {
        let mut q = SyncQueue::open(MemorySlot::new("sync_queue")).unwrap();
        for op in ops {
            q.push(op).unwrap();
        }
        q
    }

    #[tokio::test]
    async fn test_empty_queue_is_a_noop() {
        let mut reconciler = SyncReconciler::new();
        let mut q = queue_with(vec![]);
        let remote = InMemoryRemote::new();

        let outcome = reconciler.drain(&mut q, &remote).await.unwrap();
        assert_eq!(outcome, DrainOutcome::Empty);
        assert_eq!(remote.call_count(), 0);
        assert!(reconciler.last_drain_at().is_none());
    }

    #[tokio::test]
    async fn test_successful_drain_clears_queue_in_order() {
        let mut reconciler = SyncReconciler::new();
        let mut q = queue_with(vec![
            SyncOp::Insert {
                event_id: 1718000000000,
                payload: payload("a"),
            },
            SyncOp::Insert {
                event_id: 1718000000001,
                payload: payload("b"),
            },
        ]);
        let remote = InMemoryRemote::new();

        let outcome = reconciler.drain(&mut q, &remote).await.unwrap();
        assert_eq!(outcome, DrainOutcome::Drained(2));
        assert!(q.is_empty());
        assert!(reconciler.last_drain_at().is_some());

        let rows = remote.rows();
        assert_eq!(rows.len(), 2);
        // Remote ids are the store's own, not the local temporaries.
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].text, "a");
        assert_eq!(rows[1].text, "b");
    }

    #[tokio::test]
    async fn test_failure_preserves_entire_queue() {
        let mut reconciler = SyncReconciler::new();
        let mut q = queue_with(vec![
            SyncOp::Insert {
                event_id: 10,
                payload: payload("a"),
            },
            SyncOp::Delete { event_id: 99 },
        ]);
        let remote = InMemoryRemote::new();
        remote.set_failing(true);

        let result = reconciler.drain(&mut q, &remote).await;
        assert!(result.is_err());
        // No partial removal: both items still pending.
        assert_eq!(q.len(), 2);
        assert!(!reconciler.in_flight());

        // Next trigger retries the whole batch.
        remote.set_failing(false);
        let outcome = reconciler.drain(&mut q, &remote).await.unwrap();
        assert_eq!(outcome, DrainOutcome::Drained(2));
        assert!(q.is_empty());
    }
}
