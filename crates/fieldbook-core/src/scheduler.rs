//! The offline-first scheduling front door.
//!
//! `Scheduler` wires the conflict detector, the in-memory store, the
//! durable cache, the sync queue and the reconciler together and owns
//! the mutation control flow: validate, apply optimistically, snapshot
//! the cache, then deal with the network -- immediately when online,
//! through the queue otherwise. A mutation never waits on, and never
//! fails because of, the remote store.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::error::{CoreError, Result};
use crate::event::{ClockTime, Event};
use crate::schedule::{validate, Candidate};
use crate::storage::{PersistentCache, StorageSlot};
use crate::store::EventStore;
use crate::sync::{
    Connectivity, DrainOutcome, RemoteEventService, SyncOp, SyncQueue, SyncReconciler, SyncStatus,
};

/// User-supplied fields for a new or edited visit.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub date: NaiveDate,
    pub start: ClockTime,
    pub end: Option<ClockTime>,
    pub text: String,
    pub client_id: Option<i64>,
}

/// How a cold start resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Cache baseline loaded, then refreshed from the remote store.
    Fresh,
    /// Remote unavailable; serving possibly-stale cached data. Callers
    /// should tell the user once, not on every subsequent mutation.
    OfflineCache,
}

/// Offline-first scheduling core for one user session.
pub struct Scheduler<R, C, S>
where
    R: RemoteEventService,
    C: Connectivity,
    S: StorageSlot,
{
    store: EventStore,
    cache: PersistentCache<S>,
    queue: SyncQueue<S>,
    reconciler: SyncReconciler,
    remote: R,
    connectivity: C,
    offline_fallback: bool,
}

impl<R, C, S> Scheduler<R, C, S>
where
    R: RemoteEventService,
    C: Connectivity,
    S: StorageSlot,
{
    /// Wire up a scheduler over the two durable slots. The queue is
    /// restored immediately so pending operations survive a restart;
    /// events are not loaded until [`Scheduler::load`].
    pub fn new(remote: R, connectivity: C, events_slot: S, queue_slot: S) -> Result<Self> {
        Ok(Self {
            store: EventStore::new(),
            cache: PersistentCache::new(events_slot),
            queue: SyncQueue::open(queue_slot)?,
            reconciler: SyncReconciler::new(),
            remote,
            connectivity,
            offline_fallback: false,
        })
    }

    /// Cold start: cache first as the offline-safe baseline, then a
    /// startup drain of any queued operations, then a best-effort remote
    /// refresh. If the remote is unreachable the cache stays
    /// authoritative.
    pub async fn load(&mut self) -> Result<LoadOutcome> {
        let cached = self.cache.load()?;
        info!(events = cached.len(), "loaded event snapshot from cache");
        self.store.replace_all(cached);

        if !self.connectivity.is_online() {
            self.offline_fallback = true;
            return Ok(LoadOutcome::OfflineCache);
        }

        // Startup drain trigger. A failed drain means the remote is not
        // reachable in practice; skip the refresh so pending local state
        // is not clobbered, and stay on the cache.
        match self.reconciler.drain(&mut self.queue, &self.remote).await {
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "startup drain failed; staying on cached data");
                self.offline_fallback = true;
                return Ok(LoadOutcome::OfflineCache);
            }
        }

        match self.refresh_from_remote().await {
            Ok(()) => {
                self.offline_fallback = false;
                Ok(LoadOutcome::Fresh)
            }
            Err(e) => {
                warn!(error = %e, "remote refresh failed; staying on cached data");
                self.offline_fallback = true;
                Ok(LoadOutcome::OfflineCache)
            }
        }
    }

    /// Create a visit. Validation happens against the latest store
    /// contents; the event is visible to [`Scheduler::events_on`] before
    /// any network activity.
    pub async fn create_event(&mut self, draft: EventDraft) -> Result<Event> {
        let candidate = Candidate {
            date: draft.date,
            start: draft.start,
            end: draft.end,
            exclude_event_id: None,
        };
        validate(&candidate, self.store.all(), Local::now())?;

        let event = Event {
            id: Event::local_id(),
            date: draft.date,
            start: draft.start,
            end: draft.end,
            text: draft.text,
            client_id: draft.client_id,
            is_local: true,
        };

        self.store.upsert(event.clone());
        self.cache.save(self.store.all())?;

        self.send_or_enqueue(SyncOp::Insert {
            event_id: event.id,
            payload: event.payload(),
        })
        .await?;

        Ok(event)
    }

    /// Edit a visit. The event being edited is excluded from its own
    /// conflict check.
    pub async fn update_event(&mut self, id: i64, draft: EventDraft) -> Result<Event> {
        let existing = self.store.get(id).ok_or(CoreError::UnknownEvent(id))?;
        let is_local = existing.is_local;

        let candidate = Candidate {
            date: draft.date,
            start: draft.start,
            end: draft.end,
            exclude_event_id: Some(id),
        };
        validate(&candidate, self.store.all(), Local::now())?;

        let event = Event {
            id,
            date: draft.date,
            start: draft.start,
            end: draft.end,
            text: draft.text,
            client_id: draft.client_id,
            is_local,
        };

        self.store.upsert(event.clone());
        self.cache.save(self.store.all())?;

        self.send_or_enqueue(SyncOp::Update {
            event_id: id,
            payload: event.payload(),
        })
        .await?;

        Ok(event)
    }

    /// Delete a visit. Idempotent locally; the id is never reused.
    pub async fn delete_event(&mut self, id: i64) -> Result<()> {
        self.store.remove(id);
        self.cache.save(self.store.all())?;

        self.send_or_enqueue(SyncOp::Delete { event_id: id }).await
    }

    /// Connectivity-restored trigger: drain the queue, then refresh from
    /// the remote store to pick up server-assigned ids. Transient
    /// failures are logged and absorbed -- the queue is preserved and
    /// the next trigger retries the whole batch.
    pub async fn reconnect(&mut self) -> Result<DrainOutcome> {
        if !self.connectivity.is_online() {
            return Ok(DrainOutcome::Offline);
        }

        match self.reconciler.drain(&mut self.queue, &self.remote).await {
            Ok(outcome @ (DrainOutcome::Drained(_) | DrainOutcome::Empty)) => {
                match self.refresh_from_remote().await {
                    Ok(()) => {
                        self.offline_fallback = false;
                        Ok(outcome)
                    }
                    Err(e) => {
                        warn!(error = %e, "post-drain refresh failed");
                        self.offline_fallback = true;
                        Ok(outcome)
                    }
                }
            }
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(error = %e, "reconnect drain failed; will retry on next trigger");
                Ok(DrainOutcome::Failed)
            }
        }
    }

    /// All events on a calendar day, for display and conflict checks.
    pub fn events_on(&self, date: NaiveDate) -> Vec<Event> {
        self.store.query(date)
    }

    /// The whole collection in display order.
    pub fn events(&self) -> &[Event] {
        self.store.all()
    }

    pub fn get(&self, id: i64) -> Option<&Event> {
        self.store.get(id)
    }

    /// Current sync state, for status surfaces.
    pub fn sync_status(&self) -> SyncStatus {
        SyncStatus {
            last_drain_at: self.reconciler.last_drain_at(),
            pending_count: self.queue.len(),
            in_progress: self.reconciler.in_flight(),
            offline_fallback: self.offline_fallback,
        }
    }

    /// Immediate remote write when online, queue otherwise. A failed
    /// immediate write is logged and enqueued, never surfaced -- the
    /// local mutation has already succeeded.
    ///
    /// Operations on an event whose insert is still queued always go
    /// through the queue: the remote store has never seen the temporary
    /// id, and the coalescing rules collapse them into the pending
    /// insert.
    async fn send_or_enqueue(&mut self, op: SyncOp) -> Result<()> {
        if self.queue.has_pending_insert(op.event_id()) || !self.connectivity.is_online() {
            self.queue.push(op)?;
            return Ok(());
        }

        let attempt = match &op {
            SyncOp::Insert { payload, .. } => {
                self.remote.insert(payload).await.map(|_| ())
            }
            SyncOp::Update { event_id, payload } => self.remote.update(*event_id, payload).await,
            SyncOp::Delete { event_id } => self.remote.delete(*event_id).await,
        };

        if let Err(e) = attempt {
            warn!(error = %e, event_id = op.event_id(), "remote write failed; queued for sync");
            self.queue.push(op)?;
        }
        Ok(())
    }

    async fn refresh_from_remote(&mut self) -> Result<()> {
        let records = self.remote.fetch_all().await?;
        let events = records
            .into_iter()
            .map(|r| r.decode())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.store.replace_all(events);
        self.cache.save(self.store.all())?;
        Ok(())
    }
}
