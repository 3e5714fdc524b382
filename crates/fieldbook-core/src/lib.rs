//! # Fieldbook Core Library
//!
//! Core business logic for Fieldbook, a field-service scheduler for
//! pest-control crews. Technicians book visits on a calendar and keep
//! working when connectivity drops in the field; this library owns the
//! offline-first machinery that makes that safe.
//!
//! ## Architecture
//!
//! - **Schedule**: time-of-day ranges with overnight wraparound and the
//!   double-booking conflict detector
//! - **Store**: the in-memory event collection with the optimistic-update
//!   contract
//! - **Storage**: durable keyed slots, the event-snapshot cache and TOML
//!   configuration
//! - **Sync**: the durable pending-operation queue (with append-time
//!   coalescing), the remote `events` client and the reconciler that
//!   drains the queue when connectivity returns
//! - **Scheduler**: the front door that wires all of the above into the
//!   validate -> apply -> snapshot -> sync control flow
//!
//! ## Key Components
//!
//! - [`Scheduler`]: session-level entry point for mutations and sync
//! - [`EventStore`]: canonical in-process collection
//! - [`SyncQueue`]: durable log of pending remote operations
//! - [`Config`]: application configuration management

pub mod error;
pub mod event;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod store;
pub mod sync;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use event::{ClockTime, Event, EventPayload};
pub use schedule::{check_conflict, Candidate, TimeRange};
pub use scheduler::{EventDraft, LoadOutcome, Scheduler};
pub use storage::{Config, FileSlot, MemorySlot, PersistentCache, StorageSlot};
pub use store::EventStore;
pub use sync::{
    AssumeOnline, Connectivity, DrainOutcome, EventRecord, HttpEventService, InMemoryRemote,
    RemoteEventService, SharedConnectivity, SyncError, SyncOp, SyncQueue, SyncReconciler,
    SyncStatus,
};
