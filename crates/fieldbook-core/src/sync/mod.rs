//! Remote synchronization: pending-operation queue, wire codec,
//! connectivity port, and the reconciler that drains the queue.

pub mod codec;
pub mod connectivity;
pub mod queue;
pub mod reconciler;
pub mod remote;
pub mod types;

pub use codec::EventRecord;
pub use connectivity::{AssumeOnline, Connectivity, SharedConnectivity};
pub use queue::SyncQueue;
pub use reconciler::{DrainOutcome, SyncReconciler};
pub use remote::{HttpEventService, InMemoryRemote, RemoteEventService};
pub use types::{SyncError, SyncOp, SyncStatus};
