//! Connectivity port.
//!
//! The core never asks the network directly whether it is up; it asks
//! this capability. Tests flip a flag, deployments plug in whatever
//! signal the platform provides. The offline-to-online transition is
//! delivered by the caller invoking the scheduler's `reconnect`
//! trigger, keeping "connectivity changed" separate from "a drain
//! happens now".

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Boolean "online" predicate.
pub trait Connectivity {
    fn is_online(&self) -> bool;
}

/// Connectivity source that always reports online. The immediate remote
/// write then probes the network for real: a failed write lands in the
/// sync queue exactly as it would when known-offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeOnline;

impl Connectivity for AssumeOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// Shared connectivity flag, flippable from outside the core. Used by
/// tests to simulate offline/online transitions deterministically, and
/// usable by hosts that receive a platform connectivity signal.
#[derive(Debug, Clone, Default)]
pub struct SharedConnectivity {
    online: Arc<AtomicBool>,
}

impl SharedConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl Connectivity for SharedConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_connectivity_flips() {
        let conn = SharedConnectivity::new(false);
        let handle = conn.clone();
        assert!(!conn.is_online());

        handle.set_online(true);
        assert!(conn.is_online());
    }
}
