//! Durable storage: config, keyed slots, and the event-collection cache.

mod config;
pub mod cache;
pub mod slot;

pub use cache::PersistentCache;
pub use config::{Config, RemoteConfig};
pub use slot::{FileSlot, MemorySlot, StorageSlot};

use std::path::PathBuf;

/// Fixed slot key for the event-collection snapshot.
pub const EVENTS_SLOT: &str = "events";
/// Fixed slot key for the pending sync queue.
pub const SYNC_QUEUE_SLOT: &str = "sync_queue";

/// Returns `~/.config/fieldbook[-dev]/` based on FIELDBOOK_ENV.
///
/// Set FIELDBOOK_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FIELDBOOK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("fieldbook-dev")
    } else {
        base_dir.join("fieldbook")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// File-backed slot for the event snapshot under the data directory.
pub fn events_slot() -> Result<FileSlot, std::io::Error> {
    Ok(FileSlot::new(EVENTS_SLOT, data_dir()?.join("events.json")))
}

/// File-backed slot for the sync queue under the data directory.
pub fn sync_queue_slot() -> Result<FileSlot, std::io::Error> {
    Ok(FileSlot::new(
        SYNC_QUEUE_SLOT,
        data_dir()?.join("sync_queue.json"),
    ))
}
