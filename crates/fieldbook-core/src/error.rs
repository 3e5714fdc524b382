//! Core error types for fieldbook-core.
//!
//! Validation errors are resolved at the mutation call site and never
//! propagate past it; transient remote errors are swallowed into the
//! sync queue; durable-storage failures are the only local errors
//! surfaced as hard failures.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::event::ClockTime;

/// Core error type for fieldbook-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Mutation rejected before any state change
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Durable-storage failure (cache or queue slot)
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Remote event service failure
    #[error("Sync error: {0}")]
    Sync(#[from] crate::sync::SyncError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Unknown event id passed to an update or lookup
    #[error("No event with id {0}")]
    UnknownEvent(i64),
}

/// Rejections surfaced to the user before any mutation is applied.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Appointments cannot be created in the past
    #[error("Appointment on {date} at {start} is in the past")]
    InPast { date: NaiveDate, start: ClockTime },

    /// Overnight span too long to be plausible -- end typed before start
    #[error("End time {end} cannot precede start time {start}")]
    EndPrecedesStart { start: ClockTime, end: ClockTime },

    /// Another visit already occupies the requested slot
    #[error("Time slot conflicts with an existing appointment on {date}")]
    Overlap { date: NaiveDate },
}

/// Durable-storage errors. Never masked: the optimistic-update
/// guarantee depends on the cache write succeeding.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read storage slot {name}: {source}")]
    ReadFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write storage slot {name}: {source}")]
    WriteFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt snapshot in slot {name}: {source}")]
    Corrupt {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("Missing required configuration key: {0}")]
    MissingKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
