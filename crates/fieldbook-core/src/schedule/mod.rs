//! Appointment-slot logic: time ranges and double-booking detection.

pub mod conflict;
pub mod time;

pub use conflict::{check_conflict, validate, Candidate};
pub use time::{TimeRange, DEFAULT_DURATION_MIN, MAX_OVERNIGHT_SPAN_MIN, MINUTES_PER_DAY};
