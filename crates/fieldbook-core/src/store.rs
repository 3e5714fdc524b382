//! In-memory event collection for the session.
//!
//! The authoritative in-process view. Every mutation is synchronous and
//! visible to `query` before any network operation resolves -- that is
//! the optimistic-update contract the rest of the core builds on.

use chrono::NaiveDate;

use crate::event::Event;

/// Canonical in-process collection of scheduled visits.
///
/// Enumeration order is ascending by date with ties kept in insertion
/// order (stable re-sort after each mutation). Display order only; not
/// something callers may use for equality.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert if the id is new, replace in place if it exists, then
    /// re-sort by date.
    pub fn upsert(&mut self, event: Event) {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => *slot = event,
            None => self.events.push(event),
        }
        self.events.sort_by_key(|e| e.date);
    }

    /// Delete by id. No-op if absent.
    pub fn remove(&mut self, id: i64) {
        self.events.retain(|e| e.id != id);
    }

    /// All events on a calendar day, in enumeration order.
    pub fn query(&self, date: NaiveDate) -> Vec<Event> {
        self.events.iter().filter(|e| e.date == date).cloned().collect()
    }

    pub fn get(&self, id: i64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Full contents, for snapshotting and conflict checks.
    pub fn all(&self) -> &[Event] {
        &self.events
    }

    /// Replace the whole collection (cold-start load, remote refresh).
    pub fn replace_all(&mut self, events: Vec<Event>) {
        self.events = events;
        self.events.sort_by_key(|e| e.date);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
