//! The scheduled-visit entity and its field types.
//!
//! `Event` is the one entity the core owns. Locally created events carry a
//! temporary numeric id (millisecond creation timestamp) and `is_local: true`
//! until the remote store has confirmed them; the remote copy then becomes
//! the source of truth on the next refresh.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A wall-clock time of day (hour 0-23, minute 0-59).
///
/// Serialized as `"HH:MM"` everywhere -- cache snapshots and the remote
/// wire format use the same canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Create a time of day, rejecting out-of-range components.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    /// Parse an `"HH:MM"` string. `"HH:MM:SS"` is tolerated (seconds
    /// dropped) since some table stores emit it.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.splitn(3, ':');
        let hour: u8 = parts.next()?.parse().ok()?;
        let minute: u8 = parts.next()?.parse().ok()?;
        Self::new(hour, minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> String {
        t.to_string()
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ClockTime::parse(&s).ok_or_else(|| format!("invalid time of day: {s:?}"))
    }
}

/// A scheduled visit.
///
/// `date` is a plain calendar date (`NaiveDate` serializes as
/// `YYYY-MM-DD`), never a timestamp -- no timezone can shift it during
/// serialization. `end` is optional for backward compatibility with
/// legacy single-time records; comparisons give those a one-hour
/// default duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub date: NaiveDate,
    pub start: ClockTime,
    pub end: Option<ClockTime>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub client_id: Option<i64>,
    /// True while the event exists only in the local cache/queue and the
    /// remote store has not confirmed it.
    #[serde(default)]
    pub is_local: bool,
}

impl Event {
    /// Temporary id for a locally created event, derived from the
    /// creation timestamp. Replaced by the remote store's id on the
    /// first successful refresh after sync.
    pub fn local_id() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// The remote field set -- everything except the local-only
    /// bookkeeping (`id`, `is_local`).
    pub fn payload(&self) -> EventPayload {
        EventPayload {
            date: self.date,
            start: self.start,
            end: self.end,
            text: self.text.clone(),
            client_id: self.client_id,
        }
    }
}

/// Field set sent to the remote store for inserts and updates.
///
/// Deliberately excludes `id` and `is_local`: the remote store assigns
/// its own identity, and `is_local` is bookkeeping it never sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    pub date: NaiveDate,
    pub start: ClockTime,
    pub end: Option<ClockTime>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub client_id: Option<i64>,
}

impl EventPayload {
    /// Materialize as a full event under the given local identity.
    pub fn into_event(self, id: i64, is_local: bool) -> Event {
        Event {
            id,
            date: self.date,
            start: self.start,
            end: self.end,
            text: self.text,
            client_id: self.client_id,
            is_local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_time_bounds() {
        assert!(ClockTime::new(23, 59).is_some());
        assert!(ClockTime::new(0, 0).is_some());
        assert!(ClockTime::new(24, 0).is_none());
        assert!(ClockTime::new(12, 60).is_none());
    }

    #[test]
    fn test_clock_time_parse_and_display() {
        let t = ClockTime::parse("09:05").unwrap();
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 5);
        assert_eq!(t.to_string(), "09:05");

        // Seconds from the wire are tolerated.
        assert_eq!(ClockTime::parse("14:30:00"), ClockTime::new(14, 30));

        assert!(ClockTime::parse("25:00").is_none());
        assert!(ClockTime::parse("garbage").is_none());
    }

    #[test]
    fn test_clock_time_minutes() {
        assert_eq!(ClockTime::new(0, 0).unwrap().minutes(), 0);
        assert_eq!(ClockTime::new(23, 30).unwrap().minutes(), 1410);
    }

    #[test]
    fn test_event_serializes_canonical_date_and_times() {
        let event = Event {
            id: 7,
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            start: ClockTime::new(9, 0).unwrap(),
            end: ClockTime::new(10, 30),
            text: "roach treatment".to_string(),
            client_id: Some(3),
            is_local: true,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["date"], "2024-06-10");
        assert_eq!(json["start"], "09:00");
        assert_eq!(json["end"], "10:30");

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_payload_excludes_local_bookkeeping() {
        let event = Event {
            id: 42,
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            start: ClockTime::new(8, 0).unwrap(),
            end: None,
            text: "inspection".to_string(),
            client_id: None,
            is_local: true,
        };

        let json = serde_json::to_value(event.payload()).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("is_local").is_none());
    }
}
