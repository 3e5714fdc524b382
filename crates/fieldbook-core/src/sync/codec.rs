//! Wire codec for the remote `events` table.
//!
//! Remote records use string fields (`YYYY-MM-DD` dates, `HH:MM` times)
//! and have drifted over the years: some rows carry a bare `time`
//! instead of `start_time`, and old single-time rows have no `end_time`
//! at all. All of that is migrated to the canonical [`Event`] shape
//! here, once, on read -- never in business logic.

use serde::{Deserialize, Serialize};

use crate::event::{ClockTime, Event, EventPayload};
use crate::sync::types::SyncError;

/// A row of the remote `events` table, as the service returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Legacy field name for the start time on pre-migration rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub client_id: Option<i64>,
}

impl EventRecord {
    /// Decode into the canonical event type. Remote rows are by
    /// definition confirmed, so `is_local` is false.
    pub fn decode(self) -> Result<Event, SyncError> {
        let date = self
            .date
            .parse()
            .map_err(|_| SyncError::MalformedRecord(format!("bad date {:?}", self.date)))?;

        let start_str = self
            .start_time
            .as_deref()
            .or(self.time.as_deref())
            .ok_or_else(|| {
                SyncError::MalformedRecord(format!("record {} has no start time", self.id))
            })?;
        let start = ClockTime::parse(start_str)
            .ok_or_else(|| SyncError::MalformedRecord(format!("bad time {start_str:?}")))?;

        // A malformed end time is dropped rather than rejected; the
        // one-hour default covers it, same as a missing one.
        let end = self.end_time.as_deref().and_then(ClockTime::parse);

        Ok(Event {
            id: self.id,
            date,
            start,
            end,
            text: self.text,
            client_id: self.client_id,
            is_local: false,
        })
    }
}

/// Encode a payload as the remote field set (no `id`, no `is_local`).
pub fn encode_payload(payload: &EventPayload) -> serde_json::Value {
    serde_json::json!({
        "date": payload.date.to_string(),
        "start_time": payload.start.to_string(),
        "end_time": payload.end.map(|t| t.to_string()),
        "text": payload.text,
        "client_id": payload.client_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_current_schema() {
        let record: EventRecord = serde_json::from_value(serde_json::json!({
            "id": 101,
            "date": "2024-06-10",
            "start_time": "09:00",
            "end_time": "10:30",
            "text": "quarterly service",
            "client_id": 7
        }))
        .unwrap();

        let event = record.decode().unwrap();
        assert_eq!(event.id, 101);
        assert_eq!(event.date.to_string(), "2024-06-10");
        assert_eq!(event.start.to_string(), "09:00");
        assert_eq!(event.end.unwrap().to_string(), "10:30");
        assert!(!event.is_local);
    }

    #[test]
    fn test_decode_legacy_bare_time_field() {
        let record: EventRecord = serde_json::from_value(serde_json::json!({
            "id": 55,
            "date": "2023-01-05",
            "time": "14:00",
            "text": "old record"
        }))
        .unwrap();

        let event = record.decode().unwrap();
        assert_eq!(event.start.to_string(), "14:00");
        assert_eq!(event.end, None);
    }

    #[test]
    fn test_start_time_wins_over_legacy_time() {
        let record: EventRecord = serde_json::from_value(serde_json::json!({
            "id": 56,
            "date": "2023-01-05",
            "start_time": "15:00",
            "time": "14:00"
        }))
        .unwrap();

        assert_eq!(record.decode().unwrap().start.to_string(), "15:00");
    }

    #[test]
    fn test_decode_rejects_missing_start() {
        let record: EventRecord = serde_json::from_value(serde_json::json!({
            "id": 57,
            "date": "2023-01-05"
        }))
        .unwrap();

        assert!(matches!(
            record.decode(),
            Err(SyncError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_encode_payload_field_names() {
        let payload = EventPayload {
            date: "2024-06-10".parse().unwrap(),
            start: ClockTime::new(9, 0).unwrap(),
            end: None,
            text: "ant treatment".to_string(),
            client_id: Some(3),
        };

        let json = encode_payload(&payload);
        assert_eq!(json["date"], "2024-06-10");
        assert_eq!(json["start_time"], "09:00");
        assert_eq!(json["end_time"], serde_json::Value::Null);
        assert_eq!(json["client_id"], 3);
        assert!(json.get("id").is_none());
    }
}
