//! Double-booking detection for candidate appointments.
//!
//! Pure and side-effect-free: callers re-run the check against the
//! latest store contents before every mutation attempt, nothing is
//! cached here.

use chrono::{DateTime, Local, NaiveDate, Timelike};

use crate::error::ValidationError;
use crate::event::{ClockTime, Event};
use crate::schedule::time::{TimeRange, MAX_OVERNIGHT_SPAN_MIN};

/// A proposed appointment slot, before it becomes an [`Event`].
///
/// `exclude_event_id` carries the id of the event being edited so an
/// update does not conflict with itself.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub date: NaiveDate,
    pub start: ClockTime,
    pub end: Option<ClockTime>,
    pub exclude_event_id: Option<i64>,
}

impl Candidate {
    fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

/// True if any existing event on the candidate's calendar day overlaps
/// the candidate's normalized range.
pub fn check_conflict(candidate: &Candidate, existing: &[Event]) -> bool {
    let range = candidate.range();
    existing
        .iter()
        .filter(|e| e.date == candidate.date)
        .filter(|e| Some(e.id) != candidate.exclude_event_id)
        .any(|e| range.overlaps(&TimeRange::new(e.start, e.end)))
}

/// Full pre-mutation validation, in order: past-dated rejection, the
/// overnight-span policy, then the overlap check.
pub fn validate(
    candidate: &Candidate,
    existing: &[Event],
    now: DateTime<Local>,
) -> Result<(), ValidationError> {
    let today = now.date_naive();
    let start_secs = candidate.start.minutes() * 60;
    let in_past = candidate.date < today
        || (candidate.date == today && start_secs < now.time().num_seconds_from_midnight());
    if in_past {
        return Err(ValidationError::InPast {
            date: candidate.date,
            start: candidate.start,
        });
    }

    // overnight_span is only Some when an end time exists
    if let (Some(span), Some(end)) = (candidate.range().overnight_span(), candidate.end) {
        if span > MAX_OVERNIGHT_SPAN_MIN {
            return Err(ValidationError::EndPrecedesStart {
                start: candidate.start,
                end,
            });
        }
    }

    if check_conflict(candidate, existing) {
        return Err(ValidationError::Overlap {
            date: candidate.date,
        });
    }

    Ok(())
}
