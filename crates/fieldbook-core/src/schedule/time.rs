//! Time-of-day ranges with overnight ("wraparound") normalization.
//!
//! All comparisons happen in minutes-since-midnight space. A range whose
//! raw end is not after its start crosses midnight, so its effective end
//! is pushed into the next day (`+ 1440`). Intervals are half-open:
//! back-to-back visits do not overlap.

use crate::event::ClockTime;

/// Minutes in a day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Duration assumed for legacy records with no end time, and for ranges
/// that normalize to zero length.
pub const DEFAULT_DURATION_MIN: u32 = 60;

/// Longest overnight span accepted when creating an appointment. Anything
/// longer is treated as a data-entry mistake (end typed before start)
/// rather than a legitimate night service.
pub const MAX_OVERNIGHT_SPAN_MIN: u32 = 600;

/// A half-open time-of-day interval, possibly crossing midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: u32,
    end: Option<u32>,
}

impl TimeRange {
    pub fn new(start: ClockTime, end: Option<ClockTime>) -> Self {
        Self {
            start: start.minutes(),
            end: end.map(|t| t.minutes()),
        }
    }

    /// Start in minutes since midnight.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// End in minutes since midnight with the overnight extension applied.
    ///
    /// A missing end time, or a range that normalizes to zero length
    /// (start == end), falls back to the one-hour default.
    pub fn effective_end(&self) -> u32 {
        match self.end {
            None => self.start + DEFAULT_DURATION_MIN,
            Some(e) if e > self.start => e,
            Some(e) if e == self.start => self.start + DEFAULT_DURATION_MIN,
            Some(e) => e + MINUTES_PER_DAY,
        }
    }

    /// Raw overnight span in minutes, or `None` for a same-day range.
    pub fn overnight_span(&self) -> Option<u32> {
        match self.end {
            Some(e) if e <= self.start => Some(e + MINUTES_PER_DAY - self.start),
            _ => None,
        }
    }

    /// Half-open overlap test over the wrapped day.
    ///
    /// A normalized range can extend past minute 1440; its tail then
    /// occupies the early morning of the same calendar day (a visit
    /// ending at 00:30 blocks the 00:15 slot of the day it was booked
    /// on). Each side is therefore also tested shifted one day forward,
    /// which only matters when the other side wraps. Symmetric by
    /// construction.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        let (s1, e1) = (self.start(), self.effective_end());
        let (s2, e2) = (other.start(), other.effective_end());

        fn raw(s1: u32, e1: u32, s2: u32, e2: u32) -> bool {
            s1 < e2 && e1 > s2
        }

        raw(s1, e1, s2, e2)
            || raw(s1 + MINUTES_PER_DAY, e1 + MINUTES_PER_DAY, s2, e2)
            || raw(s1, e1, s2 + MINUTES_PER_DAY, e2 + MINUTES_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: (u8, u8), end: Option<(u8, u8)>) -> TimeRange {
        TimeRange::new(
            ClockTime::new(start.0, start.1).unwrap(),
            end.map(|(h, m)| ClockTime::new(h, m).unwrap()),
        )
    }

    #[test]
    fn test_plain_range() {
        let r = range((9, 0), Some((10, 30)));
        assert_eq!(r.start(), 540);
        assert_eq!(r.effective_end(), 630);
        assert_eq!(r.overnight_span(), None);
    }

    #[test]
    fn test_overnight_extends_past_midnight() {
        // 23:30 - 00:30 occupies 1410..1470, i.e. 60 minutes.
        let r = range((23, 30), Some((0, 30)));
        assert_eq!(r.effective_end(), 1470);
        assert_eq!(r.effective_end() - r.start(), 60);
        assert_eq!(r.overnight_span(), Some(60));
    }

    #[test]
    fn test_missing_end_gets_one_hour_default() {
        let r = range((14, 0), None);
        assert_eq!(r.effective_end(), 840 + 60);
    }

    #[test]
    fn test_zero_length_gets_one_hour_default() {
        let r = range((14, 0), Some((14, 0)));
        assert_eq!(r.effective_end(), 840 + 60);
    }

    #[test]
    fn test_overnight_span_policy_boundary() {
        // 22:00 - 08:00 is a 600-minute overnight span: right at the limit.
        let at_limit = range((22, 0), Some((8, 0)));
        assert_eq!(at_limit.overnight_span(), Some(600));

        // 10:00 - 09:00 looks like end typed before start: 1380 minutes.
        let mistake = range((10, 0), Some((9, 0)));
        assert!(mistake.overnight_span().unwrap() > MAX_OVERNIGHT_SPAN_MIN);
    }

    #[test]
    fn test_back_to_back_do_not_overlap() {
        let a = range((9, 0), Some((10, 0)));
        let b = range((10, 0), Some((11, 0)));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_plain_overlap() {
        let a = range((9, 0), Some((10, 0)));
        let b = range((9, 30), Some((10, 30)));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overnight_tail_blocks_early_morning() {
        // The 23:30-00:30 visit runs into the 00:15-00:45 slot.
        let night = range((23, 30), Some((0, 30)));
        let morning = range((0, 15), Some((0, 45)));
        assert!(night.overlaps(&morning));
        assert!(morning.overlaps(&night));
    }

    #[test]
    fn test_overnight_tail_does_not_block_later_morning() {
        let night = range((23, 30), Some((0, 30)));
        let later = range((0, 30), Some((1, 0)));
        assert!(!night.overlaps(&later));
        assert!(!later.overlaps(&night));
    }

    #[test]
    fn test_late_evening_clear_of_overnight_start() {
        let night = range((23, 30), Some((0, 30)));
        let evening = range((22, 0), Some((23, 30)));
        assert!(!night.overlaps(&evening));
        assert!(!evening.overlaps(&night));
    }
}
