// Interval module
// Half-open [start, end) time span used by events and drag sessions

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

/// Minimum schedulable duration, in minutes.
///
/// Resize gestures refuse to produce anything shorter. Stored events may
/// legitimately be shorter (duration is persisted independently); the layout
/// engine clamps those up to this floor so they remain visible and clickable.
pub const MIN_EVENT_MINUTES: i64 = 5;

/// A half-open `[start, end)` span of wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl TimeInterval {
    /// Create an interval, validating `end > start`.
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Result<Self, String> {
        if end <= start {
            return Err("Interval end must be after start".to_string());
        }
        Ok(Self { start, end })
    }

    /// True if the two half-open intervals share any instant.
    ///
    /// Touching endpoints (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Shift both endpoints by `delta`, preserving duration.
    pub fn shift(&self, delta: Duration) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Extend sub-minimum intervals to [`MIN_EVENT_MINUTES`] for layout.
    ///
    /// The stored interval is untouched; only the overlap/placement math
    /// sees the clamped version.
    pub fn clamped_for_layout(&self) -> Self {
        if self.duration_minutes() < MIN_EVENT_MINUTES {
            Self {
                start: self.start,
                end: self.start + Duration::minutes(MIN_EVENT_MINUTES),
            }
        } else {
            *self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_new_rejects_reversed_interval() {
        assert!(TimeInterval::new(at(10, 0), at(9, 0)).is_err());
        assert!(TimeInterval::new(at(10, 0), at(10, 0)).is_err());
    }

    #[test]
    fn test_overlap_detection() {
        let a = TimeInterval::new(at(9, 0), at(9, 30)).unwrap();
        let b = TimeInterval::new(at(9, 15), at(9, 45)).unwrap();
        let c = TimeInterval::new(at(9, 40), at(10, 10)).unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(b.overlaps(&c));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_endpoints_do_not_overlap() {
        let a = TimeInterval::new(at(9, 0), at(10, 0)).unwrap();
        let b = TimeInterval::new(at(10, 0), at(11, 0)).unwrap();
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_shift_preserves_duration() {
        let a = TimeInterval::new(at(9, 0), at(9, 30)).unwrap();
        let shifted = a.shift(Duration::minutes(45));
        assert_eq!(shifted.start, at(9, 45));
        assert_eq!(shifted.end, at(10, 15));
        assert_eq!(shifted.duration_minutes(), 30);
    }

    #[test]
    fn test_clamp_extends_short_interval() {
        let short = TimeInterval::new(at(9, 0), at(9, 2)).unwrap();
        let clamped = short.clamped_for_layout();
        assert_eq!(clamped.duration_minutes(), MIN_EVENT_MINUTES);
        assert_eq!(clamped.start, short.start);
    }

    #[test]
    fn test_clamp_leaves_normal_interval_alone() {
        let a = TimeInterval::new(at(9, 0), at(9, 30)).unwrap();
        assert_eq!(a.clamped_for_layout(), a);
    }
}
