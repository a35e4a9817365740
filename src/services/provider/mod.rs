//! Calendar data provider boundary.
//!
//! The calendar never owns persistence: it renders whatever event list the
//! provider hands back for the visible range. Caching and invalidation are
//! the provider's concern.

use anyhow::Result;
use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;

use crate::models::event::Event;

/// Supplies events for a visible date range.
#[cfg_attr(test, automock)]
pub trait CalendarDataProvider {
    /// Fetch events whose interval intersects `[from, to]` (inclusive days).
    fn fetch_events(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Event>>;
}

/// Provider over a fixed event list; used by the demo app and tests.
#[derive(Debug, Default)]
pub struct StaticProvider {
    events: Vec<Event>,
}

impl StaticProvider {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }
}

impl CalendarDataProvider for StaticProvider {
    fn fetch_events(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Event>> {
        Ok(self
            .events
            .iter()
            .filter(|event| event.start.date_naive() <= to && event.end.date_naive() >= from)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_static_provider_filters_by_range() {
        let june = |day: u32, hour: u32| Local.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap();
        let provider = StaticProvider::new(vec![
            Event::new("task-1", "In range", june(10, 9), june(10, 10)).unwrap(),
            Event::new("task-2", "Out of range", june(25, 9), june(25, 10)).unwrap(),
        ]);

        let fetched = provider
            .fetch_events(june(8, 0).date_naive(), june(14, 0).date_naive())
            .unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id, "task-1");
    }

    #[test]
    fn test_mock_provider_is_injectable() {
        let mut mock = MockCalendarDataProvider::new();
        mock.expect_fetch_events().returning(|_, _| Ok(Vec::new()));

        let from = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let to = chrono::NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert!(mock.fetch_events(from, to).unwrap().is_empty());
    }
}
