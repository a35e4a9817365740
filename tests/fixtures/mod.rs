// Test fixtures - reusable test data
// Provides consistent test data across all test files

#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone};

use quest_calendar::models::event::{external_event_id, task_event_id, Event, EventSource};

/// Sample instants for testing
pub mod dates {
    use super::*;

    /// Monday June 2, 2025 at the given time
    pub fn monday(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, hour, minute, 0).unwrap()
    }

    /// Tuesday June 3, 2025 at the given time
    pub fn tuesday(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 3, hour, minute, 0).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// A half-hour native quest on Monday morning
    pub fn morning_quest() -> Event {
        Event::new(
            task_event_id(1),
            "Clear the inbox",
            dates::monday(9, 0),
            dates::monday(9, 30),
        )
        .unwrap()
    }

    /// A native quest overlapping `morning_quest`
    pub fn overlapping_quest() -> Event {
        Event::new(
            task_event_id(2),
            "Write weekly report",
            dates::monday(9, 15),
            dates::monday(9, 45),
        )
        .unwrap()
    }

    /// A quest that chains onto `overlapping_quest` but not `morning_quest`
    pub fn chained_quest() -> Event {
        Event::new(
            task_event_id(3),
            "Plan the sprint",
            dates::monday(9, 40),
            dates::monday(10, 10),
        )
        .unwrap()
    }

    /// A read-only externally synced event
    pub fn external_appointment() -> Event {
        Event::builder()
            .id(external_event_id("google", "dentist-2291"))
            .title("Dentist")
            .start(dates::monday(14, 0))
            .end(dates::monday(15, 0))
            .source(EventSource::External)
            .build()
            .unwrap()
    }
}
