//! Local event cache.
//!
//! The single piece of mutable shared state in the calendar: layout reads
//! it every frame, drag commits write it, undo writes it, and persistence
//! failures roll it back. Writes are last-writer-wins at the granularity of
//! one event's interval fields; only one drag session can be active at a
//! time, so no finer locking exists.
//!
//! The mutation coordinator depends on the [`EventStore`] trait rather than
//! the concrete cache, so tests (and any future query-cache backing) can
//! inject their own.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::event::Event;
use crate::models::interval::TimeInterval;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no event with id {0}")]
    UnknownEvent(String),
}

/// Read/replace/revert surface over the local cache.
pub trait EventStore {
    fn get(&self, event_id: &str) -> Option<&Event>;

    /// Replace one event's interval fields, returning the previous
    /// interval as a rollback snapshot.
    fn replace_interval(
        &mut self,
        event_id: &str,
        interval: TimeInterval,
    ) -> Result<TimeInterval, StoreError>;
}

/// In-memory cache of the visible range's events.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: Vec<Event>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole cache, e.g. after fetching a new visible range.
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events whose stored interval intersects `date`.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|event| {
                event.start.date_naive() <= date && event.end.date_naive() >= date
            })
            .collect()
    }
}

impl EventStore for MemoryEventStore {
    fn get(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.id == event_id)
    }

    fn replace_interval(
        &mut self,
        event_id: &str,
        interval: TimeInterval,
    ) -> Result<TimeInterval, StoreError> {
        let event = self
            .events
            .iter_mut()
            .find(|event| event.id == event_id)
            .ok_or_else(|| StoreError::UnknownEvent(event_id.to_string()))?;

        let previous = event.interval();
        event.set_interval(interval);
        Ok(previous)
    }
}
