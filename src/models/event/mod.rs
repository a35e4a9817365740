// Event module
// Schedulable calendar item backed by a quest or an external calendar

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::interval::TimeInterval;

/// Where an event comes from, which controls mutability.
///
/// Only `Native` events (quest-backed) may be dragged, resized or deleted
/// through the calendar; `External` events are read-only passthrough from a
/// synced calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Native,
    External,
}

/// Event id for a quest-backed event, `task-{id}`.
pub fn task_event_id(task_id: i64) -> String {
    format!("task-{}", task_id)
}

/// Event id for an externally synced event, e.g. `google-{id}`.
pub fn external_event_id(namespace: &str, external_id: &str) -> String {
    format!("{}-{}", namespace, external_id)
}

/// Calendar event displayed on the day strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub source: EventSource,
    pub completed: bool,
    /// Persisted duration in minutes. Usually `end - start`, but stored
    /// independently because the backend schedules by start + duration,
    /// and may hold values below the layout minimum.
    pub duration_minutes: i64,
    pub color: Option<String>,
    pub importance: Option<String>,
}

impl Event {
    /// Create a native event with required fields.
    ///
    /// # Arguments
    /// * `id` - Opaque event identifier (see [`task_event_id`])
    /// * `title` - Event title (required, non-empty)
    /// * `start` - Event start time
    /// * `end` - Event end time
    ///
    /// # Examples
    /// ```
    /// use quest_calendar::models::event::{task_event_id, Event};
    /// use chrono::Local;
    ///
    /// let start = Local::now();
    /// let end = start + chrono::Duration::minutes(30);
    /// let event = Event::new(task_event_id(7), "Slay the inbox", start, end).unwrap();
    /// assert_eq!(event.duration_minutes, 30);
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Self, String> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            source: EventSource::Native,
            completed: false,
            duration_minutes: (end - start).num_minutes(),
            color: None,
            importance: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields.
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Event id cannot be empty".to_string());
        }

        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        if self.end <= self.start {
            return Err("Event end time must be after start time".to_string());
        }

        if self.duration_minutes <= 0 {
            return Err("Event duration must be positive".to_string());
        }

        // Validate color format if present (should be hex color)
        if let Some(ref color) = self.color {
            if !color.starts_with('#') || (color.len() != 7 && color.len() != 4) {
                return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
            }
        }

        Ok(())
    }

    pub fn is_native(&self) -> bool {
        self.source == EventSource::Native
    }

    /// The stored `[start, end)` span.
    pub fn interval(&self) -> TimeInterval {
        TimeInterval {
            start: self.start,
            end: self.end,
        }
    }

    /// Replace the stored span, keeping `duration_minutes` in step.
    pub fn set_interval(&mut self, interval: TimeInterval) {
        self.start = interval.start;
        self.end = interval.end;
        self.duration_minutes = interval.duration_minutes();
    }
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    id: Option<String>,
    title: Option<String>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    source: EventSource,
    completed: bool,
    duration_minutes: Option<i64>,
    color: Option<String>,
    importance: Option<String>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            start: None,
            end: None,
            source: EventSource::Native,
            completed: false,
            duration_minutes: None,
            color: None,
            importance: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn source(mut self, source: EventSource) -> Self {
        self.source = source;
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Override the persisted duration (may be shorter than `end - start`).
    pub fn duration_minutes(mut self, minutes: i64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn importance(mut self, importance: impl Into<String>) -> Self {
        self.importance = Some(importance.into());
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, String> {
        let id = self.id.ok_or("Event id is required")?;
        let title = self.title.ok_or("Event title is required")?;
        let start = self.start.ok_or("Event start time is required")?;
        let end = self.end.ok_or("Event end time is required")?;

        let event = Event {
            id,
            title,
            start,
            end,
            source: self.source,
            completed: self.completed,
            duration_minutes: self
                .duration_minutes
                .unwrap_or_else(|| (end - start).num_minutes()),
            color: self.color,
            importance: self.importance,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_start() -> DateTime<Local> {
        Local::now()
    }

    fn sample_end() -> DateTime<Local> {
        Local::now() + Duration::hours(1)
    }

    #[test]
    fn test_new_event_success() {
        let start = sample_start();
        let end = sample_end();
        let result = Event::new("task-1", "Daily standup", start, end);

        assert!(result.is_ok());
        let event = result.unwrap();
        assert_eq!(event.id, "task-1");
        assert_eq!(event.title, "Daily standup");
        assert_eq!(event.source, EventSource::Native);
        assert!(!event.completed);
        assert_eq!(event.duration_minutes, 60);
    }

    #[test]
    fn test_new_event_empty_title() {
        let result = Event::new("task-1", "", sample_start(), sample_end());
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Event title cannot be empty");
    }

    #[test]
    fn test_new_event_empty_id() {
        let result = Event::new("  ", "Standup", sample_start(), sample_end());
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Event id cannot be empty");
    }

    #[test]
    fn test_new_event_invalid_times() {
        let start = sample_start();
        let end = start - Duration::hours(1);
        let result = Event::new("task-1", "Standup", start, end);

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err(),
            "Event end time must be after start time"
        );
    }

    #[test]
    fn test_task_event_id_convention() {
        assert_eq!(task_event_id(42), "task-42");
    }

    #[test]
    fn test_external_event_id_convention() {
        assert_eq!(external_event_id("google", "abc123"), "google-abc123");
    }

    #[test]
    fn test_builder_with_optional_fields() {
        let start = sample_start();
        let end = sample_end();

        let event = Event::builder()
            .id(external_event_id("google", "xyz"))
            .title("Dentist")
            .start(start)
            .end(end)
            .source(EventSource::External)
            .color("#FF5733")
            .importance("high")
            .build()
            .unwrap();

        assert_eq!(event.id, "google-xyz");
        assert!(!event.is_native());
        assert_eq!(event.color, Some("#FF5733".to_string()));
        assert_eq!(event.importance, Some("high".to_string()));
    }

    #[test]
    fn test_builder_missing_id() {
        let result = Event::builder()
            .title("Standup")
            .start(sample_start())
            .end(sample_end())
            .build();

        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Event id is required");
    }

    #[test]
    fn test_builder_stored_duration_can_be_shorter() {
        let start = sample_start();
        let event = Event::builder()
            .id("task-9")
            .title("Quick log")
            .start(start)
            .end(start + Duration::minutes(5))
            .duration_minutes(2)
            .build()
            .unwrap();

        assert_eq!(event.duration_minutes, 2);
        assert_eq!(event.interval().duration_minutes(), 5);
    }

    #[test]
    fn test_validate_invalid_color() {
        let mut event = Event::new("task-1", "Standup", sample_start(), sample_end()).unwrap();
        event.color = Some("red".to_string());

        let result = event.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("hex format"));
    }

    #[test]
    fn test_set_interval_updates_duration() {
        let mut event = Event::new("task-1", "Standup", sample_start(), sample_end()).unwrap();
        let start = sample_start();
        let interval = TimeInterval::new(start, start + Duration::minutes(30)).unwrap();

        event.set_interval(interval);
        assert_eq!(event.start, interval.start);
        assert_eq!(event.end, interval.end);
        assert_eq!(event.duration_minutes, 30);
    }
}
