//! Optimistic mutation coordinator.
//!
//! Makes a reschedule feel instantaneous: the local cache is updated the
//! moment a gesture commits, the persistence payload is handed to the app
//! layer for background dispatch, and a single-slot undo record is kept.
//!
//! Dispatches are tracked by ticket. Completions arrive whenever the
//! backend answers, possibly after a newer commit has superseded the
//! mutation; the cache is last-committed-wins, so only a failure of the
//! *latest* ticket for an event rolls its interval back. Stale completions
//! are ignored.

pub mod gateway;

use std::collections::HashMap;

use chrono::{DateTime, Local, NaiveDate};

use super::store::{EventStore, StoreError};
use crate::models::interval::TimeInterval;
use crate::utils::date::is_same_day;

/// Fields sent to the persistence API for one reschedule.
///
/// The backend schedules by day plus time-of-day: a same-day move touches
/// only the scheduled time and duration, while a cross-day move must also
/// carry the new due date.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScheduleUpdate {
    pub event_id: String,
    pub scheduled_start: DateTime<Local>,
    pub duration_minutes: i64,
    /// Present only when the calendar day changed.
    pub due_date: Option<NaiveDate>,
}

/// A tracked dispatch: send `update`, then report the ticket's fate back
/// through [`MutationCoordinator::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpdate {
    pub ticket: u64,
    pub update: ScheduleUpdate,
}

/// The single most-recent mutation a user can revert.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoRecord {
    pub event_id: String,
    pub previous: TimeInterval,
    pub applied: TimeInterval,
}

/// What to do with the cache if the backend rejects a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailurePolicy {
    /// Commits: revert to the pre-mutation snapshot.
    Revert,
    /// Undo: surface the failure, keep the cache as-is, no retry.
    ReportOnly,
}

#[derive(Debug)]
struct InFlight {
    event_id: String,
    snapshot: TimeInterval,
    policy: FailurePolicy,
}

/// Result of feeding a persistence completion back in.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    /// Backend accepted; the optimistic state is trusted as-is.
    Confirmed,
    /// Latest mutation for the event failed; cache reverted, undo dropped.
    RolledBack { event_id: String },
    /// A superseded mutation completed; the newer state stands either way.
    Superseded,
    /// An undo dispatch failed; reported, nothing reverted.
    UndoFailed { event_id: String },
    /// Unrecognized ticket (e.g. duplicate completion).
    Unknown,
}

/// Result of an undo request.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoOutcome {
    /// Empty slot; informational, not an error.
    NothingToUndo,
    /// Cache restored; dispatch this to persist the old interval.
    Reverted(PendingUpdate),
}

#[derive(Debug, Default)]
pub struct MutationCoordinator {
    undo: Option<UndoRecord>,
    next_ticket: u64,
    in_flight: HashMap<u64, InFlight>,
    /// Last-committed ticket per event; older tickets are stale.
    latest: HashMap<String, u64>,
}

impl MutationCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a committed gesture to the cache and return the dispatch.
    ///
    /// The new interval lands in the store before any network traffic, the
    /// undo slot is overwritten (single-slot, not a stack), and the caller
    /// dispatches the returned update in the background.
    pub fn commit(
        &mut self,
        store: &mut dyn EventStore,
        event_id: &str,
        tentative: TimeInterval,
    ) -> Result<PendingUpdate, StoreError> {
        let previous = store.replace_interval(event_id, tentative)?;

        log::info!(
            "optimistic reschedule {}: [{}] -> [{}]",
            event_id,
            previous.start.format("%a %H:%M"),
            tentative.start.format("%a %H:%M")
        );

        self.undo = Some(UndoRecord {
            event_id: event_id.to_string(),
            previous,
            applied: tentative,
        });

        let update = build_update(event_id, previous, tentative);
        Ok(self.track(event_id, previous, FailurePolicy::Revert, update))
    }

    /// Revert the most recent mutation, if any.
    ///
    /// Restores the cache immediately and clears the slot; the returned
    /// dispatch persists the restored interval in the background. A failed
    /// undo dispatch is reported but never retried or re-reverted.
    pub fn undo(&mut self, store: &mut dyn EventStore) -> Result<UndoOutcome, StoreError> {
        let Some(record) = self.undo.take() else {
            return Ok(UndoOutcome::NothingToUndo);
        };

        store.replace_interval(&record.event_id, record.previous)?;
        log::info!("undo reschedule {}", record.event_id);

        let update = build_update(&record.event_id, record.applied, record.previous);
        let pending = self.track(
            &record.event_id,
            record.applied,
            FailurePolicy::ReportOnly,
            update,
        );
        Ok(UndoOutcome::Reverted(pending))
    }

    /// Feed a persistence completion back in.
    pub fn resolve(
        &mut self,
        store: &mut dyn EventStore,
        ticket: u64,
        result: Result<(), String>,
    ) -> ResolveOutcome {
        let Some(flight) = self.in_flight.remove(&ticket) else {
            log::warn!("completion for unknown ticket {}", ticket);
            return ResolveOutcome::Unknown;
        };

        let error = match result {
            Ok(()) => {
                log::debug!("persisted {} (ticket {})", flight.event_id, ticket);
                return ResolveOutcome::Confirmed;
            }
            Err(error) => error,
        };

        if flight.policy == FailurePolicy::ReportOnly {
            log::warn!("undo persistence failed for {}: {}", flight.event_id, error);
            return ResolveOutcome::UndoFailed {
                event_id: flight.event_id,
            };
        }

        if self.latest.get(&flight.event_id) != Some(&ticket) {
            // A newer mutation owns this event's interval now; its state
            // must not be overwritten by this stale failure.
            log::debug!(
                "stale failure for {} (ticket {}) superseded",
                flight.event_id,
                ticket
            );
            return ResolveOutcome::Superseded;
        }

        log::warn!(
            "persistence failed for {}: {}; rolling back",
            flight.event_id,
            error
        );
        if let Err(store_error) = store.replace_interval(&flight.event_id, flight.snapshot) {
            // Event vanished from the cache (range refetch); nothing to roll back.
            log::warn!("rollback skipped: {}", store_error);
        }
        if self
            .undo
            .as_ref()
            .is_some_and(|record| record.event_id == flight.event_id)
        {
            self.undo = None;
        }

        ResolveOutcome::RolledBack {
            event_id: flight.event_id,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    pub fn undo_record(&self) -> Option<&UndoRecord> {
        self.undo.as_ref()
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    fn track(
        &mut self,
        event_id: &str,
        snapshot: TimeInterval,
        policy: FailurePolicy,
        update: ScheduleUpdate,
    ) -> PendingUpdate {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.latest.insert(event_id.to_string(), ticket);
        self.in_flight.insert(
            ticket,
            InFlight {
                event_id: event_id.to_string(),
                snapshot,
                policy,
            },
        );
        PendingUpdate { ticket, update }
    }
}

fn build_update(event_id: &str, previous: TimeInterval, new: TimeInterval) -> ScheduleUpdate {
    let due_date =
        (!is_same_day(previous.start, new.start)).then(|| new.start.date_naive());
    ScheduleUpdate {
        event_id: event_id.to_string(),
        scheduled_start: new.start,
        duration_minutes: new.duration_minutes(),
        due_date,
    }
}
