//! Transport boundary for background persistence.
//!
//! The coordinator only produces [`PendingUpdate`] values; the app layer
//! pushes them through a gateway and polls completions back each frame.
//! The UI stays interactive while dispatches are outstanding.

use super::PendingUpdate;

/// Completion for one dispatched ticket.
pub type Completion = (u64, Result<(), String>);

/// Fire-and-forget dispatch plus polled completions.
pub trait PersistGateway {
    fn dispatch(&mut self, pending: PendingUpdate);

    /// Completions that arrived since the last poll, in arrival order.
    fn poll(&mut self) -> Vec<Completion>;
}

/// Gateway that acknowledges every dispatch on the next poll.
///
/// Stands in for the real backend in the demo binary; tests flip
/// `fail_all` to exercise the rollback paths.
#[derive(Debug, Default)]
pub struct InstantGateway {
    queued: Vec<u64>,
    pub fail_all: bool,
}

impl InstantGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistGateway for InstantGateway {
    fn dispatch(&mut self, pending: PendingUpdate) {
        match serde_json::to_string(&pending.update) {
            Ok(payload) => log::debug!("dispatch ticket {}: {}", pending.ticket, payload),
            Err(error) => log::warn!("unserializable update: {}", error),
        }
        self.queued.push(pending.ticket);
    }

    fn poll(&mut self) -> Vec<Completion> {
        let result: Result<(), String> = if self.fail_all {
            Err("persistence unavailable".to_string())
        } else {
            Ok(())
        };
        self.queued
            .drain(..)
            .map(|ticket| (ticket, result.clone()))
            .collect()
    }
}
