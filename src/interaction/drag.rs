//! Drag and resize gesture state machine.
//!
//! A gesture is `Idle → Active → Idle`: pointer-down over a native event
//! block (or one of its edge handles) begins a session, every pointer-move
//! recomputes the tentative interval from absolute anchors, and pointer-up
//! finishes it. Pointer-leave of the strip finishes exactly like pointer-up;
//! there is no separate cancel gesture. Escape clears selection elsewhere
//! and deliberately does not touch an active drag.
//!
//! The tentative interval is for rendering the dragged event only; stored
//! intervals stay untouched until the mutation coordinator commits.

use chrono::{DateTime, Duration, Local};

use super::autoscroll::AutoScroll;
use crate::layout::coordinates::CoordinateMapper;
use crate::models::event::Event;
use crate::models::interval::{TimeInterval, MIN_EVENT_MINUTES};

/// Pointer travel below this is a click, not a drag.
pub const CLICK_SLOP_PX: f32 = 4.0;

/// What the gesture manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Reposition the whole event, duration preserved.
    Move,
    /// Drag the top edge, moving the start.
    ResizeTop,
    /// Drag the bottom edge, moving the end.
    ResizeBottom,
}

/// State captured at pointer-down and updated on every pointer-move.
#[derive(Debug, Clone)]
struct DragSession {
    event_id: String,
    mode: DragMode,
    anchor_pointer_y: f32,
    anchor_scroll_offset: f32,
    /// Time the manipulated edge (or start, for moves) had at pointer-down.
    anchor_time: DateTime<Local>,
    original: TimeInterval,
    tentative: Option<TimeInterval>,
    moved: bool,
}

/// How a finished gesture resolves.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Travel never exceeded [`CLICK_SLOP_PX`]; open the detail view.
    Click { event_id: String },
    /// Hand the tentative interval to the mutation coordinator.
    Commit {
        event_id: String,
        mode: DragMode,
        original: TimeInterval,
        tentative: TimeInterval,
    },
}

/// Owns the single active gesture and its auto-scroll resource.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    autoscroll: AutoScroll,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a gesture over `event`.
    ///
    /// Returns false (and stays Idle) for external events, which are
    /// read-only here, or when a session is already active.
    pub fn begin(
        &mut self,
        event: &Event,
        mode: DragMode,
        pointer_y: f32,
        scroll_offset: f32,
    ) -> bool {
        if !event.is_native() {
            log::debug!("ignoring drag on external event {}", event.id);
            return false;
        }
        if self.session.is_some() {
            return false;
        }

        let anchor_time = match mode {
            DragMode::Move | DragMode::ResizeTop => event.start,
            DragMode::ResizeBottom => event.end,
        };

        log::debug!("drag begin: {} {:?}", event.id, mode);
        self.session = Some(DragSession {
            event_id: event.id.clone(),
            mode,
            anchor_pointer_y: pointer_y,
            anchor_scroll_offset: scroll_offset,
            anchor_time,
            original: event.interval(),
            tentative: None,
            moved: false,
        });
        true
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_event(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.event_id.as_str())
    }

    pub fn mode(&self) -> Option<DragMode> {
        self.session.as_ref().map(|s| s.mode)
    }

    /// Tentative interval for `event_id`, if it is the dragged event.
    ///
    /// Rendering substitutes this for exactly one event; everything else
    /// keeps its stored interval.
    pub fn tentative_for(&self, event_id: &str) -> Option<TimeInterval> {
        self.session
            .as_ref()
            .filter(|s| s.event_id == event_id)
            .and_then(|s| s.tentative)
    }

    /// Recompute the tentative interval from the current pointer position.
    ///
    /// `scroll_top` is the scroll container's current offset; the delta is
    /// rebuilt from absolute anchors every time, so auto-scroll ticks
    /// interleaving with pointer-moves cannot skew the result.
    pub fn pointer_moved(&mut self, pointer_y: f32, scroll_top: f32, mapper: &CoordinateMapper) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let scroll_delta = scroll_top - session.anchor_scroll_offset;
        let delta_y = (pointer_y - session.anchor_pointer_y) + scroll_delta;

        if !session.moved && delta_y.abs() < CLICK_SLOP_PX {
            return;
        }
        session.moved = true;

        let delta = Duration::minutes(mapper.delta_to_minutes(delta_y));
        let min_duration = Duration::minutes(MIN_EVENT_MINUTES);

        match session.mode {
            DragMode::Move => {
                let start = session.anchor_time + delta;
                session.tentative = Some(TimeInterval {
                    start,
                    end: start + session.original.duration(),
                });
            }
            DragMode::ResizeTop => {
                let start = session.anchor_time + delta;
                // Hold the last valid tentative value instead of pinning
                // the edge to the minimum.
                if session.original.end - start >= min_duration {
                    session.tentative = Some(TimeInterval {
                        start,
                        end: session.original.end,
                    });
                }
            }
            DragMode::ResizeBottom => {
                let end = session.anchor_time + delta;
                if end - session.original.start >= min_duration {
                    session.tentative = Some(TimeInterval {
                        start: session.original.start,
                        end,
                    });
                }
            }
        }
    }

    /// Re-evaluate edge auto-scroll from the pointer's viewport position.
    /// No-op while Idle.
    pub fn update_autoscroll(&mut self, pointer_y: f32, viewport_top: f32, viewport_bottom: f32) {
        if self.session.is_some() {
            self.autoscroll.update(pointer_y, viewport_top, viewport_bottom);
        }
    }

    /// Scroll-offset delta for this frame; zero unless auto-scrolling.
    pub fn autoscroll_tick(&self) -> f32 {
        self.autoscroll.tick()
    }

    pub fn is_autoscrolling(&self) -> bool {
        self.autoscroll.is_active()
    }

    /// Finish the gesture (pointer-up or pointer-leave) and return to Idle.
    ///
    /// Always stops auto-scroll, whichever exit path ran.
    pub fn finish(&mut self) -> Option<DragOutcome> {
        self.autoscroll.stop();
        let session = self.session.take()?;

        match session.tentative {
            None => {
                log::debug!("drag finished as click: {}", session.event_id);
                Some(DragOutcome::Click {
                    event_id: session.event_id,
                })
            }
            Some(tentative) => {
                log::debug!(
                    "drag commit: {} {:?} -> [{} .. {}]",
                    session.event_id,
                    session.mode,
                    tentative.start.format("%H:%M"),
                    tentative.end.format("%H:%M")
                );
                Some(DragOutcome::Commit {
                    event_id: session.event_id,
                    mode: session.mode,
                    original: session.original,
                    tentative,
                })
            }
        }
    }
}
