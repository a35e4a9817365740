//! Edge auto-scroll for drag gestures.
//!
//! While a drag is active and the pointer sits within [`EDGE_ZONE_PX`] of
//! the scroll viewport's top or bottom edge, the strip scrolls by
//! [`STEP_PX`] per frame in that direction. The scroller is an owned value
//! inside the drag controller, so at most one nudge can ever be active and
//! it cannot outlive the gesture.

/// Distance from a viewport edge that triggers auto-scroll, in pixels.
pub const EDGE_ZONE_PX: f32 = 50.0;

/// Scroll distance applied per tick, in pixels.
pub const STEP_PX: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// At-most-one auto-scroll nudge.
#[derive(Debug, Default)]
pub struct AutoScroll {
    direction: Option<ScrollDirection>,
}

impl AutoScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start scrolling in `direction`, replacing any active nudge.
    pub fn start(&mut self, direction: ScrollDirection) {
        self.direction = Some(direction);
    }

    pub fn stop(&mut self) {
        self.direction = None;
    }

    pub fn is_active(&self) -> bool {
        self.direction.is_some()
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    /// Start, switch or stop based on the pointer's position within the
    /// viewport.
    pub fn update(&mut self, pointer_y: f32, viewport_top: f32, viewport_bottom: f32) {
        if pointer_y <= viewport_top + EDGE_ZONE_PX {
            self.start(ScrollDirection::Up);
        } else if pointer_y >= viewport_bottom - EDGE_ZONE_PX {
            self.start(ScrollDirection::Down);
        } else {
            self.stop();
        }
    }

    /// Scroll-offset delta for one frame; zero when idle.
    pub fn tick(&self) -> f32 {
        match self.direction {
            Some(ScrollDirection::Up) => -STEP_PX,
            Some(ScrollDirection::Down) => STEP_PX,
            None => 0.0,
        }
    }
}
