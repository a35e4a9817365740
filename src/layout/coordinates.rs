//! Pixel/time mapping for the 24-hour day strip.
//!
//! The strip is a fixed vertical band: `pixels_per_hour` pixels per hour,
//! midnight at y = 0. Rendering maps times down to pixels; drags map pixel
//! deltas back up to snapped minute deltas.

use chrono::{NaiveTime, Timelike};

/// Default vertical scale of the day strip.
pub const DEFAULT_PIXELS_PER_HOUR: f32 = 60.0;

/// Granularity dragged times are rounded to, in minutes.
pub const SNAP_MINUTES: i64 = 5;

/// Smallest rendered block height in pixels.
///
/// A rendering floor only. The 5-minute data minimum lives in
/// [`crate::models::interval::MIN_EVENT_MINUTES`] and is enforced by the
/// drag controller, not here.
pub const MIN_BLOCK_HEIGHT: f32 = 20.0;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Bidirectional mapping between strip pixels and wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    pixels_per_hour: f32,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new(DEFAULT_PIXELS_PER_HOUR)
    }
}

impl CoordinateMapper {
    pub fn new(pixels_per_hour: f32) -> Self {
        Self {
            // A degenerate scale would make the pixel→time direction
            // divide by zero.
            pixels_per_hour: pixels_per_hour.max(1.0),
        }
    }

    pub fn pixels_per_hour(&self) -> f32 {
        self.pixels_per_hour
    }

    /// Total strip height for one day.
    pub fn day_height(&self) -> f32 {
        24.0 * self.pixels_per_hour
    }

    /// Y offset of a wall-clock time from the top of the strip.
    pub fn time_to_y(&self, time: NaiveTime) -> f32 {
        let hours = time.num_seconds_from_midnight() as f32 / 3600.0;
        hours * self.pixels_per_hour
    }

    /// Rendered block height for a duration, floored at [`MIN_BLOCK_HEIGHT`].
    pub fn block_height(&self, duration_minutes: i64) -> f32 {
        let height = (duration_minutes as f32 / 60.0) * self.pixels_per_hour;
        height.max(MIN_BLOCK_HEIGHT)
    }

    /// Convert a pointer-Y delta to a minute delta snapped to
    /// [`SNAP_MINUTES`].
    ///
    /// The caller must already have folded any auto-scroll movement into
    /// `delta_y`; this is pure geometry.
    pub fn delta_to_minutes(&self, delta_y: f32) -> i64 {
        let raw_minutes = (delta_y / self.pixels_per_hour) * 60.0;
        (raw_minutes / SNAP_MINUTES as f32).round() as i64 * SNAP_MINUTES
    }

    /// Wall-clock time at a Y offset, snapped and clamped to the day.
    pub fn y_to_time(&self, y: f32) -> NaiveTime {
        let minutes = self
            .delta_to_minutes(y)
            .clamp(0, MINUTES_PER_DAY - SNAP_MINUTES);
        NaiveTime::from_num_seconds_from_midnight_opt(minutes as u32 * 60, 0)
            .unwrap_or(NaiveTime::MIN)
    }
}
