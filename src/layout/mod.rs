//! Day-strip layout: column packing for overlapping events and the
//! pixel/time coordinate mapping used for rendering and drag gestures.

pub mod columns;
pub mod coordinates;
