//! Pointer interaction: the drag/resize gesture state machine and the
//! edge auto-scroll resource it owns.

pub mod autoscroll;
pub mod drag;
