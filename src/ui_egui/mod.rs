mod app;
pub mod day_strip;
pub mod event_block;
pub mod toast;

pub use app::CalendarApp;
