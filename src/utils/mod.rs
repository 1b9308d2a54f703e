pub mod format;
pub mod schedule_manager;
pub mod time;
