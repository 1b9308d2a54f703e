//! Pure schedule logic: month generation, statistics and day edits.
//!
//! Nothing in here touches the database or Discord. "Today" is always passed in
//! by the caller so every function is deterministic.

pub mod admin;
pub mod aggregator;
pub mod calendar;
pub mod edit;
pub mod error;
pub mod generator;
pub mod models;
