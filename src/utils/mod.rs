//! Utility functions and helpers
//!
//! This module contains timestamp and event-id helpers.

pub mod id;
pub mod time;

pub use id::generate_event_id;
pub use time::now_iso8601;
