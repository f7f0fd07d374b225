//! Utility functions and helpers.

mod duration;

pub use duration::{seconds_to_time_duration, TimeDuration};
