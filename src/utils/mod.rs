//! Utility functions module
//! 
//! Duration parsing/formatting and process signal handling.

pub mod duration;
pub mod signals;

// Re-export main functions
pub use duration::{format_duration, parse_duration, to_millis, DurationParseError};
pub use signals::shutdown_signal;
