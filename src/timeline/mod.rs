//! Pause-aware schedule projection
//!
//! Turns a list of nominal durations, a start instant and the pauses recorded
//! against a run into wall-clock spans, then classifies those spans against a
//! query instant. Everything in here is a pure function of its arguments;
//! callers always pass `now` explicitly.

pub mod error;
pub mod period;
pub mod projection;
pub mod schedule;
pub mod snapshot;

// Re-export main types
pub use error::TimelineError;
pub use period::{Pause, Period};
pub use projection::{project, RunProjection, RunState};
pub use schedule::{PausableSchedule, PausedSlot};
pub use snapshot::Snapshot;
