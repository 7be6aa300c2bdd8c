//! Precondition failures raised by the projection engine

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Engine errors. All of them are deterministic: retrying with the same
/// arguments fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("invalid period: end {end} is not after start {start}")]
    InvalidPeriod {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("a schedule needs at least one duration")]
    EmptySchedule,

    #[error("duration at index {index} must be positive")]
    NonPositiveDuration { index: usize },

    #[error("run has not been started")]
    NotStarted,

    #[error("found {count} open pauses, at most one is allowed")]
    MultipleOpenPauses { count: usize },

    #[error("schedule runs past the representable time range")]
    Overflow,
}
