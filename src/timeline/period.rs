//! Wall-clock periods and pause records

use chrono::{DateTime, Duration, Utc};

use super::TimelineError;

/// A closed wall-clock interval with `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Period {
    /// Create a period, rejecting empty and inverted intervals
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimelineError> {
        if end <= start {
            return Err(TimelineError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create a period from a start instant and a positive length
    pub fn starting_at(start: DateTime<Utc>, length: Duration) -> Result<Self, TimelineError> {
        let end = start
            .checked_add_signed(length)
            .ok_or(TimelineError::Overflow)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Inclusive on both ends
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Same start, end pushed back by `by`
    pub(crate) fn extended(&self, by: Duration) -> Result<Self, TimelineError> {
        let end = self.end.checked_add_signed(by).ok_or(TimelineError::Overflow)?;
        Ok(Self {
            start: self.start,
            end,
        })
    }
}

/// A suspension recorded against a run.
///
/// `Open` is a pause that is still in effect. A run holds at most one of
/// those at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    Closed(Period),
    Open { started_at: DateTime<Utc> },
}

impl Pause {
    pub fn started_at(&self) -> DateTime<Utc> {
        match self {
            Pause::Closed(period) => period.start(),
            Pause::Open { started_at } => *started_at,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Pause::Open { .. })
    }

    /// The closed interval, if the pause has ended
    pub fn as_closed(&self) -> Option<&Period> {
        match self {
            Pause::Closed(period) => Some(period),
            Pause::Open { .. } => None,
        }
    }
}

impl From<Period> for Pause {
    fn from(period: Period) -> Self {
        Pause::Closed(period)
    }
}
