//! Timer sequence definitions

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

pub const MAX_NAME_LENGTH: usize = 2048;
pub const MAX_DURATIONS: usize = 100;
/// Longest single timer, one week
pub const MAX_TIMER_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("sequence name can't be empty")]
    EmptyName,

    #[error("sequence name is longer than {max} characters")]
    NameTooLong { max: usize },

    #[error("a sequence needs at least one timer")]
    NoDurations,

    #[error("a sequence holds at most {max} timers, got {count}")]
    TooManyDurations { count: usize, max: usize },

    #[error("timer {position} must last longer than zero")]
    NonPositiveDuration { position: usize },

    #[error("timer {position} is longer than {max_seconds} seconds")]
    DurationTooLong { position: usize, max_seconds: i64 },
}

/// A named, ordered list of timer durations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSequence {
    pub id: Uuid,
    pub name: String,
    pub durations: Vec<Duration>,
    pub created_at: DateTime<Utc>,
}

impl TimerSequence {
    /// Validate and create a new sequence
    pub fn new(
        name: &str,
        durations: Vec<Duration>,
        now: DateTime<Utc>,
    ) -> Result<Self, SequenceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SequenceError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(SequenceError::NameTooLong { max: MAX_NAME_LENGTH });
        }

        if durations.is_empty() {
            return Err(SequenceError::NoDurations);
        }
        if durations.len() > MAX_DURATIONS {
            return Err(SequenceError::TooManyDurations {
                count: durations.len(),
                max: MAX_DURATIONS,
            });
        }
        if let Some(index) = durations.iter().position(|d| *d <= Duration::zero()) {
            return Err(SequenceError::NonPositiveDuration { position: index + 1 });
        }
        let longest = Duration::seconds(MAX_TIMER_SECONDS);
        if let Some(index) = durations.iter().position(|d| *d > longest) {
            return Err(SequenceError::DurationTooLong {
                position: index + 1,
                max_seconds: MAX_TIMER_SECONDS,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            durations,
            created_at: now,
        })
    }

    /// Sum of every timer, pauses excluded. Saturates instead of
    /// overflowing.
    pub fn total_duration(&self) -> Duration {
        self.durations.iter().fold(Duration::zero(), |total, d| {
            total.checked_add(d).unwrap_or_else(Duration::max_value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mins(values: &[i64]) -> Vec<Duration> {
        values.iter().map(|m| Duration::minutes(*m)).collect()
    }

    #[test]
    fn creates_valid_sequence() {
        let now = Utc::now();
        let sequence = TimerSequence::new("  pomodoro ", mins(&[25, 5]), now).unwrap();

        assert_eq!(sequence.name, "pomodoro");
        assert_eq!(sequence.created_at, now);
        assert_eq!(sequence.total_duration(), Duration::minutes(30));
    }

    #[test]
    fn rejects_bad_input() {
        let now = Utc::now();
        assert_eq!(
            TimerSequence::new(" ", mins(&[1]), now),
            Err(SequenceError::EmptyName)
        );
        assert_eq!(
            TimerSequence::new(&"x".repeat(MAX_NAME_LENGTH + 1), mins(&[1]), now),
            Err(SequenceError::NameTooLong { max: MAX_NAME_LENGTH })
        );
        assert_eq!(
            TimerSequence::new("a", Vec::new(), now),
            Err(SequenceError::NoDurations)
        );
        assert_eq!(
            TimerSequence::new("a", vec![Duration::minutes(1); MAX_DURATIONS + 1], now),
            Err(SequenceError::TooManyDurations {
                count: MAX_DURATIONS + 1,
                max: MAX_DURATIONS
            })
        );
        assert_eq!(
            TimerSequence::new("a", mins(&[5, 0]), now),
            Err(SequenceError::NonPositiveDuration { position: 2 })
        );
    }

    #[test]
    fn caps_single_timer_length() {
        let now = Utc::now();
        let week = Duration::seconds(MAX_TIMER_SECONDS);

        assert!(TimerSequence::new("a", vec![week], now).is_ok());
        assert_eq!(
            TimerSequence::new("a", vec![Duration::minutes(1), week + Duration::seconds(1)], now),
            Err(SequenceError::DurationTooLong {
                position: 2,
                max_seconds: MAX_TIMER_SECONDS
            })
        );
        assert_eq!(
            TimerSequence::new("a", vec![Duration::milliseconds(i64::MAX)], now),
            Err(SequenceError::DurationTooLong {
                position: 1,
                max_seconds: MAX_TIMER_SECONDS
            })
        );
    }

    #[test]
    fn total_saturates() {
        let sequence = TimerSequence {
            id: Uuid::new_v4(),
            name: "huge".to_string(),
            durations: vec![Duration::milliseconds(i64::MAX), Duration::seconds(1)],
            created_at: Utc::now(),
        };
        assert_eq!(sequence.total_duration(), Duration::max_value());
    }
}
