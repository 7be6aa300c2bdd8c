//! Parsing and display of timer durations

use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("duration is empty")]
    Empty,

    #[error("can't parse \"{0}\": expected H:M:S, M:S or S")]
    Format(String),

    #[error("can't parse \"{input}\": segment \"{segment}\" is not a non-negative number")]
    Segment { input: String, segment: String },

    #[error("\"{0}\" is too long to represent")]
    OutOfRange(String),
}

/// Parse `H:M:S`, `M:S` or `S`. Segments may be fractional.
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let segments = trimmed
        .split(':')
        .map(|segment| parse_segment(trimmed, segment))
        .collect::<Result<Vec<f64>, _>>()?;

    let seconds = match segments.as_slice() {
        [hours, minutes, seconds] => hours * 3600.0 + minutes * 60.0 + seconds,
        [minutes, seconds] => minutes * 60.0 + seconds,
        [seconds] => *seconds,
        _ => return Err(DurationParseError::Format(trimmed.to_string())),
    };

    let millis = (seconds * 1000.0).round();
    if !millis.is_finite() || millis >= i64::MAX as f64 {
        return Err(DurationParseError::OutOfRange(trimmed.to_string()));
    }

    Ok(Duration::milliseconds(millis as i64))
}

fn parse_segment(input: &str, segment: &str) -> Result<f64, DurationParseError> {
    let invalid = || DurationParseError::Segment {
        input: input.to_string(),
        segment: segment.to_string(),
    };

    let value: f64 = segment.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

/// `HH:MM:SS` from one hour up, `MM:SS` below
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Whole milliseconds, truncated
pub fn to_millis(duration: Duration) -> i64 {
    duration.num_milliseconds()
}
