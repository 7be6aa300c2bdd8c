//! Run state derived from a schedule, its pauses and the query instant

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{PausableSchedule, Pause, Period, Snapshot, TimelineError};

/// Discrete state of a run at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Running,
    Paused,
    Ended,
}

/// What a caller needs to display a run at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunProjection {
    pub state: RunState,
    /// `None` while paused
    pub ends_at: Option<DateTime<Utc>>,
    pub current_timer: Option<Duration>,
    pub remaining_time: Duration,
    pub total_remaining_time: Duration,
    pub past_timers: Vec<Duration>,
    pub future_timers: Vec<Duration>,
}

impl RunProjection {
    /// Remaining share of the current slot as an angle in degrees
    pub fn remaining_degrees(&self) -> f64 {
        match self.current_timer {
            Some(current) if current > Duration::zero() => {
                let current_ms = current.num_milliseconds().max(1) as f64;
                self.remaining_time.num_milliseconds() as f64 / current_ms * 360.0
            }
            _ => 0.0,
        }
    }

    fn from_snapshot(state: RunState, ends_at: Option<DateTime<Utc>>, snapshot: Snapshot) -> Self {
        Self {
            state,
            ends_at,
            current_timer: snapshot.current,
            remaining_time: snapshot.remaining_time,
            total_remaining_time: snapshot.total_remaining_time,
            past_timers: snapshot.past,
            future_timers: snapshot.future,
        }
    }
}

/// Project a run onto `now`.
///
/// Closed pauses are folded into the schedule. An open pause makes the run
/// `Paused` with no end instant, whatever the snapshot says. Otherwise the
/// run is `Ended` once nothing remains, and `Running` before that.
pub fn project(
    started_at: Option<DateTime<Utc>>,
    durations: &[Duration],
    pauses: &[Pause],
    now: DateTime<Utc>,
) -> Result<RunProjection, TimelineError> {
    let started_at = started_at.ok_or(TimelineError::NotStarted)?;

    let (closed, open): (Vec<Period>, usize) =
        pauses
            .iter()
            .fold((Vec::with_capacity(pauses.len()), 0), |(mut closed, open), pause| {
                match pause {
                    Pause::Closed(period) => {
                        closed.push(*period);
                        (closed, open)
                    }
                    Pause::Open { .. } => (closed, open + 1),
                }
            });

    if open > 1 {
        return Err(TimelineError::MultipleOpenPauses { count: open });
    }

    let schedule = PausableSchedule::build(started_at, durations, &closed)?;
    let snapshot = schedule.snapshot(now);

    let (state, ends_at) = if open == 1 {
        (RunState::Paused, None)
    } else if snapshot.total_remaining_time <= Duration::zero() {
        (RunState::Ended, Some(schedule.ends_at()))
    } else {
        let ends_at = now
            .checked_add_signed(snapshot.total_remaining_time)
            .ok_or(TimelineError::Overflow)?;
        (RunState::Running, Some(ends_at))
    };

    trace!(
        ?state,
        slots = durations.len(),
        closed_pauses = closed.len(),
        "projected run"
    );

    Ok(RunProjection::from_snapshot(state, ends_at, snapshot))
}
