//! Timer sequence runs and their pause rules

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::TimerSequence;
use crate::timeline::{self, Pause, Period, RunProjection, TimelineError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("timer \"{0}\" is already paused")]
    AlreadyPaused(Uuid),

    #[error("timer \"{0}\" is not paused")]
    NotPaused(Uuid),

    #[error("timer \"{0}\" ended")]
    Ended(Uuid),

    #[error("timer \"{id}\" already has a pause boundary at {boundary}, can't act at {now}")]
    StaleInstant {
        id: Uuid,
        boundary: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    #[error(transparent)]
    Timeline(#[from] TimelineError),
}

/// One execution of a sequence.
///
/// Durations are copied from the sequence when the run starts, so later
/// edits or deletion of the sequence leave the run untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerRun {
    pub id: Uuid,
    pub sequence_id: Uuid,
    pub sequence_name: String,
    pub durations: Vec<Duration>,
    pub started_at: DateTime<Utc>,
    pauses: Vec<Pause>,
}

impl TimerRun {
    /// Start a run of `sequence` at `now`
    pub fn start(sequence: &TimerSequence, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence_id: sequence.id,
            sequence_name: sequence.name.clone(),
            durations: sequence.durations.clone(),
            started_at: now,
            pauses: Vec::new(),
        }
    }

    pub fn pauses(&self) -> &[Pause] {
        &self.pauses
    }

    pub fn is_paused(&self) -> bool {
        self.pauses.iter().any(Pause::is_open)
    }

    /// When the run finishes if it isn't paused again: start, plus every
    /// timer, plus every closed pause. `None` while paused, or if the end
    /// falls outside the representable time range.
    pub fn scheduled_end(&self) -> Option<DateTime<Utc>> {
        if self.is_paused() {
            return None;
        }

        let paused = self
            .pauses
            .iter()
            .filter_map(Pause::as_closed)
            .map(Period::duration);

        self.durations
            .iter()
            .copied()
            .chain(paused)
            .try_fold(self.started_at, |end, d| end.checked_add_signed(d))
    }

    /// A paused run never ends
    pub fn is_ended(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_end().is_some_and(|end| end <= now)
    }

    /// Latest instant any recorded pause touches
    fn last_pause_boundary(&self) -> Option<DateTime<Utc>> {
        self.pauses
            .iter()
            .map(|pause| match pause {
                Pause::Closed(period) => period.end(),
                Pause::Open { started_at } => *started_at,
            })
            .max()
    }

    fn check_not_stale(&self, now: DateTime<Utc>) -> Result<(), RunError> {
        match self.last_pause_boundary() {
            Some(boundary) if now < boundary => Err(RunError::StaleInstant {
                id: self.id,
                boundary,
                now,
            }),
            _ => Ok(()),
        }
    }

    /// Open a pause at `now`. `now` may not fall before an instant some
    /// earlier pause already covers, or pauses would overlap.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), RunError> {
        if self.is_paused() {
            return Err(RunError::AlreadyPaused(self.id));
        }
        self.check_not_stale(now)?;
        if self.is_ended(now) {
            return Err(RunError::Ended(self.id));
        }

        self.pauses.push(Pause::Open { started_at: now });
        Ok(())
    }

    /// Close the open pause at `now`. A pause closed at the very instant it
    /// was opened is dropped.
    pub fn unpause(&mut self, now: DateTime<Utc>) -> Result<(), RunError> {
        let index = self
            .pauses
            .iter()
            .position(Pause::is_open)
            .ok_or(RunError::NotPaused(self.id))?;
        self.check_not_stale(now)?;
        let started_at = self.pauses[index].started_at();

        if now == started_at {
            self.pauses.remove(index);
        } else {
            self.pauses[index] = Pause::Closed(Period::new(started_at, now)?);
        }
        Ok(())
    }

    /// Flip between paused and running. Ended runs are left alone.
    pub fn toggle(&mut self, now: DateTime<Utc>) -> Result<(), RunError> {
        if self.is_ended(now) {
            return Ok(());
        }

        if self.is_paused() {
            self.unpause(now)
        } else {
            self.pause(now)
        }
    }

    pub fn projection(&self, now: DateTime<Utc>) -> Result<RunProjection, TimelineError> {
        timeline::project(Some(self.started_at), &self.durations, &self.pauses, now)
    }
}
