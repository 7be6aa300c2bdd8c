//! Builds effective slot spans from nominal durations and closed pauses

use chrono::{DateTime, Duration, Utc};

use super::{Period, Snapshot, TimelineError};

/// One slot of a run after pauses have been folded into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PausedSlot {
    nominal: Duration,
    span: Period,
    pauses: Vec<Period>,
}

impl PausedSlot {
    fn new(nominal: Duration, span: Period) -> Self {
        Self {
            nominal,
            span,
            pauses: Vec::new(),
        }
    }

    /// Returns a new slot whose end is pushed back by the pause's length
    fn absorb(self, pause: Period) -> Result<Self, TimelineError> {
        let span = self.span.extended(pause.duration())?;
        let mut pauses = self.pauses;
        pauses.push(pause);
        Ok(Self {
            nominal: self.nominal,
            span,
            pauses,
        })
    }

    /// The duration the slot was configured with
    pub fn nominal(&self) -> Duration {
        self.nominal
    }

    /// Wall-clock span including absorbed pauses
    pub fn span(&self) -> Period {
        self.span
    }

    /// Absorbed pauses, in ascending start order
    pub fn pauses(&self) -> &[Period] {
        &self.pauses
    }
}

/// The wall-clock layout of every slot of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PausableSchedule {
    started_at: DateTime<Utc>,
    slots: Vec<PausedSlot>,
}

impl PausableSchedule {
    /// Lay `durations` out back to back from `started_at`, folding each
    /// closed pause into the first slot whose current end is at or after
    /// the pause's start.
    ///
    /// Pauses are considered in ascending start order whatever order they
    /// are given in. A slot keeps absorbing while the next pause still
    /// starts at or before its (extended) end. Pauses starting after the
    /// last slot has ended go to the last slot, so every pause is counted
    /// exactly once.
    pub fn build(
        started_at: DateTime<Utc>,
        durations: &[Duration],
        pauses: &[Period],
    ) -> Result<Self, TimelineError> {
        if durations.is_empty() {
            return Err(TimelineError::EmptySchedule);
        }

        let mut ordered = pauses.to_vec();
        ordered.sort_by_key(Period::start);

        let (_, mut slots, trailing) = durations.iter().enumerate().try_fold(
            (started_at, Vec::with_capacity(durations.len()), ordered.as_slice()),
            |(cursor, mut slots, pending), (index, &nominal)| {
                if nominal <= Duration::zero() {
                    return Err(TimelineError::NonPositiveDuration { index });
                }

                let slot = PausedSlot::new(nominal, Period::starting_at(cursor, nominal)?);
                let (slot, pending) = absorb_eligible(slot, pending)?;
                let next_cursor = slot.span.end();
                slots.push(slot);

                Ok((next_cursor, slots, pending))
            },
        )?;

        if let Some(last) = slots.pop() {
            let last = trailing
                .iter()
                .try_fold(last, |slot, pause| slot.absorb(*pause))?;
            slots.push(last);
        }

        Ok(Self { started_at, slots })
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn slots(&self) -> &[PausedSlot] {
        &self.slots
    }

    /// Sum of every slot's span, pauses included. Spans tile the schedule
    /// from its start, so this is the distance to the last end.
    pub fn total_duration(&self) -> Duration {
        self.ends_at() - self.started_at
    }

    /// When the last slot ends
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.slots
            .last()
            .map_or(self.started_at, |slot| slot.span.end())
    }

    /// Classify every slot against `now`
    pub fn snapshot(&self, now: DateTime<Utc>) -> Snapshot {
        Snapshot::classify(&self.slots, now)
    }
}

/// Absorb the leading run of `pending` that falls at or before the slot's
/// end, re-checking against the extended end after each pause.
fn absorb_eligible(
    mut slot: PausedSlot,
    pending: &[Period],
) -> Result<(PausedSlot, &[Period]), TimelineError> {
    let mut taken = 0;
    while let Some(pause) = pending.get(taken) {
        if pause.start() > slot.span.end() {
            break;
        }
        slot = slot.absorb(*pause)?;
        taken += 1;
    }
    Ok((slot, &pending[taken..]))
}
