//! Classification of slots against a query instant

use chrono::{DateTime, Duration, Utc};

use super::PausedSlot;

/// Where a run stands at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Nominal durations of slots that are over
    pub past: Vec<Duration>,
    /// Nominal duration of the slot containing `now`
    pub current: Option<Duration>,
    /// Nominal durations of slots not reached yet
    pub future: Vec<Duration>,
    /// Time left in the current slot
    pub remaining_time: Duration,
    /// Time left in the current slot plus every future slot
    pub total_remaining_time: Duration,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            past: Vec::new(),
            current: None,
            future: Vec::new(),
            remaining_time: Duration::zero(),
            total_remaining_time: Duration::zero(),
        }
    }

    /// Put each slot in exactly one of past, current and future.
    ///
    /// Span bounds are inclusive, and an instant shared by two slots
    /// belongs to the earlier one. Once `now` reaches the end of the last
    /// slot every slot is past.
    pub fn classify(slots: &[PausedSlot], now: DateTime<Utc>) -> Self {
        let finished = slots.last().map_or(true, |last| now >= last.span().end());

        let snapshot = slots.iter().fold(Self::empty(), |mut snapshot, slot| {
            let span = slot.span();

            if finished || now > span.end() {
                snapshot.past.push(slot.nominal());
            } else if snapshot.current.is_none() && span.contains(now) {
                let remaining = span.end() - now;
                snapshot.current = Some(slot.nominal());
                snapshot.remaining_time = remaining;
                snapshot.total_remaining_time = snapshot.total_remaining_time + remaining;
            } else {
                snapshot.future.push(slot.nominal());
                snapshot.total_remaining_time = snapshot.total_remaining_time + span.duration();
            }

            snapshot
        });

        debug_assert_eq!(snapshot.len(), slots.len());
        snapshot
    }

    /// Number of slots the snapshot was taken over
    pub(crate) fn len(&self) -> usize {
        self.past.len() + self.future.len() + usize::from(self.current.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{PausableSchedule, Period};
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap() + Duration::seconds(secs)
    }

    fn s(secs: i64) -> Duration {
        Duration::seconds(secs)
    }

    fn plain() -> PausableSchedule {
        PausableSchedule::build(at(0), &[s(10), s(20), s(30)], &[]).unwrap()
    }

    #[test]
    fn mid_sequence() {
        let snapshot = plain().snapshot(at(25));

        assert_eq!(snapshot.past, vec![s(10)]);
        assert_eq!(snapshot.current, Some(s(20)));
        assert_eq!(snapshot.future, vec![s(30)]);
        assert_eq!(snapshot.remaining_time, s(5));
        assert_eq!(snapshot.total_remaining_time, s(35));
    }

    #[test]
    fn pauses_extend_remaining_time() {
        let pauses = [
            Period::new(at(15), at(20)).unwrap(),
            Period::new(at(25), at(30)).unwrap(),
        ];
        let schedule = PausableSchedule::build(at(0), &[s(60)], &pauses).unwrap();
        let snapshot = schedule.snapshot(at(40));

        assert_eq!(snapshot.remaining_time, s(30));
        assert_eq!(snapshot.total_remaining_time, s(30));
    }

    #[test]
    fn shared_boundary_belongs_to_earlier_slot() {
        let snapshot = plain().snapshot(at(10));

        assert!(snapshot.past.is_empty());
        assert_eq!(snapshot.current, Some(s(10)));
        assert_eq!(snapshot.remaining_time, Duration::zero());
        assert_eq!(snapshot.future, vec![s(20), s(30)]);
        assert_eq!(snapshot.total_remaining_time, s(50));
    }

    #[test]
    fn before_start_everything_is_future() {
        let snapshot = plain().snapshot(at(-5));

        assert_eq!(snapshot.current, None);
        assert_eq!(snapshot.future.len(), 3);
        assert_eq!(snapshot.total_remaining_time, s(60));
    }

    #[test]
    fn at_or_after_the_end_nothing_remains() {
        for now in [at(60), at(61), at(3600)] {
            let snapshot = plain().snapshot(now);
            assert_eq!(snapshot.past, vec![s(10), s(20), s(30)]);
            assert_eq!(snapshot.current, None);
            assert!(snapshot.future.is_empty());
            assert_eq!(snapshot.remaining_time, Duration::zero());
            assert_eq!(snapshot.total_remaining_time, Duration::zero());
        }
    }

    #[test]
    fn every_slot_lands_in_one_bucket() {
        let schedule = PausableSchedule::build(
            at(0),
            &[s(10), s(20), s(30)],
            &[Period::new(at(12), at(17)).unwrap()],
        )
        .unwrap();

        for offset in -5..75 {
            let snapshot = schedule.snapshot(at(offset));
            assert_eq!(snapshot.len(), 3, "at offset {offset}");
        }
    }

    #[test]
    fn total_remaining_never_increases() {
        let schedule = PausableSchedule::build(
            at(0),
            &[s(10), s(20), s(30)],
            &[
                Period::new(at(5), at(9)).unwrap(),
                Period::new(at(40), at(47)).unwrap(),
            ],
        )
        .unwrap();

        let mut previous = None;
        for millis in (-2_000..90_000).step_by(250) {
            let now = at(0) + Duration::milliseconds(millis);
            let total = schedule.snapshot(now).total_remaining_time;
            if let Some(previous) = previous {
                assert!(total <= previous, "total went up at {now}");
            }
            previous = Some(total);
        }
    }
}
