use chrono::{DateTime, Duration, FixedOffset, SubsecRound, Utc};
use mockall::automock;

/// Postgres `timestamptz` keeps microseconds; every stamp is truncated to
/// that precision so a stored value compares equal to the one we produced.
const STORED_SUBSEC_DIGITS: u16 = 6;

#[automock]
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;

    /// Offset every timestamp is rendered in.
    fn offset(&self) -> FixedOffset;
}

/// Wall clock reporting in one fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedZoneClock {
    offset: FixedOffset,
}

impl FixedZoneClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for FixedZoneClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Stamp used for both `created_at` and `updated_at` of a new record.
pub fn creation_stamp<C>(clock: &C) -> DateTime<Utc>
where
    C: Clock + ?Sized,
{
    clock.now().with_timezone(&Utc).trunc_subsecs(STORED_SUBSEC_DIGITS)
}

/// Shared update hook for every store: the new `updated_at` comes from the
/// clock and never from the caller, and it is strictly after `previous`.
pub fn refresh_updated_at<C>(clock: &C, previous: DateTime<Utc>) -> DateTime<Utc>
where
    C: Clock + ?Sized,
{
    let now = creation_stamp(clock);
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock_at(instant: DateTime<Utc>) -> MockClock {
        let mut clock = MockClock::new();
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        clock
            .expect_now()
            .returning(move || instant.with_timezone(&offset));
        clock
    }

    #[test]
    fn fixed_zone_clock_reports_in_its_offset() {
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let clock = FixedZoneClock::new(offset);
        assert_eq!(clock.now().offset(), &offset);
        assert_eq!(Clock::offset(&clock), offset);
    }

    #[test]
    fn creation_stamp_is_truncated_to_microseconds() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
            + Duration::nanoseconds(1_234_567);
        let stamp = creation_stamp(&clock_at(instant));
        assert_eq!(stamp.timestamp_subsec_nanos(), 1_234_000);
    }

    #[test]
    fn refresh_uses_clock_when_it_moved_forward() {
        let previous = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let later = previous + Duration::seconds(5);
        assert_eq!(refresh_updated_at(&clock_at(later), previous), later);
    }

    #[test]
    fn refresh_still_increases_when_clock_did_not_move() {
        let previous = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

        let same = refresh_updated_at(&clock_at(previous), previous);
        assert_eq!(same, previous + Duration::microseconds(1));

        let behind = refresh_updated_at(&clock_at(previous - Duration::hours(1)), previous);
        assert!(behind > previous);
    }
}
