//! Membership and active-window lookup for [`RecurringSpan`].
//!
//! ## Summary
//! Cycle arithmetic runs on `i128` nanosecond counts with truncating division,
//! so the cycle index of an instant before `start` rounds toward zero. Membership
//! never depends on that rounding: negative elapsed time is rejected explicitly.

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};

use crate::error::{SpanError, SpanResult};
use crate::span::RecurringSpan;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Half-open active window `[start, end)` of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl ActiveWindow {
    /// Whether `x` lies in `[start, end)`.
    #[must_use]
    pub fn contains<Tz: TimeZone>(&self, x: &DateTime<Tz>) -> bool {
        let x = x.naive_utc();
        self.start.naive_utc() <= x && x < self.end.naive_utc()
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end.signed_duration_since(self.start)
    }
}

impl fmt::Display for ActiveWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

fn to_nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * NANOS_PER_SEC + i128::from(delta.subsec_nanos())
}

fn from_nanos(nanos: i128) -> Option<TimeDelta> {
    let secs = i64::try_from(nanos / NANOS_PER_SEC).ok()?;
    let subsec = i64::try_from(nanos % NANOS_PER_SEC).ok()?;
    TimeDelta::try_seconds(secs)?.checked_add(&TimeDelta::nanoseconds(subsec))
}

impl RecurringSpan {
    fn elapsed_nanos<Tz: TimeZone>(&self, x: &DateTime<Tz>) -> i128 {
        to_nanos(x.naive_utc().signed_duration_since(self.start().naive_utc()))
    }

    /// ## Summary
    /// Number of complete cycles between `start` and `x`, truncated toward zero.
    ///
    /// Negative for instants more than one cycle before `start`.
    #[must_use]
    pub fn cycle_index<Tz: TimeZone>(&self, x: &DateTime<Tz>) -> i128 {
        self.elapsed_nanos(x) / to_nanos(self.total())
    }

    /// ## Summary
    /// Returns whether `x` falls inside an active window of this span.
    ///
    /// An all-time span contains every instant. Otherwise `x` must not precede
    /// `start`, its cycle must be counted (or the span infinite) and its phase
    /// within the cycle must be shorter than `active`.
    #[must_use]
    pub fn contains_time<Tz: TimeZone>(&self, x: &DateTime<Tz>) -> bool {
        if self.is_all_time() {
            return true;
        }

        let elapsed = self.elapsed_nanos(x);
        let total = to_nanos(self.total());
        let (cycle, phase) = (elapsed / total, elapsed % total);

        let counted =
            self.is_infinite() || (self.times() >= 0 && cycle < i128::from(self.times()));
        let member = elapsed >= 0 && counted && phase < to_nanos(self.active());

        tracing::trace!(cycle, phase, member, "Evaluated span membership");
        member
    }

    /// ## Summary
    /// Returns the active window of the cycle governing `x`.
    ///
    /// Past the last repetition of a bounded span, the last cycle's window is
    /// reported. The all-time flag is not consulted and no membership check is
    /// made, so instants before `start` yield a window at or before `start`, and a
    /// span with `times <= 0` yields the window of cycle `times - 1`.
    ///
    /// ## Errors
    /// Returns `SpanError::OutOfRange` if the window falls outside the range
    /// `chrono` can represent.
    pub fn current_active_interval<Tz: TimeZone>(
        &self,
        x: &DateTime<Tz>,
    ) -> SpanResult<ActiveWindow> {
        let mut cycle = self.cycle_index(x);
        if !self.is_infinite() && cycle >= i128::from(self.times()) {
            cycle = i128::from(self.times()) - 1;
        }

        let start = cycle
            .checked_mul(to_nanos(self.total()))
            .and_then(from_nanos)
            .and_then(|offset| self.start().checked_add_signed(offset))
            .ok_or(SpanError::OutOfRange { cycle })?;
        let end = start
            .checked_add_signed(self.active())
            .ok_or(SpanError::OutOfRange { cycle })?;

        tracing::trace!(cycle, %start, %end, "Resolved active window");
        Ok(ActiveWindow { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2006-01-02T15:04:05-04:00").expect("valid timestamp")
    }

    fn daily(times: i64) -> RecurringSpan {
        RecurringSpan::bounded(t0(), TimeDelta::hours(1), TimeDelta::hours(24), times)
            .expect("valid span")
    }

    #[test]
    fn nanos_conversion_keeps_sign() {
        let delta = TimeDelta::nanoseconds(-1_500_000_001);
        assert_eq!(to_nanos(delta), -1_500_000_001);
        assert_eq!(from_nanos(-1_500_000_001), Some(delta));
    }

    #[test]
    fn from_nanos_overflow() {
        assert_eq!(from_nanos(i128::MAX), None);
    }

    #[test]
    fn cycle_index_truncates_toward_zero() {
        let span = daily(10);
        assert_eq!(span.cycle_index(&(t0() - TimeDelta::hours(1))), 0);
        assert_eq!(span.cycle_index(&(t0() - TimeDelta::hours(25))), -1);
        assert_eq!(span.cycle_index(&(t0() + TimeDelta::hours(49))), 2);
    }

    #[test]
    fn instant_before_start_is_not_member() {
        // phase is negative here, which alone would satisfy `phase < active`
        let span = daily(10);
        assert!(!span.contains_time(&(t0() - TimeDelta::minutes(1))));
        assert!(!span.contains_time(&(t0() - TimeDelta::hours(24))));
    }

    #[test]
    fn start_instant_is_member() {
        assert!(daily(1).contains_time(&t0()));
    }

    #[test]
    fn zero_times_never_member() {
        assert!(!daily(0).contains_time(&t0()));
        assert!(!daily(-1).contains_time(&(t0() + TimeDelta::minutes(1))));
    }

    #[test]
    fn active_longer_than_total_is_always_on() {
        let span = RecurringSpan::bounded(t0(), TimeDelta::hours(30), TimeDelta::hours(24), 2)
            .expect("valid span");
        assert!(span.contains_time(&(t0() + TimeDelta::hours(23))));
        assert!(span.contains_time(&(t0() + TimeDelta::hours(47))));
        assert!(!span.contains_time(&(t0() + TimeDelta::hours(48))));
    }

    #[test]
    fn negative_active_is_never_on() {
        let span = RecurringSpan::bounded(t0(), TimeDelta::hours(-1), TimeDelta::hours(24), 10)
            .expect("valid span");
        assert!(!span.contains_time(&t0()));
        assert!(!span.contains_time(&(t0() + TimeDelta::hours(24))));
        assert!(!span.contains_time(&(t0() + TimeDelta::hours(23))));
    }

    #[test]
    fn window_for_zero_times_precedes_start() {
        let window = daily(0)
            .current_active_interval(&t0())
            .expect("window should resolve");
        assert_eq!(window.start, t0() - TimeDelta::hours(24));
        assert_eq!(window.end, t0() - TimeDelta::hours(23));
    }

    #[test]
    fn window_before_start_rounds_toward_start() {
        let window = daily(10)
            .current_active_interval(&(t0() - TimeDelta::hours(30)))
            .expect("window should resolve");
        assert_eq!(window.start, t0() - TimeDelta::hours(24));
    }

    #[test]
    fn window_out_of_range() {
        let span = RecurringSpan::bounded(
            t0(),
            TimeDelta::hours(1),
            TimeDelta::days(100_000),
            -i64::MAX,
        )
        .expect("valid span");
        assert!(matches!(
            span.current_active_interval(&t0()),
            Err(SpanError::OutOfRange { .. })
        ));
    }

    #[test]
    fn window_helpers() {
        let window = daily(10)
            .current_active_interval(&t0())
            .expect("window should resolve");
        assert_eq!(window.duration(), TimeDelta::hours(1));
        assert!(window.contains(&t0()));
        assert!(!window.contains(&window.end));
        assert_eq!(
            window.to_string(),
            "[2006-01-02T15:04:05-04:00, 2006-01-02T16:04:05-04:00)"
        );
    }
}
