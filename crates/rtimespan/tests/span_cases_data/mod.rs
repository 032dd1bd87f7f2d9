use chrono::{DateTime, FixedOffset, TimeDelta};
use rtimespan::RecurringSpan;

pub const T0: &str = "2006-01-02T15:04:05-04:00";

pub struct SpanCase {
    pub name: &'static str,
    pub at: &'static str,
    pub member: bool,
    pub window: (&'static str, &'static str),
}

#[must_use]
pub fn parse(text: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(text).expect("valid RFC 3339 timestamp")
}

/// One hour a day for ten days, starting at [`T0`].
#[must_use]
pub fn daily_for_ten_days() -> RecurringSpan {
    RecurringSpan::bounded(parse(T0), TimeDelta::hours(1), TimeDelta::hours(24), 10)
        .expect("valid span")
}

#[must_use]
pub fn daily_cases() -> Vec<SpanCase> {
    vec![
        SpanCase {
            name: "one_minute_after_start",
            at: "2006-01-02T15:05:05-04:00",
            member: true,
            window: ("2006-01-02T15:04:05-04:00", "2006-01-02T16:04:05-04:00"),
        },
        SpanCase {
            name: "last_second_of_first_window",
            at: "2006-01-02T16:04:04-04:00",
            member: true,
            window: ("2006-01-02T15:04:05-04:00", "2006-01-02T16:04:05-04:00"),
        },
        SpanCase {
            name: "start_of_second_cycle",
            at: "2006-01-03T15:04:05-04:00",
            member: true,
            window: ("2006-01-03T15:04:05-04:00", "2006-01-03T16:04:05-04:00"),
        },
        SpanCase {
            name: "tenth_cycle_plus_one_minute",
            at: "2006-01-11T15:05:05-04:00",
            member: true,
            window: ("2006-01-11T15:04:05-04:00", "2006-01-11T16:04:05-04:00"),
        },
        SpanCase {
            name: "one_minute_before_second_cycle",
            at: "2006-01-03T15:04:04-04:00",
            member: false,
            window: ("2006-01-02T15:04:05-04:00", "2006-01-02T16:04:05-04:00"),
        },
        SpanCase {
            name: "end_of_first_off_period",
            at: "2006-01-03T15:03:05-04:00",
            member: false,
            window: ("2006-01-02T15:04:05-04:00", "2006-01-02T16:04:05-04:00"),
        },
        SpanCase {
            name: "exactly_at_active_boundary",
            at: "2006-01-02T16:04:05-04:00",
            member: false,
            window: ("2006-01-02T15:04:05-04:00", "2006-01-02T16:04:05-04:00"),
        },
        SpanCase {
            name: "eleventh_cycle_clamped",
            at: "2006-01-12T15:05:05-04:00",
            member: false,
            window: ("2006-01-11T15:04:05-04:00", "2006-01-11T16:04:05-04:00"),
        },
        SpanCase {
            name: "twelfth_cycle_clamped",
            at: "2006-01-13T15:05:05-04:00",
            member: false,
            window: ("2006-01-11T15:04:05-04:00", "2006-01-11T16:04:05-04:00"),
        },
    ]
}
