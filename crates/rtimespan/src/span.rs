//! The recurring span value type and its interchange shape.
//!
//! ## Summary
//! A span starts at an instant, repeats on a fixed cycle length and is "on"
//! for the first `active` part of every cycle. It either repeats a bounded
//! number of times, forever, or covers all time unconditionally.

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{SpanError, SpanResult};

/// Wire shape of a [`RecurringSpan`].
///
/// Durations travel as signed nanosecond counts and `start` as an RFC 3339
/// string. `times`, `infinite` and `allTime` default to zero/false when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanParts {
    pub start: DateTime<FixedOffset>,
    #[serde(with = "nanos")]
    pub active: TimeDelta,
    #[serde(with = "nanos")]
    pub total: TimeDelta,
    #[serde(default)]
    pub times: i64,
    #[serde(default)]
    pub infinite: bool,
    #[serde(default, rename = "allTime", alias = "alltime")]
    pub all_time: bool,
}

/// A time span repeated on a fixed cycle.
///
/// Immutable once built; every constructor (including deserialization)
/// rejects a non-positive cycle length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SpanParts", into = "SpanParts")]
pub struct RecurringSpan {
    start: DateTime<FixedOffset>,
    active: TimeDelta,
    total: TimeDelta,
    times: i64,
    infinite: bool,
    all_time: bool,
}

impl RecurringSpan {
    /// ## Summary
    /// Builds a span repeating `times` cycles (indices `0..times`).
    ///
    /// ## Errors
    /// Returns `SpanError::NonPositiveTotal` if `total <= 0`, or
    /// `SpanError::DurationOutOfRange` if a duration does not fit in `i64` nanoseconds.
    pub fn bounded(
        start: DateTime<FixedOffset>,
        active: TimeDelta,
        total: TimeDelta,
        times: i64,
    ) -> SpanResult<Self> {
        Self::try_from(SpanParts {
            start,
            active,
            total,
            times,
            infinite: false,
            all_time: false,
        })
    }

    /// ## Summary
    /// Builds a span repeating forever.
    ///
    /// ## Errors
    /// Same as [`RecurringSpan::bounded`].
    pub fn unbounded(
        start: DateTime<FixedOffset>,
        active: TimeDelta,
        total: TimeDelta,
    ) -> SpanResult<Self> {
        Self::try_from(SpanParts {
            start,
            active,
            total,
            times: 0,
            infinite: true,
            all_time: false,
        })
    }

    /// Marks the span as containing every instant.
    #[must_use]
    pub const fn covering_all_time(mut self) -> Self {
        self.all_time = true;
        self
    }

    #[must_use]
    pub const fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    /// Length of the "on" part of each cycle.
    #[must_use]
    pub const fn active(&self) -> TimeDelta {
        self.active
    }

    /// Length of one full cycle.
    #[must_use]
    pub const fn total(&self) -> TimeDelta {
        self.total
    }

    /// Repeat count. Ignored when the span is infinite.
    #[must_use]
    pub const fn times(&self) -> i64 {
        self.times
    }

    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        self.infinite
    }

    #[must_use]
    pub const fn is_all_time(&self) -> bool {
        self.all_time
    }
}

impl TryFrom<SpanParts> for RecurringSpan {
    type Error = SpanError;

    fn try_from(parts: SpanParts) -> SpanResult<Self> {
        if parts.total <= TimeDelta::zero() {
            return Err(SpanError::NonPositiveTotal { total: parts.total });
        }
        for (field, value) in [("active", parts.active), ("total", parts.total)] {
            if value.num_nanoseconds().is_none() {
                return Err(SpanError::DurationOutOfRange { field, value });
            }
        }

        if parts.active < TimeDelta::zero() || parts.active > parts.total {
            tracing::debug!(
                active = %parts.active,
                total = %parts.total,
                "Active duration outside [0, total]"
            );
        }
        if !parts.infinite && !parts.all_time && parts.times <= 0 {
            tracing::debug!(times = parts.times, "Bounded span with no cycles is never active");
        }

        Ok(Self {
            start: parts.start,
            active: parts.active,
            total: parts.total,
            times: parts.times,
            infinite: parts.infinite,
            all_time: parts.all_time,
        })
    }
}

impl From<RecurringSpan> for SpanParts {
    fn from(span: RecurringSpan) -> Self {
        Self {
            start: span.start,
            active: span.active,
            total: span.total,
            times: span.times,
            infinite: span.infinite,
            all_time: span.all_time,
        }
    }
}

/// `TimeDelta` as a signed nanosecond count.
mod nanos {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer, ser::Error as _};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        let nanos = value.num_nanoseconds().ok_or_else(|| {
            S::Error::custom(format!("duration {value} overflows i64 nanoseconds"))
        })?;
        serializer.serialize_i64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        i64::deserialize(deserializer).map(TimeDelta::nanoseconds)
    }
}
