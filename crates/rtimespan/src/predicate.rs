//! Deferred boolean values.

use chrono::{DateTime, TimeZone};

use crate::span::RecurringSpan;

/// A value that resolves to a boolean when asked.
pub trait Predicate {
    fn value(&self) -> bool;
}

impl Predicate for bool {
    fn value(&self) -> bool {
        *self
    }
}

impl<P: Predicate + ?Sized> Predicate for &P {
    fn value(&self) -> bool {
        (**self).value()
    }
}

/// A span bound to a fixed instant; its value is the span's membership at that instant.
#[derive(Debug, Clone)]
pub struct BoundSpan<'a, Tz: TimeZone> {
    pub span: &'a RecurringSpan,
    pub at: DateTime<Tz>,
}

impl<Tz: TimeZone> Predicate for BoundSpan<'_, Tz> {
    fn value(&self) -> bool {
        self.span.contains_time(&self.at)
    }
}

impl RecurringSpan {
    /// Binds this span to `at`.
    #[must_use]
    pub fn at<Tz: TimeZone>(&self, at: DateTime<Tz>) -> BoundSpan<'_, Tz> {
        BoundSpan { span: self, at }
    }
}
