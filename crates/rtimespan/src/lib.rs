//! Membership tests for periodically repeating time spans.
//!
//! A [`RecurringSpan`] starts at an instant, repeats every `total` and is active
//! for the first `active` of each cycle, either a bounded number of times,
//! forever, or unconditionally for all time.
//!
//! ```
//! use chrono::{DateTime, TimeDelta};
//! use rtimespan::RecurringSpan;
//!
//! let start = DateTime::parse_from_rfc3339("2006-01-02T15:04:05-04:00").unwrap();
//! let span =
//!     RecurringSpan::bounded(start, TimeDelta::hours(1), TimeDelta::hours(24), 10).unwrap();
//!
//! let next_day = DateTime::parse_from_rfc3339("2006-01-03T15:46:05-04:00").unwrap();
//! assert!(span.contains_time(&next_day));
//! ```

pub mod catalog;
pub mod error;
pub mod eval;
pub mod predicate;
pub mod span;

pub use catalog::SpanCatalog;
pub use error::{SpanError, SpanResult};
pub use eval::ActiveWindow;
pub use predicate::{BoundSpan, Predicate};
pub use span::{RecurringSpan, SpanParts};
