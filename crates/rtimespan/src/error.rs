use chrono::TimeDelta;
use thiserror::Error;

/// Span construction and evaluation errors
#[derive(Error, Debug)]
pub enum SpanError {
    #[error("Cycle length must be positive, got {total}")]
    NonPositiveTotal { total: TimeDelta },

    #[error("Duration {field} does not fit in a 64-bit nanosecond count: {value}")]
    DurationOutOfRange { field: &'static str, value: TimeDelta },

    #[error("Active window for cycle {cycle} is outside the representable time range")]
    OutOfRange { cycle: i128 },

    #[error("Catalog source error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Catalog payload error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] rtimespan_core::error::CoreError),
}

pub type SpanResult<T> = std::result::Result<T, SpanError>;
