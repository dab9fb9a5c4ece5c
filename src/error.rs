//! Error types for construction, arithmetic and parsing of dates.

use crate::consts::{MAX_MONTH, MAX_YEAR, MIN_YEAR};
use crate::prelude::*;

/// Malformed text input, detected before any calendar validation happens.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Error type for every fallible date operation.
///
/// No invalid [`Date`](crate::Date) can exist, so this is the only place an
/// out-of-range or malformed date ever shows up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Year outside `MIN_YEAR..=MAX_YEAR`.
    #[error("Invalid year: {0} (must be {min}-{max})", min = MIN_YEAR, max = MAX_YEAR)]
    InvalidYear(u16),

    /// Month number outside `1..=12`.
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),

    /// Day is zero or past the end of its month.
    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { day: u8, month: u8, year: u16 },

    /// Weekday index outside `0..=6`.
    #[error("Invalid weekday index: {0} (must be 0-6)")]
    InvalidWeekDay(u8),

    /// Raw day offset past 31.12.9999.
    #[error("Invalid day offset: {0} (must be 0-{max})", max = crate::engine::MAX_OFFSET)]
    InvalidOffset(u32),

    /// Arithmetic moved the date outside the representable range.
    #[error("Date range exceeded: offset {offset} shifted by {days} days")]
    RangeExceeded { offset: u32, days: i64 },

    /// Text input could not be split into day, month and year.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
