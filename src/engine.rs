//! Conversions between day offsets and calendar parts.
//!
//! An offset counts days since 1970-01-01. Every function here assumes its
//! inputs were already validated; [`Date`](crate::Date) is the gate.

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_COMMON_YEAR, DAYS_IN_WEEK, EPOCH_WEEKDAY_INDEX, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_YEAR, MIN_DAY, MIN_YEAR,
};
use crate::types::{Month, WeekDay};

/// Offset of 31.12.9999, the last representable day
pub const MAX_OFFSET: u32 = days_before_year(MAX_YEAR + 1) - 1;

/// Number of leap years in `1..=year`
pub const fn count_leap_years(year: u32) -> u32 {
    year / LEAP_YEAR_CYCLE as u32 - year / CENTURY_CYCLE as u32 + year / GREGORIAN_CYCLE as u32
}

/// Days in years `1..=year` of the proleptic Gregorian calendar
const fn days_through_year(year: u32) -> u32 {
    year * DAYS_IN_COMMON_YEAR + count_leap_years(year)
}

/// Days between 1970-01-01 and 1 January of `year`
///
/// Exact for every year in `MIN_YEAR..=MAX_YEAR + 1`; years before the epoch
/// clamp to 0.
pub const fn days_before_year(year: u16) -> u32 {
    if year <= MIN_YEAR {
        return 0;
    }
    days_through_year(year as u32 - 1) - days_through_year(MIN_YEAR as u32 - 1)
}

/// Offset of a validated (day, month, year)
pub(crate) fn parts_to_offset(day: u8, month: Month, year: u16) -> u32 {
    let before_month: u32 = Month::ALL
        .iter()
        .take_while(|m| **m < month)
        .map(|m| u32::from(m.days_in(year)))
        .sum();

    days_before_year(year) + before_month + u32::from(day - MIN_DAY)
}

/// Year containing `offset`, found by bisection over `MIN_YEAR..=MAX_YEAR`
pub(crate) fn year_from_offset(offset: u32) -> u16 {
    debug_assert!(offset <= MAX_OFFSET);

    // Last year whose 1 January is at or before the offset
    let mut low = MIN_YEAR;
    let mut high = MAX_YEAR + 1;
    while low < high {
        let mid = low + (high - low) / 2;
        if days_before_year(mid) <= offset {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    let year = low - 1;
    tracing::trace!(offset, year, "resolved year from offset");
    year
}

/// Splits a validated offset into (day, month, year)
pub(crate) fn offset_to_parts(offset: u32) -> (u8, Month, u16) {
    let year = year_from_offset(offset);
    let mut remaining = offset - days_before_year(year);

    let mut month = Month::January;
    loop {
        let length = u32::from(month.days_in(year));
        if remaining < length {
            break;
        }
        remaining -= length;
        match month.succ() {
            Some(next) => month = next,
            None => break,
        }
    }

    // remaining < 31 once the walk stops
    #[allow(clippy::cast_possible_truncation)]
    let day = remaining as u8 + MIN_DAY;
    (day, month, year)
}

/// Weekday of `offset`; 1970-01-01 was a Thursday
pub const fn weekday_from_offset(offset: u32) -> WeekDay {
    WeekDay::from_index(offset % DAYS_IN_WEEK + EPOCH_WEEKDAY_INDEX)
}

/// 1-based position of `offset` within its year
pub(crate) fn day_of_year(offset: u32) -> u16 {
    let year = year_from_offset(offset);
    // At most 365 past 1 January
    #[allow(clippy::cast_possible_truncation)]
    let ordinal = (offset - days_before_year(year)) as u16;
    ordinal + 1
}
