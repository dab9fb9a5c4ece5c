//! Shorthand constructors for tests.

use crate::{Date, DateRange, Month};

pub fn date(day: u8, month: u8, year: u16) -> Date {
    Date::from_numbers(day, month, year)
        .unwrap_or_else(|err| panic!("invalid test date {day}.{month}.{year}: {err}"))
}

pub fn month(number: u8) -> Month {
    Month::from_number(number).unwrap_or_else(|err| panic!("invalid test month: {err}"))
}

pub fn span(start: Date, end: Date) -> DateRange {
    DateRange::new(start, end).unwrap_or_else(|err| panic!("invalid test range: {err}"))
}
