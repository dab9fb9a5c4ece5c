mod consts;
mod engine;
mod error;
pub mod offset;
mod prelude;
mod range;
#[cfg(test)]
mod test_utils;
mod types;

pub use consts::*;
pub use engine::{MAX_OFFSET, count_leap_years, days_before_year, weekday_from_offset};
pub use error::{DateError, ParseError};
pub use range::{DateRange, DateRangeIter, RangeError};
pub use types::{Day, Month, WeekDay, Year, days_in_month, is_leap_year};

use crate::engine::{offset_to_parts, parts_to_offset, year_from_offset};
use crate::prelude::*;
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;
use tracing::debug;

/// A single day of the Gregorian calendar between 01.01.1970 and 31.12.9999.
///
/// Stored as the number of days since 1970-01-01, so ordering, hashing and
/// day arithmetic all work on one integer. Day, month and year are derived
/// on demand. Every value is valid: construction and arithmetic return
/// [`DateError`] instead of producing an out-of-range date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Into)]
pub struct Date {
    offset: u32,
}

impl Date {
    /// 01.01.1970, offset 0
    pub const EPOCH: Self = Self { offset: 0 };
    /// Earliest representable date (the epoch)
    pub const MIN: Self = Self::EPOCH;
    /// Latest representable date, 31.12.9999
    pub const MAX: Self = Self { offset: MAX_OFFSET };

    /// Creates a date from its calendar parts
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` or `DateError::InvalidDay` if the
    /// parts do not name a day between 01.01.1970 and 31.12.9999.
    pub fn new(day: u8, month: Month, year: u16) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let day = Day::new(day, year.get(), month)?;
        Ok(Self {
            offset: parts_to_offset(day.get(), month, year.get()),
        })
    }

    /// Creates a date from numeric parts, validating the month number too
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear`, `DateError::InvalidMonth` or
    /// `DateError::InvalidDay`, checked in that order.
    pub fn from_numbers(day: u8, month: u8, year: u16) -> Result<Self, DateError> {
        Year::new(year)?;
        let month = Month::from_number(month)?;
        Self::new(day, month, year)
    }

    /// Creates a date from a day offset since 1970-01-01
    ///
    /// # Errors
    /// Returns `DateError::InvalidOffset` if `offset` is past [`MAX_OFFSET`].
    pub const fn from_offset(offset: u32) -> Result<Self, DateError> {
        if offset > MAX_OFFSET {
            return Err(DateError::InvalidOffset(offset));
        }
        Ok(Self { offset })
    }

    /// Caller guarantees `offset <= MAX_OFFSET`
    pub(crate) const fn from_offset_unchecked(offset: u32) -> Self {
        debug_assert!(offset <= MAX_OFFSET);
        Self { offset }
    }

    /// Days since 1970-01-01
    #[inline]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// (day, month, year) in one conversion
    pub fn parts(self) -> (u8, Month, u16) {
        offset_to_parts(self.offset)
    }

    /// Day of the month (1..=31)
    pub fn day(self) -> u8 {
        self.parts().0
    }

    pub fn month(self) -> Month {
        self.parts().1
    }

    pub fn year(self) -> u16 {
        year_from_offset(self.offset)
    }

    pub const fn weekday(self) -> WeekDay {
        weekday_from_offset(self.offset)
    }

    /// 1-based day within the year (1..=366)
    pub fn day_of_year(self) -> u16 {
        engine::day_of_year(self.offset)
    }

    pub fn is_leap_year(self) -> bool {
        is_leap_year(self.year())
    }

    /// Length of the month this date falls in
    pub fn days_in_month(self) -> u8 {
        let (_, month, year) = self.parts();
        days_in_month(year, month)
    }

    /// Shifts the date by `days`, which may be negative
    ///
    /// # Errors
    /// Returns `DateError::RangeExceeded` if the result would fall before
    /// 01.01.1970 or after 31.12.9999.
    pub fn add_days(self, days: i32) -> Result<Self, DateError> {
        self.shift(i64::from(days))
    }

    /// Shifts the date back by `days`
    ///
    /// # Errors
    /// Returns `DateError::RangeExceeded` under the same conditions as [`Date::add_days`].
    pub fn sub_days(self, days: i32) -> Result<Self, DateError> {
        self.shift(-i64::from(days))
    }

    fn shift(self, days: i64) -> Result<Self, DateError> {
        let target = i64::from(self.offset) + days;
        u32::try_from(target)
            .ok()
            .filter(|offset| *offset <= MAX_OFFSET)
            .map(Self::from_offset_unchecked)
            .ok_or_else(|| {
                debug!(offset = self.offset, days, "date arithmetic out of range");
                DateError::RangeExceeded {
                    offset: self.offset,
                    days,
                }
            })
    }

    /// The following day
    ///
    /// # Errors
    /// Returns `DateError::RangeExceeded` on 31.12.9999.
    pub fn succ(self) -> Result<Self, DateError> {
        self.shift(1)
    }

    /// The preceding day
    ///
    /// # Errors
    /// Returns `DateError::RangeExceeded` on 01.01.1970.
    pub fn pred(self) -> Result<Self, DateError> {
        self.shift(-1)
    }

    /// Advances to the next day in place; on error `self` is left unchanged
    ///
    /// # Errors
    /// Returns `DateError::RangeExceeded` on 31.12.9999.
    pub fn increment(&mut self) -> Result<(), DateError> {
        *self = self.succ()?;
        Ok(())
    }

    /// Steps back one day in place; on error `self` is left unchanged
    ///
    /// # Errors
    /// Returns `DateError::RangeExceeded` on 01.01.1970.
    pub fn decrement(&mut self) -> Result<(), DateError> {
        *self = self.pred()?;
        Ok(())
    }

    /// In-place [`Date::add_days`]; on error `self` is left unchanged
    ///
    /// # Errors
    /// Returns `DateError::RangeExceeded` if the result leaves the valid range.
    pub fn add_assign_days(&mut self, days: i32) -> Result<(), DateError> {
        *self = self.add_days(days)?;
        Ok(())
    }

    /// In-place [`Date::sub_days`]; on error `self` is left unchanged
    ///
    /// # Errors
    /// Returns `DateError::RangeExceeded` if the result leaves the valid range.
    pub fn sub_assign_days(&mut self, days: i32) -> Result<(), DateError> {
        *self = self.sub_days(days)?;
        Ok(())
    }

    /// Signed number of days from `other` to `self`
    // Both offsets are at most MAX_OFFSET, far below i32::MAX
    #[allow(clippy::cast_possible_wrap)]
    pub const fn days_since(self, other: Self) -> i32 {
        self.offset as i32 - other.offset as i32
    }

    /// Reads one whitespace-delimited date from the front of `input`
    ///
    /// Leading whitespace is skipped. Returns the date and whatever follows
    /// the token, untouched.
    ///
    /// # Errors
    /// Returns `ParseError::EmptyInput` if no token is left, otherwise the
    /// same errors as [`str::parse`].
    pub fn parse_prefix(input: &str) -> Result<(Self, &str), DateError> {
        let rest = input.trim_start();
        if rest.is_empty() {
            return Err(ParseError::EmptyInput.into());
        }

        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (token, remainder) = rest.split_at(end);
        Ok((token.parse()?, remainder))
    }

    /// Parses one all-digit date field
    fn parse_field<T: FromStr>(field: &str) -> Result<T, ParseError> {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(field.to_owned()));
        }
        field
            .parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(field.to_owned()))
    }

    fn parse_token(token: &str) -> Result<Self, DateError> {
        if token.is_empty() {
            return Err(ParseError::EmptyInput.into());
        }
        if token.contains(char::is_whitespace) {
            let message = format!("Expected a single token: {token}");
            return Err(ParseError::InvalidFormat(message).into());
        }

        let parts: Vec<&str> = token.split(DATE_SEPARATOR).collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected DD{DATE_SEPARATOR}MM{DATE_SEPARATOR}YYYY, \
                 found {} {DATE_SEPARATOR} separators in {token}",
                parts.len() - 1
            ))
            .into());
        };

        let day = Self::parse_field::<u8>(day)?;
        let month = Self::parse_field::<u8>(month)?;
        let year = Self::parse_field::<u16>(year)?;

        Self::from_numbers(day, month, year)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (day, month, year) = self.parts();
        write!(
            f,
            "{day:02}{DATE_SEPARATOR}{:02}{DATE_SEPARATOR}{year:04}",
            month.number()
        )
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_token(s.trim()).inspect_err(|err| {
            debug!(input = s, error = %err, "rejected date text");
        })
    }
}

impl Sub for Date {
    type Output = i32;

    /// Day difference; shifting by a day count is [`Date::sub_days`]
    fn sub(self, other: Self) -> i32 {
        self.days_since(other)
    }
}

impl TryFrom<u32> for Date {
    type Error = DateError;

    fn try_from(offset: u32) -> Result<Self, Self::Error> {
        Self::from_offset(offset)
    }
}

impl TryFrom<(u8, u8, u16)> for Date {
    type Error = DateError;

    fn try_from((day, month, year): (u8, u8, u16)) -> Result<Self, Self::Error> {
        Self::from_numbers(day, month, year)
    }
}

impl From<Date> for (u8, Month, u16) {
    fn from(date: Date) -> Self {
        date.parts()
    }
}

impl serde::Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_default_is_epoch() {
        let epoch = Date::default();
        assert_eq!(epoch, Date::EPOCH);
        assert_eq!(epoch.offset(), 0);
        assert_eq!(epoch.parts(), (1, Month::January, 1970));
        assert_eq!(epoch.weekday(), WeekDay::Thursday);
    }

    #[test]
    fn test_from_offset_zero() {
        assert_eq!(Date::from_offset(0).unwrap(), date(1, 1, 1970));
    }

    #[test]
    fn test_from_offset_out_of_range() {
        assert!(Date::from_offset(MAX_OFFSET).is_ok());
        assert_eq!(
            Date::from_offset(MAX_OFFSET + 1),
            Err(DateError::InvalidOffset(MAX_OFFSET + 1))
        );
        assert!(Date::try_from(u32::MAX).is_err());
    }

    #[test]
    fn test_new_validation_cases() {
        struct TestCase {
            day: u8,
            month: u8,
            year: u16,
            expected: Result<(), DateError>,
            description: &'static str,
        }

        let cases = [
            TestCase {
                day: 29,
                month: 2,
                year: 2024,
                expected: Ok(()),
                description: "leap day in a leap year",
            },
            TestCase {
                day: 29,
                month: 2,
                year: 2023,
                expected: Err(DateError::InvalidDay {
                    day: 29,
                    month: 2,
                    year: 2023,
                }),
                description: "leap day in a common year",
            },
            TestCase {
                day: 1,
                month: 13,
                year: 2023,
                expected: Err(DateError::InvalidMonth(13)),
                description: "month past December",
            },
            TestCase {
                day: 0,
                month: 1,
                year: 2023,
                expected: Err(DateError::InvalidDay {
                    day: 0,
                    month: 1,
                    year: 2023,
                }),
                description: "day zero",
            },
            TestCase {
                day: 31,
                month: 12,
                year: 1969,
                expected: Err(DateError::InvalidYear(1969)),
                description: "before the epoch",
            },
            TestCase {
                day: 1,
                month: 1,
                year: 10_000,
                expected: Err(DateError::InvalidYear(10_000)),
                description: "after 9999",
            },
        ];

        for case in &cases {
            let result = Date::from_numbers(case.day, case.month, case.year).map(|_| ());
            assert_eq!(result, case.expected, "{}", case.description);
        }
    }

    #[test]
    fn test_invalid_parts_never_reach_an_offset() {
        assert_eq!(
            Date::new(30, Month::February, 2023),
            Err(DateError::InvalidDay {
                day: 30,
                month: 2,
                year: 2023
            })
        );
        assert_eq!(
            Date::new(0, Month::January, 1970),
            Err(DateError::InvalidDay {
                day: 0,
                month: 1,
                year: 1970
            })
        );
        assert_eq!(
            Date::try_from(MAX_OFFSET + 1),
            Err(DateError::InvalidOffset(MAX_OFFSET + 1))
        );
    }

    #[test]
    fn test_accessors() {
        let d = date(15, 6, 2023);
        assert_eq!(d.day(), 15);
        assert_eq!(d.month(), Month::June);
        assert_eq!(d.year(), 2023);
        assert_eq!(d.weekday(), WeekDay::Thursday);
        assert_eq!(d.day_of_year(), 166);
        assert!(!d.is_leap_year());
        assert_eq!(d.days_in_month(), 30);

        let offset: u32 = d.into();
        assert_eq!(offset, d.offset());
    }

    #[test]
    fn test_max_date() {
        assert_eq!(Date::MAX, date(31, 12, 9999));
        assert_eq!(Date::MAX.offset(), 2_932_896);
        assert_eq!(Date::MAX.weekday(), WeekDay::Friday);
    }

    #[test]
    fn test_add_days_across_leap_day() {
        let feb28 = date(28, 2, 2024);
        let leap_day = feb28.add_days(1).unwrap();
        assert_eq!(leap_day, date(29, 2, 2024));
        assert_eq!(leap_day.add_days(1).unwrap(), date(1, 3, 2024));
        assert_eq!(date(1, 3, 2024).add_days(-2).unwrap(), feb28);
        assert_eq!(date(1, 3, 2024).sub_days(2).unwrap(), feb28);
    }

    #[test]
    fn test_difference() {
        assert_eq!(date(1, 3, 2024) - date(28, 2, 2024), 2);
        assert_eq!(date(28, 2, 2024) - date(1, 3, 2024), -2);
        assert_eq!(date(1, 3, 2023).days_since(date(28, 2, 2023)), 1);
        assert_eq!(Date::MAX - Date::MIN, 2_932_896);
    }

    #[test]
    fn test_arithmetic_out_of_range() {
        assert_eq!(
            Date::EPOCH.pred(),
            Err(DateError::RangeExceeded {
                offset: 0,
                days: -1
            })
        );
        assert_eq!(
            Date::MAX.succ(),
            Err(DateError::RangeExceeded {
                offset: MAX_OFFSET,
                days: 1
            })
        );
        assert!(Date::EPOCH.add_days(i32::MIN).is_err());
        assert!(Date::EPOCH.sub_days(i32::MIN).is_err());
        assert!(Date::MAX.add_days(i32::MAX).is_err());
        assert_eq!(Date::EPOCH.add_days(0).unwrap(), Date::EPOCH);
    }

    #[test]
    fn test_increment_and_decrement_in_place() {
        let mut d = date(31, 12, 2023);
        d.increment().unwrap();
        assert_eq!(d, date(1, 1, 2024));
        d.decrement().unwrap();
        assert_eq!(d, date(31, 12, 2023));

        d.add_assign_days(60).unwrap();
        assert_eq!(d, date(29, 2, 2024));
        d.sub_assign_days(59).unwrap();
        assert_eq!(d, date(1, 1, 2024));
    }

    #[test]
    fn test_failed_step_leaves_date_unchanged() {
        let mut first = Date::EPOCH;
        assert!(first.decrement().is_err());
        assert_eq!(first, Date::EPOCH);

        let mut last = Date::MAX;
        assert!(last.increment().is_err());
        assert_eq!(last, Date::MAX);

        assert!(last.add_assign_days(1).is_err());
        assert!(first.sub_assign_days(1).is_err());
        assert_eq!(last, Date::MAX);
        assert_eq!(first, Date::EPOCH);
    }

    #[test]
    fn test_ordering() {
        let a = date(31, 12, 1999);
        let b = date(1, 1, 2000);
        let c = date(2, 1, 2000);
        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
        assert!(c >= b);
        assert_eq!(a, a);
        assert_ne!(a, b);
        assert_eq!(a.max(c), c);
    }

    #[test]
    fn test_display() {
        assert_eq!(date(1, 3, 2024).to_string(), "01.03.2024");
        assert_eq!(Date::EPOCH.to_string(), "01.01.1970");
        assert_eq!(Date::MAX.to_string(), "31.12.9999");
        assert_eq!(date(9, 11, 1989).to_string().len(), 10);
    }

    #[test]
    fn test_parse_round_trip() {
        let parsed = "15.06.2023".parse::<Date>().unwrap();
        assert_eq!(parsed, date(15, 6, 2023));
        assert_eq!(parsed.to_string(), "15.06.2023");
    }

    #[test]
    fn test_parse_lenient_padding_and_whitespace() {
        assert_eq!("1.3.2024".parse::<Date>().unwrap(), date(1, 3, 2024));
        assert_eq!("  01.03.2024\n".parse::<Date>().unwrap(), date(1, 3, 2024));
    }

    #[test]
    fn test_parse_invalid_values() {
        assert_eq!(
            "31.13.2023".parse::<Date>(),
            Err(DateError::InvalidMonth(13))
        );
        assert!(matches!(
            "00.01.2023".parse::<Date>(),
            Err(DateError::InvalidDay { day: 0, .. })
        ));
        assert!(matches!(
            "30.02.2024".parse::<Date>(),
            Err(DateError::InvalidDay { .. })
        ));
        assert_eq!(
            "01.01.1969".parse::<Date>(),
            Err(DateError::InvalidYear(1969))
        );
    }

    #[test]
    fn test_parse_malformed_tokens() {
        let malformed = [
            "15-06-2023",
            "15/06/2023",
            "15.06",
            "15.06.2023.01",
            "15..2023",
            "aa.06.2023",
            "15.06.20x3",
            "+1.06.2023",
            "15.06.-2023",
            "300.06.2023",
            "15.06.99999",
            "15.06.2023 16.06.2023",
        ];
        for input in malformed {
            let result = input.parse::<Date>();
            assert!(
                matches!(result, Err(DateError::Parse(ParseError::InvalidFormat(_)))),
                "{input:?} should be a format error, got {result:?}"
            );
        }
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(
            "".parse::<Date>(),
            Err(DateError::Parse(ParseError::EmptyInput))
        );
        assert_eq!(
            "   ".parse::<Date>(),
            Err(DateError::Parse(ParseError::EmptyInput))
        );
    }

    #[test]
    fn test_parse_prefix() {
        let (first, rest) = Date::parse_prefix("01.01.2000 02.01.2000").unwrap();
        assert_eq!(first, date(1, 1, 2000));
        assert_eq!(rest, " 02.01.2000");

        let (second, rest) = Date::parse_prefix(rest).unwrap();
        assert_eq!(second, date(2, 1, 2000));
        assert_eq!(rest, "");

        assert_eq!(
            Date::parse_prefix(rest),
            Err(DateError::Parse(ParseError::EmptyInput))
        );
        assert!(Date::parse_prefix("31.02.2000 rest").is_err());
    }

    #[test]
    fn test_try_from_tuple() {
        let d: Date = (29, 2, 2024).try_into().unwrap();
        assert_eq!(d.parts(), (29, Month::February, 2024));

        let parts: (u8, Month, u16) = d.into();
        assert_eq!(parts, (29, Month::February, 2024));

        let result: Result<Date, _> = (29, 2, 2023).try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_string_format() {
        let d = date(15, 6, 2023);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""15.06.2023""#);
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d);
    }

    #[test]
    fn test_serde_validation() {
        for json in [r#""31.13.2023""#, r#""29.02.2023""#, r#""2023-06-15""#, "19783"] {
            let result: Result<Date, _> = serde_json::from_str(json);
            assert!(result.is_err(), "{json} should be rejected");
        }
    }

    #[test]
    fn test_constants() {
        assert_eq!(MIN_YEAR, 1970);
        assert_eq!(MAX_YEAR, 9999);
        assert_eq!(DATE_SEPARATOR, '.');
    }
}
