/// Epoch year; offset 0 is 1 January of this year
pub const MIN_YEAR: u16 = 1970;

/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;
/// Days in February for common years
pub const FEBRUARY_DAYS_COMMON: u8 = 28;

/// Days in a common (non-leap) year
pub const DAYS_IN_COMMON_YEAR: u32 = 365;

/// Days in a week
pub const DAYS_IN_WEEK: u32 = 7;

/// Weekday index of 1970-01-01 (a Thursday, with Sunday = 0)
pub const EPOCH_WEEKDAY_INDEX: u32 = 4;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (`DD.MM.YYYY`)
pub const DATE_SEPARATOR: char = '.';
/// Range separator (`DD.MM.YYYY/DD.MM.YYYY`)
pub const RANGE_SEPARATOR: char = '/';
