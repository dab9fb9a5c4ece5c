//! Serde helpers that store a [`Date`] as its raw day offset.
//!
//! The text form is the default; use this module where a compact integer is
//! preferred, such as database rows or binary formats.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Invoice {
//!     #[serde(with = "epoch_date::offset")]
//!     due: Date,
//! }
//! ```

use serde::{Deserialize, Deserializer, Serializer, de};

use crate::Date;

/// Writes the date as an unsigned day count since 1970-01-01.
///
/// # Errors
/// Propagates the serializer's error.
pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u32(date.offset())
}

/// Reads an unsigned day count, rejecting offsets past 31.12.9999.
///
/// # Errors
/// Fails if the input is not a `u32` or is out of range.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let offset = u32::deserialize(deserializer)?;
    Date::from_offset(offset).map_err(de::Error::custom)
}
