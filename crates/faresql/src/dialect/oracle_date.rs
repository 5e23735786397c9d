//! Oracle packed date wire format.
//!
//! Seven raw bytes: `[century, year, month, day, hour, min, sec]`.
//! Century and year are offset by 100; the time fields use excess-one
//! notation (stored = actual + 1, so a stored 1 means "unset/zero").
//! Two sentinel byte patterns carry the ±infinity dates.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::value::{is_neg_infinity, is_pos_infinity, neg_infinity, pos_infinity};

/// Positive infinity: 9999-12-31 23:59:59.
pub const POS_INFINITY_BYTES: [u8; 7] = [199, 199, 12, 31, 24, 60, 60];

/// Negative infinity: Julian year -4712, time unset.
pub const NEG_INFINITY_BYTES: [u8; 7] = [53, 88, 1, 1, 1, 1, 1];

/// A date or timestamp in Oracle's packed 7-byte bind layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleDate([u8; 7]);

impl OracleDate {
    /// Encode a timestamp. Sentinels map to their fixed byte patterns.
    pub fn from_datetime(dt: &NaiveDateTime) -> Self {
        if is_pos_infinity(dt) {
            return Self(POS_INFINITY_BYTES);
        }
        if is_neg_infinity(dt) {
            return Self(NEG_INFINITY_BYTES);
        }
        Self(pack(
            dt.year(),
            dt.month() as u8,
            dt.day() as u8,
            dt.hour() as u8,
            dt.minute() as u8,
            dt.second() as u8,
        ))
    }

    /// Encode a date-only bind: the time fields are always stored as 1
    /// (zero in excess-one notation), regardless of the source time.
    pub fn from_date(dt: &NaiveDateTime) -> Self {
        if is_pos_infinity(dt) {
            return Self(POS_INFINITY_BYTES);
        }
        if is_neg_infinity(dt) {
            return Self(NEG_INFINITY_BYTES);
        }
        Self(pack(dt.year(), dt.month() as u8, dt.day() as u8, 0, 0, 0))
    }

    /// Raw wire bytes.
    pub fn bytes(&self) -> &[u8; 7] {
        &self.0
    }

    pub fn from_bytes(bytes: [u8; 7]) -> Self {
        Self(bytes)
    }

    /// Decode back to a timestamp. Sentinel patterns yield the sentinel
    /// instants; `None` means the buffer does not hold a valid date.
    pub fn decode(&self) -> Option<NaiveDateTime> {
        if self.0 == POS_INFINITY_BYTES {
            return Some(pos_infinity());
        }
        if self.0 == NEG_INFINITY_BYTES {
            return Some(neg_infinity());
        }
        let [century, year, month, day, hour, min, sec] = self.0;
        let full_year = (century as i32 - 100) * 100 + (year as i32 - 100);
        let date = NaiveDate::from_ymd_opt(full_year, month as u32, day as u32)?;
        date.and_hms_opt(
            hour.checked_sub(1)? as u32,
            min.checked_sub(1)? as u32,
            sec.checked_sub(1)? as u32,
        )
    }
}

fn pack(year: i32, month: u8, day: u8, hour: u8, min: u8, sec: u8) -> [u8; 7] {
    [
        (year / 100 + 100) as u8,
        (year % 100 + 100) as u8,
        month,
        day,
        hour + 1,
        min + 1,
        sec + 1,
    ]
}
