//! Bindable values and the ±infinity date sentinels.
//!
//! The domain models "effective forever" and "never effective" dates with
//! fixed sentinel instants; every dialect and the packed wire codec must
//! recognize them.

use chrono::{NaiveDate, NaiveDateTime};

/// A typed value bound into a SQL statement.
///
/// Closed set: the binder dispatches on this by pattern match, so adding
/// an arm is a deliberate API change, not an open-ended subclass.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

/// The "effective forever" instant: `9999-12-31T23:59:59.999000`.
pub fn pos_infinity() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .unwrap()
        .and_hms_micro_opt(23, 59, 59, 999_000)
        .unwrap()
}

/// The "never effective" instant: `0001-01-01T00:00:00`.
pub fn neg_infinity() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// True for the positive-infinity sentinel. The fractional part is not
/// consulted so that second-precision copies of the sentinel still match.
pub fn is_pos_infinity(dt: &NaiveDateTime) -> bool {
    use chrono::{Datelike, Timelike};
    dt.year() == 9999
        && dt.month() == 12
        && dt.day() == 31
        && dt.hour() == 23
        && dt.minute() == 59
        && dt.second() == 59
}

/// True for the negative-infinity sentinel.
pub fn is_neg_infinity(dt: &NaiveDateTime) -> bool {
    *dt == neg_infinity()
}

impl Value {
    /// Short type tag used in audit output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int32(_) => "int",
            Value::Int64(_) => "long",
            Value::Float(_) => "float",
            Value::Text(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Human-readable rendering used when reconstructing an executed
    /// statement for logs. Strings are quoted; everything else is bare.
    pub fn display_string(&self) -> String {
        match self {
            Value::Int32(v) => v.to_string(),
            Value::Int64(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Text(v) => format!("'{v}'"),
            Value::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_recognized() {
        assert!(is_pos_infinity(&pos_infinity()));
        assert!(is_neg_infinity(&neg_infinity()));
        assert!(!is_pos_infinity(&neg_infinity()));
        assert!(!is_neg_infinity(&pos_infinity()));
    }

    #[test]
    fn pos_infinity_matches_without_fractional_seconds() {
        let truncated = NaiveDate::from_ymd_opt(9999, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert!(is_pos_infinity(&truncated));
    }

    #[test]
    fn display_quotes_strings_only() {
        assert_eq!(Value::from("ABC").display_string(), "'ABC'");
        assert_eq!(Value::from(42_i64).display_string(), "42");
    }
}
