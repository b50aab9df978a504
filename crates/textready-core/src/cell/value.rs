//! Cell value types

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell (no value)
    Empty,

    /// Text value
    Text(String),

    /// Numeric value
    Number(f64),

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Date/time value
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell contains text
    pub fn is_text(&self) -> bool {
        matches!(self, CellValue::Text(_))
    }

    /// Try to get the value as a text slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Boolean(true) => Some(1.0),
            CellValue::Boolean(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            CellValue::Number(n) => Some(*n != 0.0),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Text(_) => "text",
            CellValue::Number(_) => "number",
            CellValue::Boolean(_) => "boolean",
            CellValue::DateTime(_) => "datetime",
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

/// The epoch of Excel's 1900 date system.
///
/// Serial 1 nominally means 1900-01-01, but the format inherits Lotus 1-2-3's
/// phantom 1900-02-29, so anchoring day 0 at 1899-12-30 yields correct dates
/// for every serial from 1900-03-01 onward.
fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert an Excel serial number to a date/time value.
///
/// Returns `None` for negative or non-finite serials.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let days = serial.trunc() as i64;
    let secs = ((serial - days as f64) * 86_400.0).round() as i64;
    excel_epoch()
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(secs))
}

/// Convert a date/time value to an Excel serial number.
///
/// Sub-second precision is discarded.
pub fn datetime_to_serial(dt: &NaiveDateTime) -> f64 {
    let delta = *dt - excel_epoch();
    delta.num_seconds() as f64 / 86_400.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(CellValue::from(42), CellValue::Number(42.0));
        assert_eq!(CellValue::from(3.14), CellValue::Number(3.14));
        assert_eq!(CellValue::from(true), CellValue::Boolean(true));

        let s = CellValue::from("hello");
        assert_eq!(s.as_text(), Some("hello"));
    }

    #[test]
    fn test_cell_value_as_number() {
        assert_eq!(CellValue::Number(42.0).as_number(), Some(42.0));
        assert_eq!(CellValue::Boolean(true).as_number(), Some(1.0));
        assert_eq!(CellValue::Boolean(false).as_number(), Some(0.0));
        assert_eq!(CellValue::text("hello").as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_serial_to_datetime() {
        let dt = serial_to_datetime(45366.0).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(dt.time(), chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap());

        // Fractional days are times
        let dt = serial_to_datetime(0.5).unwrap();
        assert_eq!(dt.time(), chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap());

        assert!(serial_to_datetime(-1.0).is_none());
        assert!(serial_to_datetime(f64::NAN).is_none());
    }

    #[test]
    fn test_serial_round_trip() {
        for serial in [1.0, 60.0, 45366.0, 45366.75] {
            let dt = serial_to_datetime(serial).unwrap();
            let back = datetime_to_serial(&dt);
            assert!((back - serial).abs() < 1e-9, "serial {} -> {}", serial, back);
        }
    }
}
