//! Datetime normalization for EXIF timestamp fields.
//!
//! exiftool's wire form for datetime tags is `YYYY:MM:DD HH:MM:SS`. Callers
//! may hand over a structured [`chrono`] value, a date-only string (time is
//! defaulted to midnight), or the full form; everything else is rejected
//! before any write is attempted.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};

/// The backend's full datetime form.
const WIRE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Date-only input form.
const DATE_FORMAT: &str = "%Y:%m:%d";

/// A caller-supplied datetime: structured or textual.
///
/// # Example
///
/// ```rust
/// use exif_edit::datetime::DateTimeValue;
///
/// let v = DateTimeValue::from("2020:01:05");
/// assert_eq!(v.normalize().unwrap(), "2020:01:05 00:00:00");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DateTimeValue {
    Timestamp(NaiveDateTime),
    Text(String),
}

impl DateTimeValue {
    /// The current local time.
    pub fn now() -> Self {
        DateTimeValue::Timestamp(Local::now().naive_local())
    }

    /// Normalize to the wire form.
    ///
    /// Strings are validated by parsing, so calendar-invalid values like a
    /// month of 13 fail with [`Error::InvalidDateTimeFormat`] even when they
    /// look shaped right.
    pub fn normalize(&self) -> Result<String> {
        match self {
            DateTimeValue::Timestamp(dt) => Ok(dt.format(WIRE_FORMAT).to_string()),
            DateTimeValue::Text(s) => normalize_text(s),
        }
    }
}

fn normalize_text(s: &str) -> Result<String> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, WIRE_FORMAT) {
        return Ok(dt.format(WIRE_FORMAT).to_string());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(format!("{} 00:00:00", d.format(DATE_FORMAT)));
    }
    Err(Error::InvalidDateTimeFormat(s.to_string()))
}

impl From<NaiveDateTime> for DateTimeValue {
    fn from(dt: NaiveDateTime) -> Self {
        DateTimeValue::Timestamp(dt)
    }
}

impl From<NaiveDate> for DateTimeValue {
    fn from(d: NaiveDate) -> Self {
        DateTimeValue::Timestamp(d.and_time(NaiveTime::MIN))
    }
}

impl From<&str> for DateTimeValue {
    fn from(s: &str) -> Self {
        DateTimeValue::Text(s.to_string())
    }
}

impl From<String> for DateTimeValue {
    fn from(s: String) -> Self {
        DateTimeValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_only_gets_midnight() {
        let v = DateTimeValue::from("2020:01:05");
        assert_eq!(v.normalize().unwrap(), "2020:01:05 00:00:00");
    }

    #[test]
    fn full_form_passes_through() {
        let v = DateTimeValue::from("2020:01:05 13:45:09");
        assert_eq!(v.normalize().unwrap(), "2020:01:05 13:45:09");
    }

    #[test]
    fn invalid_month_is_rejected() {
        let err = DateTimeValue::from("2020:13:05").normalize().unwrap_err();
        assert!(matches!(err, Error::InvalidDateTimeFormat(s) if s == "2020:13:05"));
    }

    #[test]
    fn arbitrary_text_is_rejected() {
        for s in ["yesterday", "2020-01-05", "2020:01:05 25:00:00", ""] {
            assert!(
                matches!(DateTimeValue::from(s).normalize(), Err(Error::InvalidDateTimeFormat(_))),
                "accepted {s:?}"
            );
        }
    }

    #[test]
    fn structured_timestamp_formats_to_wire_form() {
        let dt = NaiveDate::from_ymd_opt(2021, 7, 4)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(DateTimeValue::from(dt).normalize().unwrap(), "2021:07:04 09:30:00");
    }

    #[test]
    fn date_converts_at_midnight() {
        let d = NaiveDate::from_ymd_opt(2021, 7, 4).unwrap();
        assert_eq!(DateTimeValue::from(d).normalize().unwrap(), "2021:07:04 00:00:00");
    }

    #[test]
    fn now_normalizes() {
        assert!(DateTimeValue::now().normalize().is_ok());
    }
}
