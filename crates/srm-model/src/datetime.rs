//! Date and time parsing shared by the readers and the coercion table.
//!
//! Spreadsheets store dates as serial day numbers (1900 date system) while
//! delimited text carries them as strings. Both forms end up as chrono
//! `NaiveDate` / `NaiveDateTime` values.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Accepted textual date layouts, tried in order.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

/// Accepted textual date-time layouts, tried in order after RFC 3339.
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Largest serial accepted (9999-12-31 in the 1900 date system).
const MAX_SERIAL: f64 = 2_958_465.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Parses a date from text, falling back to the date part of a date-time.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| parse_timestamp(trimmed).map(|dt| dt.date()))
}

/// Parses a date-time from text. A bare date yields midnight.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_timestamp(trimmed).or_else(|| {
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
            .map(|date| date.and_time(NaiveTime::MIN))
    })
}

fn parse_timestamp(trimmed: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

/// Converts a spreadsheet serial number to a date-time.
///
/// Serial 1 is 1900-01-01. Serials below 60 are shifted by one day to undo
/// the fictitious 1900-02-29 of the 1900 date system. Returns `None` for
/// negative, non-finite or out-of-range serials.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = if serial < 60.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let days = serial.trunc();
    let seconds = ((serial - days) * SECONDS_PER_DAY).round();
    let start = epoch.and_time(NaiveTime::MIN);
    start
        .checked_add_signed(Duration::days(days as i64))?
        .checked_add_signed(Duration::seconds(seconds as i64))
}

/// Converts a date to its spreadsheet serial number.
pub fn date_to_serial(date: NaiveDate) -> f64 {
    datetime_to_serial(date.and_time(NaiveTime::MIN))
}

/// Converts a date-time to its spreadsheet serial number.
pub fn datetime_to_serial(value: NaiveDateTime) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN);
    let elapsed = value - epoch;
    let serial = elapsed.num_seconds() as f64 / SECONDS_PER_DAY;
    if serial < 61.0 { serial - 1.0 } else { serial }
}

/// Serial number of `value` when a worksheet can show it as a date.
///
/// Returns `None` before 1900-01-01 and after 9999-12-31, where the serial
/// would be negative or past the last day of the 1900 date system.
pub fn checked_datetime_to_serial(value: NaiveDateTime) -> Option<f64> {
    let serial = datetime_to_serial(value);
    (1.0..MAX_SERIAL + 1.0).contains(&serial).then_some(serial)
}

/// Date counterpart of [`checked_datetime_to_serial`].
pub fn checked_date_to_serial(date: NaiveDate) -> Option<f64> {
    checked_datetime_to_serial(date.and_time(NaiveTime::MIN))
}
