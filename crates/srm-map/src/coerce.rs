//! Cell-to-value coercion table.
//!
//! Each target [`ScalarKind`] lists the cell variants it accepts. Anything
//! not listed fails; nothing is guessed or truncated. Missing cells are
//! handled by the mapper before this table is consulted.

use chrono::NaiveTime;
use srm_model::datetime::{parse_date, parse_datetime, serial_to_datetime};
use srm_model::{CellValue, ScalarKind, Value};

// 2^63; `i64::MAX as f64` rounds up to this.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Converts a non-missing cell to a value of `kind`.
///
/// The error is a human-readable reason for the failure report.
pub fn coerce(cell: &CellValue, kind: ScalarKind) -> Result<Value, String> {
    match kind {
        ScalarKind::Text => to_text(cell),
        ScalarKind::Int => to_int(cell),
        ScalarKind::Float => to_float(cell),
        ScalarKind::Bool => to_bool(cell),
        ScalarKind::Date => to_date(cell),
        ScalarKind::DateTime => to_datetime(cell),
    }
}

fn unsupported(cell: &CellValue, kind: ScalarKind) -> String {
    format!("cannot convert {} cell to {kind}", cell.kind_name())
}

fn invalid(text: &str, kind: ScalarKind) -> String {
    format!("'{text}' is not a valid {kind}")
}

fn to_text(cell: &CellValue) -> Result<Value, String> {
    match cell {
        CellValue::Missing => Ok(Value::Text(String::new())),
        CellValue::Text(s) => Ok(Value::Text(s.clone())),
        other => Ok(Value::Text(other.to_string())),
    }
}

fn to_int(cell: &CellValue) -> Result<Value, String> {
    match cell {
        CellValue::Text(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| invalid(trimmed, ScalarKind::Int))
        }
        CellValue::Int(v) => Ok(Value::Int(*v)),
        CellValue::Float(v) => float_to_int(*v),
        CellValue::Bool(v) => Ok(Value::Int(i64::from(*v))),
        other => Err(unsupported(other, ScalarKind::Int)),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn float_to_int(v: f64) -> Result<Value, String> {
    if !v.is_finite() || v.fract() != 0.0 {
        return Err(format!("{v} is not a whole number"));
    }
    if v < -I64_BOUND || v >= I64_BOUND {
        return Err(format!("{v} is out of range for int"));
    }
    Ok(Value::Int(v as i64))
}

#[allow(clippy::cast_precision_loss)]
fn to_float(cell: &CellValue) -> Result<Value, String> {
    match cell {
        CellValue::Text(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Value::Float(v)),
                _ => Err(invalid(trimmed, ScalarKind::Float)),
            }
        }
        CellValue::Int(v) => Ok(Value::Float(*v as f64)),
        CellValue::Float(v) => Ok(Value::Float(*v)),
        CellValue::Bool(v) => Ok(Value::Float(if *v { 1.0 } else { 0.0 })),
        other => Err(unsupported(other, ScalarKind::Float)),
    }
}

fn to_bool(cell: &CellValue) -> Result<Value, String> {
    match cell {
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(invalid(trimmed, ScalarKind::Bool))
            }
        }
        CellValue::Int(v) => Ok(Value::Bool(*v != 0)),
        CellValue::Float(v) => Ok(Value::Bool(*v != 0.0)),
        CellValue::Bool(v) => Ok(Value::Bool(*v)),
        other => Err(unsupported(other, ScalarKind::Bool)),
    }
}

fn to_date(cell: &CellValue) -> Result<Value, String> {
    match cell {
        CellValue::Text(s) => parse_date(s)
            .map(Value::Date)
            .ok_or_else(|| invalid(s.trim(), ScalarKind::Date)),
        CellValue::Int(_) | CellValue::Float(_) => {
            serial(cell).map(|dt| Value::Date(dt.date()))
        }
        CellValue::Date(d) => Ok(Value::Date(*d)),
        CellValue::DateTime(dt) => Ok(Value::Date(dt.date())),
        other => Err(unsupported(other, ScalarKind::Date)),
    }
}

fn to_datetime(cell: &CellValue) -> Result<Value, String> {
    match cell {
        CellValue::Text(s) => parse_datetime(s)
            .map(Value::DateTime)
            .ok_or_else(|| invalid(s.trim(), ScalarKind::DateTime)),
        CellValue::Int(_) | CellValue::Float(_) => serial(cell).map(Value::DateTime),
        CellValue::Date(d) => Ok(Value::DateTime(d.and_time(NaiveTime::MIN))),
        CellValue::DateTime(dt) => Ok(Value::DateTime(*dt)),
        other => Err(unsupported(other, ScalarKind::DateTime)),
    }
}

#[allow(clippy::cast_precision_loss)]
fn serial(cell: &CellValue) -> Result<chrono::NaiveDateTime, String> {
    let number = match cell {
        CellValue::Int(v) => *v as f64,
        CellValue::Float(v) => *v,
        other => return Err(format!("{} cell is not a serial date", other.kind_name())),
    };
    serial_to_datetime(number).ok_or_else(|| format!("{number} is not a valid serial date"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_text_target() {
        assert_eq!(coerce(&text(" a "), ScalarKind::Text), Ok(Value::Text(" a ".into())));
        assert_eq!(coerce(&CellValue::Int(7), ScalarKind::Text), Ok(Value::Text("7".into())));
        assert_eq!(
            coerce(&CellValue::Float(2.5), ScalarKind::Text),
            Ok(Value::Text("2.5".into()))
        );
        assert_eq!(
            coerce(&CellValue::Date(date(2024, 1, 31)), ScalarKind::Text),
            Ok(Value::Text("2024-01-31".into()))
        );
    }

    #[test]
    fn test_int_target() {
        assert_eq!(coerce(&text(" 42 "), ScalarKind::Int), Ok(Value::Int(42)));
        assert_eq!(coerce(&text("-3"), ScalarKind::Int), Ok(Value::Int(-3)));
        assert_eq!(coerce(&CellValue::Float(5.0), ScalarKind::Int), Ok(Value::Int(5)));
        assert_eq!(coerce(&CellValue::Bool(true), ScalarKind::Int), Ok(Value::Int(1)));
        assert_eq!(
            coerce(&text("x"), ScalarKind::Int),
            Err("'x' is not a valid int".to_string())
        );
        assert!(coerce(&text("1.5"), ScalarKind::Int).is_err());
        assert!(coerce(&CellValue::Float(1.5), ScalarKind::Int).is_err());
        assert!(coerce(&CellValue::Float(1e19), ScalarKind::Int).is_err());
        assert!(coerce(&CellValue::Date(date(2024, 1, 1)), ScalarKind::Int).is_err());
    }

    #[test]
    fn test_float_target() {
        assert_eq!(coerce(&text("1.25"), ScalarKind::Float), Ok(Value::Float(1.25)));
        assert_eq!(coerce(&CellValue::Int(2), ScalarKind::Float), Ok(Value::Float(2.0)));
        assert!(coerce(&text("NaN"), ScalarKind::Float).is_err());
        assert!(coerce(&text("1,5"), ScalarKind::Float).is_err());
    }

    #[test]
    fn test_bool_target() {
        assert_eq!(coerce(&text("TRUE"), ScalarKind::Bool), Ok(Value::Bool(true)));
        assert_eq!(coerce(&text("false"), ScalarKind::Bool), Ok(Value::Bool(false)));
        assert_eq!(coerce(&CellValue::Int(0), ScalarKind::Bool), Ok(Value::Bool(false)));
        assert_eq!(coerce(&CellValue::Float(2.0), ScalarKind::Bool), Ok(Value::Bool(true)));
        assert_eq!(
            coerce(&text("yes"), ScalarKind::Bool),
            Err("'yes' is not a valid bool".to_string())
        );
    }

    #[test]
    fn test_date_target() {
        assert_eq!(
            coerce(&text("2024-03-15"), ScalarKind::Date),
            Ok(Value::Date(date(2024, 3, 15)))
        );
        assert_eq!(
            coerce(&CellValue::Float(45_366.0), ScalarKind::Date),
            Ok(Value::Date(date(2024, 3, 15)))
        );
        assert_eq!(
            coerce(&CellValue::Int(45_366), ScalarKind::Date),
            Ok(Value::Date(date(2024, 3, 15)))
        );
        assert!(coerce(&CellValue::Int(-4), ScalarKind::Date).is_err());
        assert_eq!(
            coerce(&CellValue::Bool(true), ScalarKind::Date),
            Err("cannot convert bool cell to date".to_string())
        );
    }

    #[test]
    fn test_datetime_target() {
        let noon = date(2024, 3, 15).and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(
            coerce(&CellValue::Float(45_366.5), ScalarKind::DateTime),
            Ok(Value::DateTime(noon))
        );
        assert_eq!(
            coerce(&text("2024-03-15T12:00:00"), ScalarKind::DateTime),
            Ok(Value::DateTime(noon))
        );
        assert_eq!(
            coerce(&CellValue::Date(date(2024, 3, 15)), ScalarKind::DateTime),
            Ok(Value::DateTime(date(2024, 3, 15).and_time(NaiveTime::MIN)))
        );
        assert!(coerce(&text("soon"), ScalarKind::DateTime).is_err());
    }
}
