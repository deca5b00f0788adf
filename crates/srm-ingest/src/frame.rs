//! Polars `DataFrame` to grid conversion.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use srm_model::{CellValue, Grid};
use tracing::debug;

use crate::error::Result;

/// Converts a Polars `AnyValue` to a grid cell.
///
/// Nulls become [`CellValue::Missing`]; numeric, boolean and temporal values
/// keep their type. Anything else is rendered as text.
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Int8(v) => CellValue::Int(i64::from(v)),
        AnyValue::Int16(v) => CellValue::Int(i64::from(v)),
        AnyValue::Int32(v) => CellValue::Int(i64::from(v)),
        AnyValue::Int64(v) => CellValue::Int(v),
        AnyValue::UInt8(v) => CellValue::Int(i64::from(v)),
        AnyValue::UInt16(v) => CellValue::Int(i64::from(v)),
        AnyValue::UInt32(v) => CellValue::Int(i64::from(v)),
        #[allow(clippy::cast_precision_loss)]
        AnyValue::UInt64(v) => i64::try_from(v).map_or(CellValue::Float(v as f64), CellValue::Int),
        AnyValue::Float32(v) => CellValue::Float(f64::from(v)),
        AnyValue::Float64(v) => CellValue::Float(v),
        AnyValue::Boolean(b) => CellValue::Bool(b),
        AnyValue::String(s) => CellValue::text(s),
        AnyValue::StringOwned(s) => CellValue::text(s.as_str()),
        AnyValue::Date(days) => days_to_date(days).map_or(CellValue::Int(i64::from(days)), CellValue::Date),
        AnyValue::Datetime(v, unit, _) => {
            timestamp_to_datetime(v, unit).map_or(CellValue::Int(v), CellValue::DateTime)
        }
        // For any other type, use Display but strip outer quotes if present
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                CellValue::text(&s[1..s.len() - 1])
            } else {
                CellValue::text(s)
            }
        }
    }
}

fn days_to_date(days: i32) -> Option<NaiveDate> {
    DateTime::from_timestamp(i64::from(days) * 86_400, 0).map(|dt| dt.date_naive())
}

fn timestamp_to_datetime(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let dt = match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
    };
    dt.map(|dt| dt.naive_utc())
}

/// Converts a `DataFrame` to a grid whose header is the column names.
pub fn grid_from_frame(df: &DataFrame) -> Result<Grid> {
    let header: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let columns = df.get_columns();
    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut row = Vec::with_capacity(columns.len());
        for column in columns {
            row.push(any_to_cell(column.get(idx)?));
        }
        rows.push(row);
    }
    debug!(rows = rows.len(), columns = header.len(), "converted data frame");
    Ok(Grid::with_header(header, rows))
}
