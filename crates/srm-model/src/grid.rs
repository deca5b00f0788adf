//! In-memory grid produced by the tabular readers.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A raw, weakly-typed cell.
///
/// Its meaning as a field value is decided at coercion time; readers keep
/// whatever their source format knows (CSV only produces `Text` and
/// `Missing`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    #[default]
    Missing,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Builds a text cell, treating empty or whitespace-only input as missing.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self::Missing
        } else {
            Self::Text(value)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// True for missing cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Text(_) => "text",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_numeric(*v)),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Self::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

/// Formats a floating-point number without trailing zeros after the decimal point.
///
/// Integer-valued floats like 40.0 are formatted as "40", not "4".
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Rows of cells with an optional header aligned to the cell positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Column names, when the source had a header row.
    pub header: Option<Vec<String>>,
    /// Data rows in source order.
    pub rows: Vec<Vec<CellValue>>,
}

impl Grid {
    pub fn new(header: Option<Vec<String>>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { header, rows }
    }

    pub fn with_header(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self::new(Some(header), rows)
    }

    pub fn without_header(rows: Vec<Vec<CellValue>>) -> Self {
        Self::new(None, rows)
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    /// Number of data rows (the header is not counted).
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Header width, else the width of the first row, else zero.
    pub fn width(&self) -> usize {
        self.reference_width().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.as_ref()?.iter().position(|column| column == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(column)
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    /// Checks that every row has the reference width.
    ///
    /// The reference is the header width when a header exists, otherwise the
    /// width of the first row.
    pub fn check_shape(&self) -> Result<()> {
        let Some(expected) = self.reference_width() else {
            return Ok(());
        };
        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(ModelError::RaggedRow {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok(())
    }

    fn reference_width(&self) -> Option<usize> {
        match &self.header {
            Some(header) => Some(header.len()),
            None => self.rows.first().map(Vec::len),
        }
    }
}
