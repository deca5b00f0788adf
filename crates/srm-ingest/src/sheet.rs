//! Spreadsheet workbook reading via calamine.

use std::fmt;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use serde::{Deserialize, Serialize};
use srm_model::{CellValue, Grid};
use tracing::{debug, info_span};

use crate::csv::{fill_blank_headers, normalize_header};
use crate::error::{IngestError, Result};

/// Which sheet of a workbook to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetSelector {
    /// Zero-based sheet position.
    Index(usize),
    /// Sheet name, matched exactly.
    Name(String),
}

impl SheetSelector {
    /// The first sheet of the workbook.
    pub fn first() -> Self {
        Self::Index(0)
    }
}

impl Default for SheetSelector {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(idx) => write!(f, "#{}", idx + 1),
            Self::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// Lists sheet names in workbook order.
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    let workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, &e))?;
    Ok(workbook.sheet_names())
}

/// Reads one sheet into a grid.
///
/// With `has_header` the first non-blank row becomes the header; blank header
/// cells are named `Column{n}`. Fully blank rows are skipped. Blank leading
/// columns are kept, so column positions match the sheet from column A.
pub fn read_sheet(path: &Path, selector: &SheetSelector, has_header: bool) -> Result<Grid> {
    let span = info_span!("read_sheet", path = %path.display(), sheet = %selector);
    let _guard = span.enter();

    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, &e))?;
    let names = workbook.sheet_names();
    let sheet = resolve_sheet(&names, selector).ok_or_else(|| IngestError::SheetNotFound {
        path: path.to_path_buf(),
        sheet: selector.to_string(),
        available: names.clone(),
    })?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| workbook_error(path, &e))?;

    let grid = range_to_grid(&range, has_header).ok_or_else(|| IngestError::EmptySheet {
        path: path.to_path_buf(),
        sheet: sheet.clone(),
    })?;
    debug!(sheet = %sheet, rows = grid.height(), columns = grid.width(), "read sheet");
    Ok(grid)
}

fn resolve_sheet(names: &[String], selector: &SheetSelector) -> Option<String> {
    match selector {
        SheetSelector::Index(idx) => names.get(*idx).cloned(),
        SheetSelector::Name(name) => names.iter().find(|n| *n == name).cloned(),
    }
}

/// Converts a used range to a grid. Returns `None` when a header is
/// requested but the range has no non-blank row.
fn range_to_grid(range: &Range<Data>, has_header: bool) -> Option<Grid> {
    // The used range starts at the first non-empty cell, not at A1.
    let leading = range.start().map_or(0, |(_, col)| col as usize);
    let mut rows = range
        .rows()
        .map(|row| {
            let mut cells = vec![CellValue::Missing; leading];
            cells.extend(row.iter().map(data_to_cell));
            cells
        })
        .filter(|cells| !cells.iter().all(CellValue::is_blank));

    if has_header {
        let header_row = rows.next()?;
        let header = fill_blank_headers(
            header_row
                .iter()
                .map(|cell| normalize_header(&cell.to_string()))
                .collect(),
        );
        Some(Grid::with_header(header, rows.collect()))
    } else {
        Some(Grid::without_header(rows.collect()))
    }
}

/// Converts a calamine cell to a grid cell.
///
/// Date cells honor the workbook's date system (1900 or 1904). Duration
/// cells keep their length in days as a float.
pub fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Missing,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Float(v) => CellValue::Float(*v),
        Data::Int(v) => CellValue::Int(*v),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Float(dt.as_f64()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(CellValue::Float(dt.as_f64()), CellValue::DateTime),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn workbook_error(path: &Path, err: &impl fmt::Display) -> IngestError {
    IngestError::Workbook {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    use super::*;

    fn names() -> Vec<String> {
        vec!["Summary".into(), "Data".into()]
    }

    #[test]
    fn test_resolve_sheet() {
        assert_eq!(resolve_sheet(&names(), &SheetSelector::first()), Some("Summary".into()));
        assert_eq!(resolve_sheet(&names(), &SheetSelector::Index(1)), Some("Data".into()));
        assert_eq!(resolve_sheet(&names(), &SheetSelector::Index(2)), None);
        assert_eq!(
            resolve_sheet(&names(), &SheetSelector::Name("Data".into())),
            Some("Data".into())
        );
        assert_eq!(resolve_sheet(&names(), &SheetSelector::Name("data".into())), None);
    }

    #[test]
    fn test_data_to_cell() {
        assert_eq!(data_to_cell(&Data::Empty), CellValue::Missing);
        assert_eq!(data_to_cell(&Data::String(String::new())), CellValue::Missing);
        assert_eq!(data_to_cell(&Data::Int(3)), CellValue::Int(3));
        assert_eq!(data_to_cell(&Data::Bool(false)), CellValue::Bool(false));
        assert_eq!(
            data_to_cell(&Data::DateTimeIso("2024-01-01".into())),
            CellValue::Text("2024-01-01".into())
        );
    }

    fn datetime(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(chrono::NaiveTime::MIN)
    }

    #[test]
    fn test_date_cells_follow_workbook_epoch() {
        let modern = ExcelDateTime::new(45_366.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            data_to_cell(&Data::DateTime(modern)),
            CellValue::DateTime(datetime(2024, 3, 15))
        );

        let mac_epoch = ExcelDateTime::new(0.0, ExcelDateTimeType::DateTime, true);
        assert_eq!(
            data_to_cell(&Data::DateTime(mac_epoch)),
            CellValue::DateTime(datetime(1904, 1, 1))
        );
        let mac_date = ExcelDateTime::new(43_904.0, ExcelDateTimeType::DateTime, true);
        assert_eq!(
            data_to_cell(&Data::DateTime(mac_date)),
            CellValue::DateTime(datetime(2024, 3, 15))
        );
    }

    #[test]
    fn test_duration_cells_stay_numeric() {
        let duration = ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(data_to_cell(&Data::DateTime(duration)), CellValue::Float(1.5));
    }

    #[test]
    fn test_range_keeps_blank_leading_columns() {
        let mut range = Range::new((0, 1), (1, 2));
        range.set_value((0, 1), Data::String("id".into()));
        range.set_value((0, 2), Data::String("name".into()));
        range.set_value((1, 1), Data::Float(1.0));
        range.set_value((1, 2), Data::String("Alice".into()));

        let grid = range_to_grid(&range, true).unwrap();
        assert_eq!(
            grid.header(),
            Some(&["Column1".to_string(), "id".to_string(), "name".to_string()][..])
        );
        assert_eq!(
            grid.rows[0],
            vec![CellValue::Missing, CellValue::Float(1.0), CellValue::Text("Alice".into())]
        );
    }

    #[test]
    fn test_selector_display() {
        assert_eq!(SheetSelector::Index(0).to_string(), "#1");
        assert_eq!(SheetSelector::Name("Data".into()).to_string(), "'Data'");
    }
}
