//! Workbook writing via umya-spreadsheet.

use std::path::Path;

use serde::{Deserialize, Serialize};
use srm_model::datetime::{checked_date_to_serial, checked_datetime_to_serial};
use srm_model::{CellValue, Grid};
use tracing::{debug, info_span};
use umya_spreadsheet::{NumberingFormat, Worksheet};

use crate::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Largest row count of a worksheet.
pub const MAX_ROWS: usize = 1_048_576;

/// Largest column count of a worksheet.
pub const MAX_COLUMNS: usize = 16_384;

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Options for writing a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XlsxOptions {
    /// Name of the single worksheet written.
    pub sheet_name: String,
}

impl Default for XlsxOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
        }
    }
}

impl XlsxOptions {
    #[must_use]
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }
}

/// Writes a grid to a single-sheet xlsx workbook.
///
/// Numbers and booleans keep their cell type. Dates are written as serial
/// numbers with a date format so readers see them as dates again.
pub fn write_xlsx(path: &Path, grid: &Grid, options: &XlsxOptions) -> Result<()> {
    let span = info_span!("write_xlsx", path = %path.display(), sheet = %options.sheet_name);
    let _guard = span.enter();

    grid.check_shape()?;
    let offset = usize::from(grid.has_header());
    if grid.height() + offset > MAX_ROWS || grid.width() > MAX_COLUMNS {
        return Err(OutputError::TooLarge {
            rows: grid.height() + offset,
            columns: grid.width(),
        });
    }

    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book
        .new_sheet(options.sheet_name.as_str())
        .map_err(|message| xlsx_error(path, message))?;

    if let Some(header) = grid.header() {
        for (col, name) in header.iter().enumerate() {
            sheet
                .get_cell_mut((coordinate(col), 1))
                .set_value_string(name.as_str());
        }
    }
    for (row_idx, row) in grid.rows.iter().enumerate() {
        let row_number = coordinate(row_idx + offset);
        for (col, cell) in row.iter().enumerate() {
            write_cell(sheet, coordinate(col), row_number, cell);
        }
    }

    ensure_parent_dir(path)?;
    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| xlsx_error(path, &e.to_string()))?;
    debug!(rows = grid.height(), columns = grid.width(), "wrote workbook");
    Ok(())
}

/// One-based worksheet coordinate. Callers check the sheet limits first.
#[allow(clippy::cast_possible_truncation)]
fn coordinate(zero_based: usize) -> u32 {
    (zero_based + 1) as u32
}

#[allow(clippy::cast_precision_loss)]
fn write_cell(sheet: &mut Worksheet, col: u32, row: u32, cell: &CellValue) {
    match cell {
        CellValue::Missing => {}
        CellValue::Text(s) => {
            sheet.get_cell_mut((col, row)).set_value_string(s.as_str());
        }
        CellValue::Int(v) => {
            sheet.get_cell_mut((col, row)).set_value_number(*v as f64);
        }
        CellValue::Float(v) => {
            sheet.get_cell_mut((col, row)).set_value_number(*v);
        }
        CellValue::Bool(v) => {
            sheet.get_cell_mut((col, row)).set_value_bool(*v);
        }
        // Dates outside the worksheet calendar are written as ISO text.
        CellValue::Date(d) => match checked_date_to_serial(*d) {
            Some(serial) => {
                write_serial(sheet, col, row, serial, NumberingFormat::FORMAT_DATE_XLSX14);
            }
            None => {
                sheet.get_cell_mut((col, row)).set_value_string(cell.to_string());
            }
        },
        CellValue::DateTime(dt) => match checked_datetime_to_serial(*dt) {
            Some(serial) => write_serial(sheet, col, row, serial, DATETIME_FORMAT),
            None => {
                sheet.get_cell_mut((col, row)).set_value_string(cell.to_string());
            }
        },
    }
}

fn write_serial(sheet: &mut Worksheet, col: u32, row: u32, serial: f64, format: &str) {
    sheet.get_cell_mut((col, row)).set_value_number(serial);
    sheet
        .get_style_mut((col, row))
        .get_number_format_mut()
        .set_format_code(format);
}

fn xlsx_error(path: &Path, message: &str) -> OutputError {
    OutputError::Xlsx {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_coordinate() {
        assert_eq!(coordinate(0), 1);
        assert_eq!(coordinate(MAX_COLUMNS - 1), 16_384);
    }

    #[test]
    fn test_dates_outside_calendar_become_text() {
        let mut book = umya_spreadsheet::new_file_empty_worksheet();
        let sheet = book.new_sheet("Dates").unwrap();
        let old = NaiveDate::from_ymd_opt(1850, 6, 1).unwrap();
        write_cell(sheet, 1, 1, &CellValue::Date(old));
        assert_eq!(sheet.get_value((1, 1)), "1850-06-01");
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let grid = Grid::without_header(vec![vec![CellValue::Missing; MAX_COLUMNS + 1]]);
        let err = write_xlsx(Path::new("unused.xlsx"), &grid, &XlsxOptions::default()).unwrap_err();
        assert!(matches!(err, OutputError::TooLarge { columns: 16_385, .. }));
    }
}
