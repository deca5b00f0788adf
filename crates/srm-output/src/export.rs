//! Record export to files.

use std::path::Path;

use srm_map::{ExportOptions, to_grid};
use srm_model::Record;

use crate::csv::{CsvWriteOptions, write_csv};
use crate::error::Result;
use crate::xlsx::{XlsxOptions, write_xlsx};

/// Writes records to a CSV file, one row per record.
pub fn export_csv<R: Record>(
    path: &Path,
    records: &[R],
    export: &ExportOptions,
    options: &CsvWriteOptions,
) -> Result<()> {
    let grid = to_grid(records, export)?;
    write_csv(path, &grid, options)
}

/// Writes records to a single-sheet xlsx workbook, one row per record.
pub fn export_xlsx<R: Record>(
    path: &Path,
    records: &[R],
    export: &ExportOptions,
    options: &XlsxOptions,
) -> Result<()> {
    let grid = to_grid(records, export)?;
    write_xlsx(path, &grid, options)
}
