//! Source and destination dispatch by file extension.

use std::path::Path;

use anyhow::{Context, Result, bail};
use srm_ingest::{CsvOptions, SheetSelector, read_csv, read_sheet};
use srm_model::Grid;
use srm_output::{CsvWriteOptions, XlsxOptions, write_csv, write_xlsx};
use tracing::info;

use crate::cli::SourceArgs;

/// Tabular file formats the CLI understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-separated text.
    Csv,
    /// Tab-separated text.
    Tsv,
    /// Workbook readable by calamine (xlsx, xlsm, xlsb, xls, ods).
    Workbook,
}

impl FileFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" | "txt" => Ok(Self::Csv),
            "tsv" | "tab" => Ok(Self::Tsv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            _ => bail!("unsupported file type: {}", path.display()),
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            Self::Tsv => b'\t',
            Self::Csv | Self::Workbook => b',',
        }
    }
}

/// Reads the grid described by the source arguments.
pub fn load_grid(path: &Path, source: &SourceArgs) -> Result<Grid> {
    let format = FileFormat::from_path(path)?;
    let grid = match format {
        FileFormat::Csv | FileFormat::Tsv => {
            if source.sheet.is_some() {
                bail!("--sheet only applies to workbooks");
            }
            let options = CsvOptions::default()
                .with_header(source.has_header())
                .with_delimiter(format.delimiter());
            read_csv(path, &options)?
        }
        FileFormat::Workbook => {
            let selector = source.sheet.clone().unwrap_or_else(SheetSelector::first);
            read_sheet(path, &selector, source.has_header())?
        }
    };
    info!(
        path = %path.display(),
        rows = grid.height(),
        columns = grid.width(),
        "loaded source"
    );
    Ok(grid)
}

/// Writes a grid in the format implied by the destination extension.
pub fn save_grid(path: &Path, grid: &Grid, sheet_name: &str) -> Result<()> {
    let written = match FileFormat::from_path(path)? {
        format @ (FileFormat::Csv | FileFormat::Tsv) => {
            let options = CsvWriteOptions::default().with_delimiter(format.delimiter());
            write_csv(path, grid, &options)
        }
        FileFormat::Workbook => {
            let is_xlsx = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
            if !is_xlsx {
                bail!("only .xlsx workbooks can be written: {}", path.display());
            }
            write_xlsx(
                path,
                grid,
                &XlsxOptions::default().with_sheet_name(sheet_name),
            )
        }
    };
    written.with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), rows = grid.height(), "wrote output");
    Ok(())
}
