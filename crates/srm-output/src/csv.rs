//! CSV writing.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use srm_model::Grid;
use tracing::{debug, info_span};

use crate::error::{OutputError, Result};
use crate::ensure_parent_dir;

/// Options for writing delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvWriteOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriteOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Writes a grid to a CSV file, header first when present.
pub fn write_csv(path: &Path, grid: &Grid, options: &CsvWriteOptions) -> Result<()> {
    let span = info_span!("write_csv", path = %path.display());
    let _guard = span.enter();

    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|e| OutputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_csv_writer(file, grid, options)
}

/// Writes a grid as CSV to any writer.
///
/// Cells are rendered with their `Display` form; missing cells are empty.
pub fn write_csv_writer<W: Write>(writer: W, grid: &Grid, options: &CsvWriteOptions) -> Result<()> {
    grid.check_shape()?;
    let mut out = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    if let Some(header) = grid.header() {
        out.write_record(header)?;
    }
    for row in &grid.rows {
        out.write_record(row.iter().map(ToString::to_string))?;
    }
    out.flush().map_err(csv::Error::from)?;
    debug!(rows = grid.height(), "wrote csv");
    Ok(())
}
