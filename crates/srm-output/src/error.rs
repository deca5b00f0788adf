//! Error types for grid writers.

use std::path::PathBuf;

use srm_map::MapError;
use srm_model::ModelError;
use thiserror::Error;

/// Errors from writing grids or exporting records.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create or write the output file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write delimited text.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to build or save a workbook.
    #[error("failed to write workbook {path}: {message}")]
    Xlsx { path: PathBuf, message: String },

    /// The grid does not fit in a worksheet.
    #[error("grid of {rows} rows and {columns} columns exceeds worksheet limits")]
    TooLarge { rows: usize, columns: usize },

    /// The grid has rows of differing width.
    #[error("invalid grid: {0}")]
    Model(#[from] ModelError),

    /// Records could not be turned into a grid.
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
