//! Tabular readers.
//!
//! Each reader produces a [`Grid`](srm_model::Grid) for the record mapper:
//!
//! - **CSV**: delimited text via the `csv` crate, every cell as text
//! - **Workbooks**: xlsx, xlsm, xlsb, xls and ods sheets via `calamine`
//! - **Frames**: Polars `DataFrame`s already loaded by the caller
//!
//! Failures here are source failures; they are passed to the caller as
//! [`IngestError`] without retries.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use srm_ingest::{CsvOptions, SheetSelector, read_csv, read_sheet};
//!
//! let grid = read_csv(Path::new("people.csv"), &CsvOptions::default())?;
//! let grid = read_sheet(Path::new("people.xlsx"), &SheetSelector::Name("Staff".into()), true)?;
//! ```

mod csv;
mod error;
mod frame;
mod sheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    CsvOptions, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv,
    read_csv_reader, validate_encoding,
};

// === Workbook Reading ===
pub use sheet::{SheetSelector, data_to_cell, read_sheet, sheet_names};

// === DataFrames ===
pub use frame::{any_to_cell, grid_from_frame};
