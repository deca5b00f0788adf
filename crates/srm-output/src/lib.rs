//! Grid writers.
//!
//! Writes [`Grid`](srm_model::Grid)s as CSV or xlsx, and exports typed
//! records through the mapper's export path.

use std::fs;
use std::path::Path;

pub mod csv;
pub mod error;
pub mod export;
pub mod xlsx;

pub use self::csv::{CsvWriteOptions, write_csv, write_csv_writer};
pub use error::{OutputError, Result};
pub use export::{export_csv, export_xlsx};
pub use xlsx::{XlsxOptions, write_xlsx};

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| OutputError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}
