//! CSV file reading into grids.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use srm_model::{CellValue, Grid};
use tracing::{debug, info_span, warn};

use crate::error::{IngestError, Result};

use super::header::{fill_blank_headers, normalize_header};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Options for reading delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Treat the first record as column names.
    pub has_header: bool,
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Files larger than this are rejected before parsing.
    pub max_file_size: u64,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

impl CsvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::io(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::io(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped from the first header)
    Ok(())
}

/// Reads a CSV file into a grid.
///
/// Cells are trimmed and empty cells become [`CellValue::Missing`]; every
/// other cell is `Text`. Empty and whitespace-only lines are skipped, but a
/// line of delimiters such as `,,` is a row of missing cells, so row indices
/// follow the data lines of the file. Rows keep their width so the mapper can
/// reject ragged input.
pub fn read_csv(path: &Path, options: &CsvOptions) -> Result<Grid> {
    let span = info_span!("read_csv", path = %path.display());
    let _guard = span.enter();

    check_file_size_with_limit(path, options.max_file_size)?;
    validate_encoding(path)?;
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    read_records(file, options, path)
}

/// Reads CSV from any reader, for in-memory sources.
pub fn read_csv_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Grid> {
    read_records(reader, options, Path::new("<reader>"))
}

fn read_records<R: Read>(source: R, options: &CsvOptions, path: &Path) -> Result<Grid> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(source);

    let mut header = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        // Empty lines never reach here; a line of only whitespace still does.
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }
        if options.has_header && header.is_none() {
            if record.iter().all(|value| value.trim().is_empty()) {
                continue;
            }
            let names = record.iter().map(normalize_header).collect();
            header = Some(fill_blank_headers(names));
            continue;
        }
        rows.push(record.iter().map(normalize_cell).collect::<Vec<_>>());
    }

    if options.has_header && header.is_none() {
        warn!(path = %path.display(), "no header row found");
        header = Some(Vec::new());
    }
    let grid = Grid::new(header, rows);
    debug!(rows = grid.height(), columns = grid.width(), "read csv");
    Ok(grid)
}

fn normalize_cell(raw: &str) -> CellValue {
    CellValue::text(raw.trim().trim_matches('\u{feff}'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_with_header() {
        let file = create_temp_csv("\u{feff}id, name \n1,Alice\n\n2, Bob \n");
        let grid = read_csv(file.path(), &CsvOptions::default()).unwrap();

        assert_eq!(grid.header(), Some(&["id".to_string(), "name".to_string()][..]));
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.rows[1][1], CellValue::Text("Bob".into()));
    }

    #[test]
    fn test_read_csv_without_header() {
        let file = create_temp_csv("1,Alice\n2,\n");
        let grid = read_csv(file.path(), &CsvOptions::default().with_header(false)).unwrap();

        assert!(grid.header().is_none());
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.rows[1][1], CellValue::Missing);
    }

    #[test]
    fn test_read_csv_keeps_ragged_rows() {
        let file = create_temp_csv("a,b\n1,2,3\n4\n");
        let grid = read_csv(file.path(), &CsvOptions::default()).unwrap();

        assert_eq!(grid.rows[0].len(), 3);
        assert_eq!(grid.rows[1].len(), 1);
        assert!(grid.check_shape().is_err());
    }

    #[test]
    fn test_read_csv_semicolon() {
        let grid = read_csv_reader(
            "x;y\n1;2\n".as_bytes(),
            &CsvOptions::default().with_delimiter(b';'),
        )
        .unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.rows[0][1], CellValue::Text("2".into()));
    }

    #[test]
    fn test_blank_header_names_are_filled() {
        let grid = read_csv_reader("a,,c\n1,2,3\n".as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(grid.column_index("Column2"), Some(1));
    }

    #[test]
    fn test_empty_input() {
        let grid = read_csv_reader("".as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(grid.header(), Some(&[][..]));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_file_not_found() {
        let result = read_csv(Path::new("/definitely/not/here.csv"), &CsvOptions::default());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_file_too_large() {
        let file = create_temp_csv("a,b\n1,2\n");
        let result = read_csv(file.path(), &CsvOptions::default().with_max_file_size(4));
        assert!(matches!(result, Err(IngestError::FileTooLarge { max_size: 4, .. })));
    }

    #[test]
    fn test_utf16_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, b'a', 0]).unwrap();
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }
}
