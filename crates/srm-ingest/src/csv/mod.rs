//! Delimited text reading.

mod header;
mod reader;

pub use header::{fill_blank_headers, normalize_header};
pub use reader::{
    CsvOptions, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv,
    read_csv_reader, validate_encoding,
};
