//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use srm_ingest::SheetSelector;

#[derive(Parser)]
#[command(
    name = "srm",
    version,
    about = "Sheet record mapper - map spreadsheet and CSV rows to typed records",
    long_about = "Map spreadsheet sheets and delimited text files to typed records and back.\n\n\
                  Columns are matched to fields by header name (optionally renamed by a\n\
                  column mapping) or by position when the source has no header."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the header and first rows of a sheet or CSV file.
    Inspect(InspectArgs),

    /// Copy a grid between CSV and xlsx.
    Convert(ConvertArgs),

    /// Map rows to records described by a JSON schema file.
    Map(MapArgs),
}

/// Options shared by every command that reads a source file.
#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Sheet name or one-based sheet number (workbooks only; default: first sheet).
    #[arg(long = "sheet", value_name = "SHEET", value_parser = parse_sheet)]
    pub sheet: Option<SheetSelector>,

    /// Treat the first row as data; map columns by position.
    #[arg(long = "no-header")]
    pub no_header: bool,
}

impl SourceArgs {
    pub fn has_header(&self) -> bool {
        !self.no_header
    }
}

#[derive(Args)]
pub struct InspectArgs {
    /// Source file (.csv, .tsv, .xlsx, .xlsm, .xlsb, .xls, .ods).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of data rows to show.
    #[arg(long = "rows", default_value_t = 10)]
    pub rows: usize,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Source file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination file (.csv, .tsv or .xlsx).
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Omit the header row from the output.
    #[arg(long = "no-output-header")]
    pub no_output_header: bool,

    /// Worksheet name for xlsx output.
    #[arg(long = "sheet-name", value_name = "NAME", default_value = "Sheet1")]
    pub sheet_name: String,
}

#[derive(Args)]
pub struct MapArgs {
    /// Source file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// JSON schema file: {"fields": [{"name": "...", "kind": "int", "optional": false}]}.
    #[arg(long = "schema", value_name = "FILE")]
    pub schema: PathBuf,

    /// JSON column mapping file: [{"column": "...", "field": "..."}].
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Leave non-optional fields at their default when a cell is empty.
    #[arg(long = "allow-empty")]
    pub allow_empty: bool,

    /// Write the JSON records to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Parses `--sheet`: digits select a sheet by one-based number, anything
/// else by name.
pub fn parse_sheet(value: &str) -> Result<SheetSelector, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("sheet must not be empty".to_string());
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let number: usize = trimmed
            .parse()
            .map_err(|_| format!("invalid sheet number '{trimmed}'"))?;
        if number == 0 {
            return Err("sheet numbers start at 1".to_string());
        }
        return Ok(SheetSelector::Index(number - 1));
    }
    Ok(SheetSelector::Name(value.to_string()))
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
