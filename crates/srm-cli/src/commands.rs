//! Command implementations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use srm_map::{CoercionFailure, EmptyCellPolicy, MapError, MapOptions, map_grid_with};
use srm_model::{ColumnMapping, Grid, SchemaFile};
use tracing::{info, info_span, trace};

use crate::cli::{ConvertArgs, InspectArgs, MapArgs};
use crate::logging::redact_value;
use crate::source::{load_grid, save_grid};

/// Result of `srm map`.
#[derive(Debug)]
pub enum MapOutcome {
    /// Every row mapped; `json` holds the records as a JSON array.
    Mapped {
        records: usize,
        json: String,
        output: Option<PathBuf>,
    },
    /// At least one cell failed coercion; nothing was written.
    Failed { failures: Vec<CoercionFailure> },
}

/// Loads the grid to preview for `srm inspect`.
pub fn run_inspect(args: &InspectArgs) -> Result<Grid> {
    let span = info_span!("inspect", path = %args.input.display());
    let _guard = span.enter();
    load_grid(&args.input, &args.source)
}

/// Copies a grid between formats.
pub fn run_convert(args: &ConvertArgs) -> Result<Grid> {
    let span = info_span!("convert", input = %args.input.display(), output = %args.output.display());
    let _guard = span.enter();

    let mut grid = load_grid(&args.input, &args.source)?;
    if args.no_output_header {
        grid.header = None;
    }
    save_grid(&args.output, &grid, &args.sheet_name)?;
    Ok(grid)
}

/// Maps a source file to dynamic records and renders them as JSON.
pub fn run_map(args: &MapArgs) -> Result<MapOutcome> {
    let span = info_span!("map", input = %args.input.display());
    let _guard = span.enter();

    let schema_file: SchemaFile = read_json(&args.schema)?;
    let mapping: ColumnMapping = match &args.mapping {
        Some(path) => read_json(path)?,
        None => ColumnMapping::default(),
    };
    let schema = schema_file.schema();
    let options = MapOptions::default()
        .with_header(args.source.has_header())
        .with_column_mapping(mapping)
        .with_empty_cells(if args.allow_empty {
            EmptyCellPolicy::UseDefault
        } else {
            EmptyCellPolicy::Reject
        });

    let grid = load_grid(&args.input, &args.source)?;
    let records = match map_grid_with(&grid, &schema, &options) {
        Ok(records) => records,
        Err(MapError::Coercion { failures }) => {
            for failure in &failures {
                trace!(
                    row = failure.row,
                    field = %failure.field,
                    value = %redact_value(&failure.value),
                    "coercion failure"
                );
            }
            return Ok(MapOutcome::Failed { failures });
        }
        Err(error) => {
            return Err(error).with_context(|| format!("map {}", args.input.display()));
        }
    };

    let json = serde_json::to_string_pretty(&records).context("serialize records")?;
    if let Some(path) = &args.output {
        fs::write(path, format!("{json}\n"))
            .with_context(|| format!("write {}", path.display()))?;
    }
    info!(records = records.len(), "mapped records");
    Ok(MapOutcome::Mapped {
        records: records.len(),
        json,
        output: args.output.clone(),
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}
