//! Record-to-grid export.

use srm_model::{Grid, Record, Schema};
use tracing::{debug, info_span};

use crate::error::{MapError, Result};
use crate::options::ExportOptions;

/// Builds a grid with one row per record and one column per schema field.
pub fn to_grid<R: Record>(records: &[R], options: &ExportOptions) -> Result<Grid> {
    to_grid_with(records, &R::schema(), options)
}

/// Builds a grid from records using an explicit schema.
pub fn to_grid_with<R>(records: &[R], schema: &Schema<R>, options: &ExportOptions) -> Result<Grid> {
    let span = info_span!("to_grid", records = records.len(), fields = schema.len());
    let _guard = span.enter();

    schema.validate()?;
    let header = export_header(schema, options)?;
    let rows = records
        .iter()
        .map(|record| {
            schema
                .fields()
                .iter()
                .map(|field| field.read(record).into_cell())
                .collect()
        })
        .collect();

    debug!(write_header = options.write_header, "exported records");
    Ok(Grid::new(options.write_header.then_some(header), rows))
}

fn export_header<R>(schema: &Schema<R>, options: &ExportOptions) -> Result<Vec<String>> {
    let mut header: Vec<String> = schema
        .field_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    for rename in &options.column_mapping {
        let position = schema
            .position(&rename.field)
            .ok_or_else(|| MapError::UnknownField {
                field: rename.field.clone(),
            })?;
        header[position].clone_from(&rename.column);
    }
    Ok(header)
}
