//! Grid-to-record mapping.

use srm_model::{CellValue, Field, Grid, ModelError, Record, Schema, ScalarKind, Value};
use tracing::{debug, info_span, trace};

use crate::coerce::coerce;
use crate::correspondence::resolve;
use crate::error::{CoercionFailure, MapError, Result};
use crate::options::{EmptyCellPolicy, MapOptions};

/// Maps every data row of `grid` to a record of type `R`.
///
/// The schema is built once per call from [`Record::schema`].
pub fn map_grid<R: Record>(grid: &Grid, options: &MapOptions) -> Result<Vec<R>> {
    map_grid_with(grid, &R::schema(), options)
}

/// Maps every data row of `grid` using an explicit schema.
///
/// Either every row converts and all records are returned, or the call fails.
/// Coercion failures are collected across the whole grid before failing.
pub fn map_grid_with<R>(grid: &Grid, schema: &Schema<R>, options: &MapOptions) -> Result<Vec<R>> {
    let span = info_span!(
        "map_grid",
        rows = grid.height(),
        columns = grid.width(),
        fields = schema.len(),
        has_header = options.has_header
    );
    let _guard = span.enter();

    schema.validate()?;
    grid.check_shape().map_err(shape_error)?;
    let bindings = resolve(grid, schema, options)?;
    debug!(
        bound = bindings.len(),
        unbound = schema.len() - bindings.len(),
        "resolved correspondence"
    );

    let mut records = Vec::with_capacity(grid.height());
    let mut failures = Vec::new();
    for (row, cells) in grid.rows.iter().enumerate() {
        let mut record = schema.instantiate();
        for binding in &bindings {
            let field = &schema.fields()[binding.field];
            let cell = cells.get(binding.column).unwrap_or(&CellValue::Missing);
            if let Err(reason) = assign_cell(field, &mut record, cell, options.empty_cells) {
                // The reason quotes the cell, so it stays out of the log.
                trace!(
                    row,
                    column = %binding.label,
                    field = %field.name(),
                    kind = %field.kind(),
                    "coercion failed"
                );
                failures.push(CoercionFailure {
                    row,
                    column: binding.label.clone(),
                    field: field.name().to_string(),
                    value: cell.to_string(),
                    reason,
                });
            }
        }
        if failures.is_empty() {
            records.push(record);
        }
    }

    if failures.is_empty() {
        debug!(records = records.len(), "mapped grid");
        Ok(records)
    } else {
        debug!(failures = failures.len(), "mapping failed");
        Err(MapError::Coercion { failures })
    }
}

/// Coerces one cell and stores it in `record`.
fn assign_cell<R>(
    field: &Field<R>,
    record: &mut R,
    cell: &CellValue,
    policy: EmptyCellPolicy,
) -> std::result::Result<(), String> {
    let value = if cell.is_blank() {
        if field.is_nullable() {
            Value::Null
        } else if field.kind() == ScalarKind::Text {
            Value::Text(String::new())
        } else {
            return match policy {
                EmptyCellPolicy::Reject => Err("empty cell".to_string()),
                EmptyCellPolicy::UseDefault => Ok(()),
            };
        }
    } else {
        coerce(cell, field.kind())?
    };
    field.assign(record, value)
}

fn shape_error(err: ModelError) -> MapError {
    match err {
        ModelError::RaggedRow {
            row,
            expected,
            found,
        } => MapError::ShapeMismatch {
            row,
            expected,
            found,
        },
        other => MapError::Schema(other),
    }
}
