//! Column-to-field correspondence.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use srm_model::{ColumnMapping, Grid, Schema};
use tracing::debug;

use crate::error::{MapError, Result};
use crate::options::MapOptions;

/// A resolved column -> field pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Cell position within a row.
    pub column: usize,
    /// Field position within the schema.
    pub field: usize,
    /// Source column name used in failure reports.
    pub label: String,
}

/// Resolves which column feeds which field.
pub fn resolve<R>(grid: &Grid, schema: &Schema<R>, options: &MapOptions) -> Result<Vec<Binding>> {
    if options.has_header {
        by_name(grid, schema, &options.column_mapping)
    } else if !options.column_mapping.is_empty() {
        Err(MapError::MappingWithoutHeader)
    } else {
        Ok(by_position(grid, schema))
    }
}

/// Applies the rename directive to a copy of `header`.
///
/// Entries run in order and each renames the first column whose current
/// name matches, so a later entry sees the result of earlier ones.
pub fn apply_renames(header: &[String], mapping: &ColumnMapping) -> Result<Vec<String>> {
    let mut columns = header.to_vec();
    for rename in mapping {
        let slot = columns
            .iter_mut()
            .find(|name| **name == rename.column)
            .ok_or_else(|| MapError::SchemaMismatch {
                column: rename.column.clone(),
            })?;
        debug!(column = %rename.column, field = %rename.field, "renamed column");
        slot.clone_from(&rename.field);
    }
    Ok(columns)
}

fn by_name<R>(grid: &Grid, schema: &Schema<R>, mapping: &ColumnMapping) -> Result<Vec<Binding>> {
    let header = grid.header().ok_or(MapError::MissingHeader)?;
    let columns = apply_renames(header, mapping)?;

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(columns.len());
    for (position, name) in columns.iter().enumerate() {
        match index.entry(name.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
            Entry::Occupied(first) => {
                debug!(
                    column = %name,
                    kept = *first.get(),
                    ignored = position,
                    "duplicate column name, keeping the first"
                );
            }
        }
    }

    let bindings = schema
        .fields()
        .iter()
        .enumerate()
        .filter_map(|(field, spec)| {
            index.get(spec.name()).map(|&column| Binding {
                column,
                field,
                label: header[column].clone(),
            })
        })
        .collect();
    Ok(bindings)
}

fn by_position<R>(grid: &Grid, schema: &Schema<R>) -> Vec<Binding> {
    let width = grid.width().min(schema.len());
    (0..width)
        .map(|position| Binding {
            column: position,
            field: position,
            label: grid
                .header()
                .and_then(|header| header.get(position))
                .cloned()
                .unwrap_or_else(|| format!("#{position}")),
        })
        .collect()
}
