//! Options controlling how grids are mapped to records and back.

use serde::{Deserialize, Serialize};
use srm_model::ColumnMapping;

/// What to do with a missing cell bound to a non-nullable, non-text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCellPolicy {
    /// Report the cell as a coercion failure.
    #[default]
    Reject,
    /// Leave the field at the value the record factory gave it.
    UseDefault,
}

/// Options for grid-to-record mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Match columns to fields by header name. When false, column `i` feeds
    /// field `i` and header names are ignored.
    pub has_header: bool,

    /// Renames applied to a copy of the header before name matching.
    pub column_mapping: ColumnMapping,

    /// Handling of empty cells.
    pub empty_cells: EmptyCellPolicy,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            column_mapping: ColumnMapping::default(),
            empty_cells: EmptyCellPolicy::default(),
        }
    }
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for positional mapping of a headerless grid.
    pub fn positional() -> Self {
        Self {
            has_header: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    #[must_use]
    pub fn with_column_mapping(mut self, mapping: ColumnMapping) -> Self {
        self.column_mapping = mapping;
        self
    }

    #[must_use]
    pub fn with_empty_cells(mut self, policy: EmptyCellPolicy) -> Self {
        self.empty_cells = policy;
        self
    }
}

/// Options for record-to-grid export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Emit a header row.
    pub write_header: bool,

    /// Field-to-column renames for the header.
    pub column_mapping: ColumnMapping,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            write_header: true,
            column_mapping: ColumnMapping::default(),
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    #[must_use]
    pub fn with_column_mapping(mut self, mapping: ColumnMapping) -> Self {
        self.column_mapping = mapping;
        self
    }
}
