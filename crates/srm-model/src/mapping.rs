//! Column mapping directives.
//!
//! A directive is an ordered list of `(column, field)` pairs. On import each
//! pair renames a grid column to a schema field name before name-based
//! matching; on export it renames a field to the column written out.

use serde::{Deserialize, Serialize};

/// One rename entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRename {
    /// Column name as it appears in the tabular source.
    pub column: String,
    /// Field name in the record schema.
    pub field: String,
}

impl ColumnRename {
    pub fn new(column: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            field: field.into(),
        }
    }
}

/// Ordered rename directive between source columns and schema fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    renames: Vec<ColumnRename>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directive from `(column, field)` pairs.
    pub fn from_pairs<I, C, F>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, F)>,
        C: Into<String>,
        F: Into<String>,
    {
        Self {
            renames: pairs
                .into_iter()
                .map(|(column, field)| ColumnRename::new(column, field))
                .collect(),
        }
    }

    /// Appends a rename (builder style).
    #[must_use]
    pub fn rename(mut self, column: impl Into<String>, field: impl Into<String>) -> Self {
        self.push(ColumnRename::new(column, field));
        self
    }

    pub fn push(&mut self, rename: ColumnRename) {
        self.renames.push(rename);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnRename> {
        self.renames.iter()
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

impl<'a> IntoIterator for &'a ColumnMapping {
    type Item = &'a ColumnRename;
    type IntoIter = std::slice::Iter<'a, ColumnRename>;

    fn into_iter(self) -> Self::IntoIter {
        self.renames.iter()
    }
}

impl FromIterator<ColumnRename> for ColumnMapping {
    fn from_iter<T: IntoIterator<Item = ColumnRename>>(iter: T) -> Self {
        Self {
            renames: iter.into_iter().collect(),
        }
    }
}
