//! Error types for mapping operations.

use srm_model::ModelError;
use thiserror::Error;

/// One cell that could not be converted to its field's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}, column '{column}' -> field '{field}': {reason}")]
pub struct CoercionFailure {
    /// Zero-based data row index (header not counted).
    pub row: usize,
    /// Source column name, or `#i` when mapping by position without names.
    pub column: String,
    /// Target field name.
    pub field: String,
    /// Rendered raw cell value.
    pub value: String,
    /// Why the conversion failed.
    pub reason: String,
}

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A rename directive names a column the header does not have.
    #[error("column '{column}' named in the column mapping is not in the header")]
    SchemaMismatch { column: String },

    /// An export rename names a field the schema does not have.
    #[error("field '{field}' named in the column mapping is not in the schema")]
    UnknownField { field: String },

    /// One or more cells failed coercion. No records are returned.
    #[error("{} cell(s) could not be converted; first: {}", .failures.len(), first_failure(.failures))]
    Coercion { failures: Vec<CoercionFailure> },

    /// Rows of differing width.
    #[error("row {row} has {found} cells, expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A column mapping was supplied for positional mapping.
    #[error("a column mapping requires header-based mapping")]
    MappingWithoutHeader,

    /// Name-based mapping was requested for a grid without a header.
    #[error("header-based mapping requested but the grid has no header")]
    MissingHeader,

    /// The record schema is invalid.
    #[error("invalid record schema: {0}")]
    Schema(#[from] ModelError),
}

impl MapError {
    /// Coercion failures carried by this error, if any.
    pub fn failures(&self) -> &[CoercionFailure] {
        match self {
            Self::Coercion { failures } => failures,
            _ => &[],
        }
    }
}

fn first_failure(failures: &[CoercionFailure]) -> String {
    failures
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MapError>;
