//! Error types for the data model.

use thiserror::Error;

/// Errors raised while building or validating model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Two schema fields share the same name.
    #[error("field '{name}' is declared more than once")]
    DuplicateField { name: String },

    /// A schema field was declared with an empty name.
    #[error("field names must not be empty")]
    EmptyName,

    /// A grid row does not have the width of the header (or the first row).
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A scalar kind name could not be recognised.
    #[error("unknown scalar kind '{0}'")]
    UnknownKind(String),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::RaggedRow {
            row: 3,
            expected: 2,
            found: 5,
        };
        assert_eq!(err.to_string(), "row 3 has 5 cells, expected 2");
    }
}
