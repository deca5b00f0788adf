//! Data model for the sheet record mapper.
//!
//! This crate defines the shapes that flow between the tabular readers, the
//! record mapper and the writers:
//!
//! - **Grid**: rows of weakly-typed [`CellValue`]s with an optional header
//! - **Scalars**: the [`ScalarKind`] table and the typed [`Value`] a field holds
//! - **Schema**: an ordered list of [`Field`]s plus a record factory
//! - **Column mapping**: the caller's rename directive between columns and fields
//!
//! # Example
//!
//! ```
//! use srm_model::{Grid, Record, record_schema};
//!
//! #[derive(Debug, Default)]
//! struct Person {
//!     id: i64,
//!     name: String,
//! }
//!
//! record_schema!(Person { id: i64, name: String });
//!
//! let schema = Person::schema();
//! assert_eq!(schema.field_names(), vec!["id", "name"]);
//!
//! let grid = Grid::with_header(vec!["id".into(), "name".into()], Vec::new());
//! assert_eq!(grid.width(), 2);
//! ```

pub mod datetime;
pub mod dynamic;
pub mod error;
pub mod grid;
pub mod mapping;
pub mod schema;
pub mod value;

pub use dynamic::{DynamicRecord, FieldSpec, SchemaFile};
pub use error::{ModelError, Result};
pub use grid::{CellValue, Grid};
pub use mapping::{ColumnMapping, ColumnRename};
pub use schema::{Field, Record, Schema};
pub use value::{Scalar, ScalarKind, Value};
