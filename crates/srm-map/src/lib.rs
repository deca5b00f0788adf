//! Record mapping engine.
//!
//! Turns a [`Grid`](srm_model::Grid) into typed records and back. Columns
//! are matched to fields by exact header name, optionally after applying a
//! [`ColumnMapping`](srm_model::ColumnMapping), or by position when the grid
//! is treated as headerless. Cells go through an explicit coercion table per
//! [`ScalarKind`](srm_model::ScalarKind); any failure fails the whole call.

pub mod coerce;
pub mod correspondence;
pub mod error;
pub mod export;
pub mod mapper;
pub mod options;

pub use coerce::coerce;
pub use error::{CoercionFailure, MapError, Result};
pub use export::{to_grid, to_grid_with};
pub use mapper::{map_grid, map_grid_with};
pub use options::{EmptyCellPolicy, ExportOptions, MapOptions};
