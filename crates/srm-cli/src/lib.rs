//! CLI library components for the sheet record mapper.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod source;
pub mod summary;
