//! Table output for the terminal.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use srm_map::CoercionFailure;
use srm_model::{CellValue, Grid};

/// Prints the header and the first `limit` rows of a grid.
pub fn print_preview(grid: &Grid, limit: usize) {
    println!("{}", preview_table(grid, limit));
    println!(
        "{} row(s), {} column(s){}",
        grid.height(),
        grid.width(),
        if grid.has_header() { "" } else { ", no header" }
    );
}

/// Builds the preview table. Headerless grids are labelled `#1`, `#2`, ...
pub fn preview_table(grid: &Grid, limit: usize) -> Table {
    let mut table = Table::new();
    let labels: Vec<String> = match grid.header() {
        Some(header) => header.to_vec(),
        None => (1..=grid.width()).map(|n| format!("#{n}")).collect(),
    };
    let mut header = vec![header_cell("Row")];
    header.extend(labels.iter().map(|label| header_cell(label)));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for (idx, row) in grid.rows.iter().take(limit).enumerate() {
        let mut cells = vec![dim_cell(idx)];
        cells.extend(row.iter().map(value_cell));
        table.add_row(cells);
    }
    table
}

/// Prints coercion failures, one line per cell.
pub fn print_failures(failures: &[CoercionFailure]) {
    eprintln!("{}", failure_table(failures));
    eprintln!("{} cell(s) could not be converted", failures.len());
}

pub fn failure_table(failures: &[CoercionFailure]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for failure in failures {
        table.add_row(vec![
            Cell::new(failure.row),
            Cell::new(&failure.column),
            Cell::new(&failure.field),
            Cell::new(&failure.value),
            Cell::new(&failure.reason).fg(Color::Red),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Missing => dim_cell("-"),
        CellValue::Int(_) | CellValue::Float(_) => {
            Cell::new(value).set_alignment(CellAlignment::Right)
        }
        _ => Cell::new(value),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
