//! Bordered text grid using comfy-table.
//!
//! Header row from the schema, one line per row, `=` under the header.

use comfy_table::presets::ASCII_FULL;
use comfy_table::Table as Grid;

use tabq_core::prelude::{Cell, Table};

pub fn render_grid(table: &Table) -> String {
    let mut grid = Grid::new();
    grid.load_preset(ASCII_FULL)
        .set_header(table.schema().columns.iter());

    for row in table.rows() {
        grid.add_row(row.cells().iter().map(Cell::as_str));
    }

    grid.to_string()
}
