//! Plain-text table rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use datafile_model::Table as DataTable;

use crate::renderer::DisplayRenderer;

/// What the leading index column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexColumn {
    /// Each row's stored position.
    Positions,
    /// `1..=n` in display order, the numbers a user types to pick a row.
    DisplayOrder,
}

/// Renders the table as a bordered text grid.
#[derive(Debug, Clone)]
pub struct TextDisplay {
    width: u16,
}

impl TextDisplay {
    pub fn new(width: u16) -> Self {
        Self { width }
    }
}

impl DisplayRenderer for TextDisplay {
    fn name(&self) -> &str {
        "Text"
    }

    fn render(&self, table: &DataTable, sink: &mut dyn FnMut(&str)) {
        let rendered = build_text_table(table, IndexColumn::Positions, self.width);
        sink(&rendered.to_string());
    }
}

pub fn build_text_table(table: &DataTable, index: IndexColumn, width: u16) -> Table {
    let mut grid = Table::new();
    let index_label = match index {
        IndexColumn::Positions => "",
        IndexColumn::DisplayOrder => "#",
    };
    let mut header = vec![header_cell(index_label)];
    header.extend(table.columns().iter().map(|column| header_cell(column)));
    grid.set_header(header);
    apply_table_style(&mut grid, width);
    if let Some(column) = grid.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for (order, row) in table.rows().iter().enumerate() {
        let label = match index {
            IndexColumn::Positions => row.position,
            IndexColumn::DisplayOrder => order + 1,
        };
        let mut cells = vec![Cell::new(label).fg(Color::DarkGrey)];
        cells.extend(row.cells.iter().map(Cell::new));
        grid.add_row(cells);
    }
    grid
}

fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
