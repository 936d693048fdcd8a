//! Tables: a flat list of cells laid out by column weights

use crate::chunk::{AttributeMap, Chunk};
use serde::Serialize;

/// Parse a `columns` attribute such as `"1,2,1"` into integer weights
pub fn parse_columns(columns: &str) -> Result<Vec<u32>, String> {
    let weights = columns
        .split(',')
        .map(|w| {
            w.trim()
                .parse::<u32>()
                .map_err(|_| format!("Invalid column weight '{}' in '{columns}'", w.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if weights.iter().sum::<u32>() == 0 {
        return Err(format!("Column weights '{columns}' add up to zero"));
    }
    Ok(weights)
}

/// A finished table
///
/// Cells are stored in document order; row boundaries are implied by the
/// column count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub attributes: AttributeMap,
    pub cells: Vec<Chunk>,
}

impl Table {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Column weights, or `None` if `columns` is absent or malformed
    pub fn column_weights(&self) -> Option<Vec<u32>> {
        parse_columns(self.attr("columns")?).ok()
    }

    /// Column widths as integer percentages of the total weight
    pub fn column_percentages(&self) -> Option<Vec<u32>> {
        let weights = self.column_weights()?;
        let total: u32 = weights.iter().sum();
        Some(weights.iter().map(|w| w * 100 / total).collect())
    }

    /// Number of columns; malformed or missing `columns` means one
    pub fn column_count(&self) -> usize {
        self.column_weights().map_or(1, |w| w.len())
    }

    /// Table width as a percentage of the available width
    pub fn width_percent(&self) -> f32 {
        self.attr("width")
            .and_then(|w| w.trim().trim_end_matches('%').parse().ok())
            .unwrap_or(100.0)
    }

    /// Cells grouped into rows; the last row may be short
    pub fn rows(&self) -> impl Iterator<Item = &[Chunk]> {
        self.cells.chunks(self.column_count())
    }
}

/// Accumulates the cells of the table currently open
#[derive(Debug)]
pub struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    pub fn new(attributes: AttributeMap) -> Self {
        TableBuilder {
            table: Table {
                attributes,
                cells: Vec::new(),
            },
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Start a cell; cells take only their own attributes
    pub fn open_cell(&mut self, attributes: &[(String, String)]) {
        let mut cell = Chunk::new();
        cell.extend_attributes(attributes);
        self.table.cells.push(cell);
    }

    /// Set the contents of the most recently opened cell
    pub fn close_cell(&mut self, contents: String) {
        if let Some(cell) = self.table.cells.last_mut() {
            cell.contents = contents;
        }
    }

    pub fn cell_count(&self) -> usize {
        self.table.cells.len()
    }

    /// The finished table, or `None` if it never received a cell
    pub fn finish(self) -> Option<Table> {
        if self.table.cells.is_empty() {
            None
        } else {
            Some(self.table)
        }
    }
}
