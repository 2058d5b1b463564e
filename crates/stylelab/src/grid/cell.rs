use serde::Serialize;

use super::badges::Badge;
use super::index::{GridAddress, address};
use crate::model::{ImageRecord, ModelBundle};

/// Content of one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell<'a> {
    /// Column 0: the normalized prompt and its 1-based rank.
    Prompt { text: &'a str, rank: usize },
    Image { image: &'a ImageRecord },
    /// Dangling or absent reference; rendered empty.
    Missing,
}

/// A column header with its badges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnHeader<'a> {
    pub label: &'a str,
    pub badges: Vec<Badge>,
}

/// Read-only grid view over a loaded bundle.
#[derive(Debug, Clone, Copy)]
pub struct Grid<'a> {
    bundle: &'a ModelBundle,
}

impl<'a> Grid<'a> {
    pub fn new(bundle: &'a ModelBundle) -> Self {
        Self { bundle }
    }

    pub fn rows(&self) -> usize {
        self.bundle.table.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.bundle.table.headers.len()
    }

    pub fn total_cells(&self) -> usize {
        self.rows() * self.columns()
    }

    /// Address of flat position `position`, if it lies inside the grid.
    pub fn address(&self, position: usize) -> Option<GridAddress> {
        if position >= self.total_cells() {
            return None;
        }
        address(position, self.columns())
    }

    /// Resolve the cell at flat position `position`.
    pub fn cell(&self, position: usize) -> Option<Cell<'a>> {
        let addr = self.address(position)?;
        Some(self.cell_at(addr))
    }

    pub fn cell_at(&self, addr: GridAddress) -> Cell<'a> {
        let bundle = self.bundle;
        let Some(row) = bundle.table.rows.get(addr.row) else {
            return Cell::Missing;
        };
        if addr.col == 0 {
            return Cell::Prompt {
                text: row.first().map(String::as_str).unwrap_or(""),
                rank: addr.row + 1,
            };
        }
        row.get(addr.col)
            .and_then(|reference| bundle.images.resolve(reference))
            .map(|image| Cell::Image { image })
            .unwrap_or(Cell::Missing)
    }

    /// Image cells of one row (columns 1..), for the stacked card layout.
    pub fn row_cells(&self, row: usize) -> Vec<Cell<'a>> {
        if row >= self.rows() {
            return Vec::new();
        }
        (1..self.columns())
            .map(|col| self.cell_at(GridAddress { row, col }))
            .collect()
    }

    /// Prompt text of a row, as copied to the clipboard.
    pub fn prompt(&self, row: usize) -> Option<&'a str> {
        self.bundle
            .table
            .rows
            .get(row)
            .and_then(|r| r.first())
            .map(String::as_str)
    }

    pub fn header(&self, col: usize) -> Option<ColumnHeader<'a>> {
        let label = self.bundle.table.headers.get(col)?;
        Some(ColumnHeader {
            label: label.as_str(),
            badges: self.bundle.badge_index().resolve(
                col,
                &self.bundle.prompt_order,
                &self.bundle.common_prompts,
            ),
        })
    }
}
