//! In-memory grid implementation.

use super::{CellValue, Grid};

/// A fully materialised grid. Row and column indices start at 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryGrid {
    rows: Vec<Vec<Option<CellValue>>>,
    max_col: usize,
}

impl MemoryGrid {
    /// Create an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from rows of optional values; the first row becomes row 1.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Option<CellValue>>>) -> Self {
        let max_col = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, max_col }
    }

    /// Build a grid from rows of text, where `""` marks an empty cell.
    ///
    /// Convenient for fixtures: `" "` stays a single-space text value, just like
    /// the exporter writes it.
    #[must_use]
    pub fn from_text_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| {
                        let cell = cell.as_ref();
                        (!cell.is_empty()).then(|| CellValue::from(cell))
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(rows)
    }

    /// Set a single cell, growing the grid as needed.
    pub fn set(&mut self, row: usize, col: usize, value: Option<CellValue>) {
        if row == 0 || col == 0 {
            return;
        }
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        let cells = &mut self.rows[row - 1];
        if cells.len() < col {
            cells.resize(col, None);
        }
        cells[col - 1] = value;
        self.max_col = self.max_col.max(col);
    }

    /// Append a row after the current last row.
    pub fn push_row(&mut self, row: Vec<Option<CellValue>>) {
        self.max_col = self.max_col.max(row.len());
        self.rows.push(row);
    }
}

impl Grid for MemoryGrid {
    fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        if row == 0 || col == 0 {
            return None;
        }
        self.rows.get(row - 1)?.get(col - 1)?.as_ref()
    }

    fn max_row(&self) -> usize {
        self.rows.len()
    }

    fn max_col(&self) -> usize {
        self.max_col
    }
}
