//! Read-only access to the flat tabular export.
//!
//! The block parser never talks to a spreadsheet library directly. It reads through
//! the [`Grid`] trait, which exposes scalar cell values by 1-based `(row, col)`
//! coordinates plus the sheet extents. [`MemoryGrid`] is the in-memory
//! implementation; with the `xlsx` feature, [`read_xlsx`] loads the first worksheet
//! of a workbook into one.

mod memory;
mod value;
#[cfg(feature = "xlsx")]
mod xlsx;

pub use memory::MemoryGrid;
pub use value::CellValue;
#[cfg(feature = "xlsx")]
pub use xlsx::read_xlsx;

/// A 2-D grid of scalar cell values, addressed from `(1, 1)`.
///
/// Implementations must return stable values: reading the same cell twice yields
/// the same value, and reading outside the extents yields `None`.
pub trait Grid {
    /// The value at `(row, col)`, or `None` for an empty cell.
    fn cell(&self, row: usize, col: usize) -> Option<&CellValue>;

    /// The last row that may hold a value.
    fn max_row(&self) -> usize;

    /// The last column that may hold a value.
    fn max_col(&self) -> usize;

    /// Whether every cell of `row` in `1..=max_col` is empty.
    fn row_is_empty(&self, row: usize) -> bool {
        (1..=self.max_col()).all(|col| self.cell(row, col).is_none())
    }

    /// The stringified value at `(row, col)`.
    fn text(&self, row: usize, col: usize) -> Option<String> {
        self.cell(row, col).map(CellValue::to_text)
    }
}

impl<G: Grid + ?Sized> Grid for &G {
    fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        (**self).cell(row, col)
    }

    fn max_row(&self) -> usize {
        (**self).max_row()
    }

    fn max_col(&self) -> usize {
        (**self).max_col()
    }
}
