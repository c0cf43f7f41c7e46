//! Workbook backend built on calamine.

use super::{CellValue, MemoryGrid};
use crate::error::{BomError, GridErrorKind, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Read the first worksheet of a workbook into a [`MemoryGrid`].
///
/// Cells keep their absolute sheet position, so a worksheet whose used range starts
/// at `B3` still reads its first value at `(3, 2)`. Empty strings are dropped the
/// same way truly empty cells are.
pub fn read_xlsx(path: &Path) -> Result<MemoryGrid> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(BomError::grid(
            format!("opening {}", path.display()),
            GridErrorKind::UnsupportedFormat(extension),
        ));
    }

    let context = || format!("reading {}", path.display());
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| BomError::grid(context(), GridErrorKind::Workbook(e.to_string())))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| BomError::grid(context(), GridErrorKind::NoWorksheet))?
        .map_err(|e| BomError::grid(context(), GridErrorKind::Workbook(e.to_string())))?;

    let (start_row, start_col) = range.start().unwrap_or_default();
    let mut grid = MemoryGrid::new();
    for (row, col, data) in range.used_cells() {
        if let Some(value) = convert_value(data) {
            grid.set(
                row + start_row as usize + 1,
                col + start_col as usize + 1,
                Some(value),
            );
        }
    }

    tracing::debug!(
        "Loaded worksheet with {} rows and {} columns from {}",
        super::Grid::max_row(&grid),
        super::Grid::max_col(&grid),
        path.display()
    );
    Ok(grid)
}

fn convert_value(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Float(f) => Some(CellValue::Float(*f)),
        Data::Int(i) => Some(CellValue::Int(*i)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::DateTime(dt) => Some(CellValue::Float(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(e) => Some(CellValue::Text(format!("#{e:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_extension() {
        let err = read_xlsx(Path::new("export.csv")).expect_err("csv is not a workbook");
        assert!(matches!(
            err,
            BomError::Grid {
                source: GridErrorKind::UnsupportedFormat(_),
                ..
            }
        ));
    }

    #[test]
    fn missing_workbook_is_a_grid_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_xlsx(&dir.path().join("missing.xlsx")).expect_err("file is missing");
        assert!(matches!(
            err,
            BomError::Grid {
                source: GridErrorKind::Workbook(_),
                ..
            }
        ));
    }

    #[test]
    fn empty_strings_are_dropped() {
        assert_eq!(convert_value(&Data::String(String::new())), None);
        assert_eq!(convert_value(&Data::Empty), None);
        assert_eq!(
            convert_value(&Data::String(" ".to_string())),
            Some(CellValue::from(" "))
        );
        assert_eq!(convert_value(&Data::Int(3)), Some(CellValue::Int(3)));
    }
}
