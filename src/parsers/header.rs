//! Header items and the header locator.

use crate::error::ParseErrorKind;
use crate::grid::Grid;
use indexmap::IndexMap;
use serde::Serialize;

/// One configured header item, already keyword-resolved.
///
/// `Label:PROPERTY` names the exported column `PROPERTY` and shows it as `Label`;
/// `PROPERTY=text` is a constant column whose cells always read `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderItem {
    /// Display label in a formatted workbook
    pub label: String,
    /// Column name in the export
    pub property: String,
    /// Constant value replacing every cell of the column
    pub fixed_text: Option<String>,
}

impl HeaderItem {
    /// Parse a header item definition.
    #[must_use]
    pub fn parse(item: &str) -> Self {
        if let Some((label, property)) = item.rsplit_once(':') {
            let label = label.split([':', '=']).next().unwrap_or(label);
            return Self {
                label: label.to_string(),
                property: property.to_string(),
                fixed_text: None,
            };
        }
        if let Some((property, text)) = item.split_once('=') {
            return Self {
                label: property.to_string(),
                property: property.to_string(),
                fixed_text: Some(text.to_string()),
            };
        }
        Self {
            label: item.to_string(),
            property: item.to_string(),
            fixed_text: None,
        }
    }
}

/// Column positions of one header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderLayout {
    /// The row the headers were read from
    pub row: usize,
    columns: IndexMap<String, usize>,
}

impl HeaderLayout {
    /// The 1-based column of a header label.
    #[must_use]
    pub fn column(&self, label: &str) -> Option<usize> {
        self.columns.get(label).copied()
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.columns.contains_key(label)
    }

    /// `(label, column)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.columns.iter().map(|(label, col)| (label.as_str(), *col))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Map every non-empty label of `row` to its column and check the expected ones.
///
/// Every `expected` label must be present, else [`ParseErrorKind::MissingHeader`];
/// then every `required` label, else [`ParseErrorKind::MissingRequiredHeader`].
/// A label that appears twice maps to its last column.
pub fn locate_headers<'a, G, E, R>(
    grid: &G,
    row: usize,
    expected: E,
    required: R,
) -> Result<HeaderLayout, ParseErrorKind>
where
    G: Grid + ?Sized,
    E: IntoIterator<Item = &'a str>,
    R: IntoIterator<Item = &'a str>,
{
    let mut columns = IndexMap::new();
    for col in 1..=grid.max_col() {
        if let Some(label) = grid.text(row, col) {
            columns.insert(label, col);
        }
    }

    for header in expected {
        if !columns.contains_key(header) {
            return Err(ParseErrorKind::MissingHeader {
                header: header.to_string(),
                row,
            });
        }
    }

    for header in required {
        if !columns.contains_key(header) {
            return Err(ParseErrorKind::MissingRequiredHeader {
                header: header.to_string(),
                row,
            });
        }
    }

    tracing::debug!("Located {} header items in row {row}", columns.len());
    Ok(HeaderLayout { row, columns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MemoryGrid;

    fn grid() -> MemoryGrid {
        MemoryGrid::from_text_rows([
            vec!["Bill of Material: A1", "", ""],
            vec!["Part Number", "", "Source"],
        ])
    }

    #[test]
    fn header_item_forms() {
        assert_eq!(
            HeaderItem::parse("Project:pytia.project"),
            HeaderItem {
                label: "Project".to_string(),
                property: "pytia.project".to_string(),
                fixed_text: None,
            }
        );
        let fixed = HeaderItem::parse("Definition=n/a");
        assert_eq!(fixed.property, "Definition");
        assert_eq!(fixed.fixed_text.as_deref(), Some("n/a"));

        let plain = HeaderItem::parse("Part Number");
        assert_eq!(plain.label, "Part Number");
        assert_eq!(plain.property, "Part Number");
    }

    #[test]
    fn locates_non_empty_labels_in_column_order() {
        let layout = locate_headers(&grid(), 2, ["Source"], ["Part Number"]).expect("headers");
        assert_eq!(layout.column("Part Number"), Some(1));
        assert_eq!(layout.column("Source"), Some(3));
        assert_eq!(layout.len(), 2);
        assert_eq!(
            layout.iter().collect::<Vec<_>>(),
            vec![("Part Number", 1), ("Source", 3)]
        );
    }

    #[test]
    fn missing_expected_header() {
        let err = locate_headers(&grid(), 2, ["Revision"], []).expect_err("missing");
        assert_eq!(
            err,
            ParseErrorKind::MissingHeader {
                header: "Revision".to_string(),
                row: 2
            }
        );
    }

    #[test]
    fn missing_required_header() {
        let err = locate_headers(&grid(), 2, ["Source"], ["Quantity"]).expect_err("missing");
        assert!(matches!(
            err,
            ParseErrorKind::MissingRequiredHeader { ref header, row: 2 } if header == "Quantity"
        ));
    }

    #[test]
    fn expected_headers_are_checked_first() {
        let err = locate_headers(&grid(), 2, ["Mass"], ["Quantity"]).expect_err("missing");
        assert!(matches!(err, ParseErrorKind::MissingHeader { .. }));
    }

    #[test]
    fn duplicate_label_keeps_last_column() {
        let grid = MemoryGrid::from_text_rows([vec!["Number", "Number"]]);
        let layout = locate_headers(&grid, 1, [], []).expect("headers");
        assert_eq!(layout.column("Number"), Some(2));
    }
}
