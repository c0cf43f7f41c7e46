//! Scalar cell values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar spreadsheet value. Empty cells are represented by the absence of a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// Render the value as the text stored in an item's properties.
    ///
    /// Integral floats drop their fractional part, so a quantity exported as `2.0`
    /// reads `"2"`.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", *f as i64)
            }
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }

    /// The text slice, if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_float_renders_without_fraction() {
        assert_eq!(CellValue::Float(2.0).to_text(), "2");
        assert_eq!(CellValue::Float(-14.0).to_text(), "-14");
        assert_eq!(CellValue::Float(2.5).to_text(), "2.5");
    }

    #[test]
    fn text_and_scalars_render() {
        assert_eq!(CellValue::from("P1").to_text(), "P1");
        assert_eq!(CellValue::Int(7).to_text(), "7");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
        assert_eq!(CellValue::from("x").as_str(), Some("x"));
        assert_eq!(CellValue::Int(1).as_str(), None);
    }
}
