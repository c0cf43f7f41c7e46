//! Bill of material structures.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Header name → normalized cell value, in header order. `None` is an empty cell.
pub type Properties = IndexMap<String, Option<String>>;

/// Classification of an item by its source property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Manufactured in house
    Made,
    /// Purchased
    Bought,
    /// Explicitly marked as unknown by the CAD system
    Unknown,
    /// A token that matches none of the configured keywords
    Other(String),
    /// The source cell is empty
    Unset,
}

impl Source {
    #[must_use]
    pub const fn is_made(&self) -> bool {
        matches!(self, Self::Made)
    }

    #[must_use]
    pub const fn is_bought(&self) -> bool {
        matches!(self, Self::Bought)
    }

    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Made => f.write_str("made"),
            Self::Bought => f.write_str("bought"),
            Self::Unknown => f.write_str("unknown"),
            Self::Other(token) => f.write_str(token),
            Self::Unset => f.write_str("-"),
        }
    }
}

/// One data row of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomAssemblyItem {
    /// Unique within the containing assembly
    pub partnumber: String,
    pub source: Source,
    pub properties: Properties,
    /// Document path, `None` for tree nodes that are not stored in a file
    pub path: Option<PathBuf>,
}

impl BomAssemblyItem {
    #[must_use]
    pub fn new(
        partnumber: impl Into<String>,
        source: Source,
        properties: Properties,
        path: Option<PathBuf>,
    ) -> Self {
        Self {
            partnumber: partnumber.into(),
            source,
            properties,
            path,
        }
    }

    /// The normalized value of a property; `None` if absent or empty.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_deref())
    }

    /// Whether the property column exists for this item, empty or not.
    #[must_use]
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }
}

/// One parsed block: a sub-assembly or the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomAssembly {
    pub partnumber: String,
    pub path: PathBuf,
    pub items: Vec<BomAssemblyItem>,
}

impl BomAssembly {
    #[must_use]
    pub fn new(partnumber: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            partnumber: partnumber.into(),
            path: path.into(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up an item by part number.
    #[must_use]
    pub fn item(&self, partnumber: &str) -> Option<&BomAssemblyItem> {
        self.items.iter().find(|i| i.partnumber == partnumber)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The reconstructed bill of material of one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bom {
    pub created: DateTime<Utc>,
    /// Sub-assembly blocks in source order
    pub assemblies: Vec<BomAssembly>,
    /// The trailing recapitulation block
    pub summary: BomAssembly,
}

impl Bom {
    #[must_use]
    pub fn new(assemblies: Vec<BomAssembly>, summary: BomAssembly) -> Self {
        Self {
            created: Utc::now(),
            assemblies,
            summary,
        }
    }

    /// Look up a sub-assembly by part number.
    #[must_use]
    pub fn assembly(&self, partnumber: &str) -> Option<&BomAssembly> {
        self.assemblies.iter().find(|a| a.partnumber == partnumber)
    }

    /// Number of items across all sub-assemblies (the summary is not counted).
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.assemblies.iter().map(BomAssembly::len).sum()
    }

    /// Every item list: the summary first, then each assembly.
    pub fn item_lists_mut(&mut self) -> impl Iterator<Item = &mut BomAssembly> {
        std::iter::once(&mut self.summary).chain(self.assemblies.iter_mut())
    }
}
