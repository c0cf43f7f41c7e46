//! Part number → document path lookup.

use crate::error::{BomError, ErrorContext, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Document paths of every part number in the product tree.
///
/// Built once per run by walking the CAD tree; read-only while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paths {
    pub items: IndexMap<String, PathBuf>,
}

impl Paths {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The path of a part number, if it is stored in a document.
    #[must_use]
    pub fn get(&self, partnumber: &str) -> Option<&Path> {
        self.items.get(partnumber).map(PathBuf::as_path)
    }

    pub fn insert(&mut self, partnumber: impl Into<String>, path: impl Into<PathBuf>) {
        self.items.insert(partnumber.into(), path.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Load a JSON or YAML mapping, chosen by file extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BomError::io(path, e))?;
        let context = || format!("parsing {}", path.display());
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&content).with_context(context),
            _ => serde_json::from_str(&content).with_context(context),
        }
    }
}

impl<K: Into<String>, P: Into<PathBuf>> FromIterator<(K, P)> for Paths {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(k, p)| (k.into(), p.into()))
                .collect(),
        }
    }
}
