//! Workspace values referenced by `%WS:` criteria.

use crate::error::{BomError, ErrorContext, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Key/value settings of the project workspace the export belongs to.
///
/// An unavailable workspace answers no lookups, so every workspace criteria fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Workspace {
    pub available: bool,
    pub elements: IndexMap<String, String>,
}

impl Workspace {
    /// An available workspace holding `elements`.
    pub fn new<K, V>(elements: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            available: true,
            elements: elements
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The value of `key`, if the workspace is available and defines it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        if !self.available {
            return None;
        }
        self.elements.get(key).map(String::as_str)
    }

    /// Load a workspace file. A bare mapping of keys is read as an available
    /// workspace holding those keys.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BomError::io(path, e))?;
        let context = || format!("parsing workspace {}", path.display());
        let value: serde_json::Value = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content).with_context(context)?,
            _ => serde_yaml::from_str(&content).with_context(context)?,
        };

        let is_wrapped = value
            .as_object()
            .is_some_and(|map| map.contains_key("elements") || map.contains_key("available"));
        if is_wrapped {
            return Ok(serde_json::from_value(value)?);
        }

        let elements: IndexMap<String, serde_json::Value> = serde_json::from_value(value)?;
        Ok(Self::new(elements.into_iter().map(|(k, v)| {
            let v = match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (k, v)
        })))
    }
}
