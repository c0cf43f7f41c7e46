//! Item exclusion predicates.

use crate::model::BomAssemblyItem;
use serde::Serialize;
use std::fmt;

/// Why an item was left out of its block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "prefix")]
pub enum ExclusionReason {
    /// The source column holds the `unknown` keyword
    UnknownSource,
    /// The part number starts with an ignored prefix
    Prefix(String),
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSource => f.write_str("source is unknown"),
            Self::Prefix(prefix) => write!(f, "part number starts with '{prefix}'"),
        }
    }
}

/// Two independent predicates; an item matching either is excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionPolicy {
    ignore_source_unknown: bool,
    prefixes: Vec<String>,
}

impl ExclusionPolicy {
    /// Empty prefixes are dropped, they would match every part number.
    #[must_use]
    pub fn new<I, S>(ignore_source_unknown: bool, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignore_source_unknown,
            prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// Split a `;`-separated prefix list such as `"X-;TMP"`.
    #[must_use]
    pub fn split_prefixes(text: &str) -> Vec<String> {
        text.split(';')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.ignore_source_unknown && self.prefixes.is_empty()
    }

    /// The reason to exclude `item`, if any. Unknown source is checked first.
    #[must_use]
    pub fn excludes(&self, item: &BomAssemblyItem) -> Option<ExclusionReason> {
        if self.ignore_source_unknown && item.source.is_unknown() {
            return Some(ExclusionReason::UnknownSource);
        }
        self.prefixes
            .iter()
            .find(|prefix| item.partnumber.starts_with(prefix.as_str()))
            .map(|prefix| ExclusionReason::Prefix(prefix.clone()))
    }
}
