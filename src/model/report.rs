//! Validation report structures.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Verdict of a rule on an item, and aggregate status of items and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Failed,
    Skipped,
}

impl Status {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
        }
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule verdicts for one item of one assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportItem {
    pub partnumber: String,
    pub path: Option<PathBuf>,
    pub parent_partnumber: String,
    pub parent_path: PathBuf,
    /// Rule name → verdict, in rule order
    pub details: IndexMap<String, Status>,
    /// `FAILED` if any rule failed, `OK` otherwise
    pub status: Status,
}

impl ReportItem {
    #[must_use]
    pub fn new(
        partnumber: impl Into<String>,
        path: Option<PathBuf>,
        parent_partnumber: impl Into<String>,
        parent_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            partnumber: partnumber.into(),
            path,
            parent_partnumber: parent_partnumber.into(),
            parent_path: parent_path.into(),
            details: IndexMap::new(),
            status: Status::Ok,
        }
    }

    /// Record a rule verdict. A failed rule fails the item; nothing un-fails it.
    pub fn record(&mut self, rule: impl Into<String>, status: Status) {
        if status.is_failed() {
            self.status = Status::Failed;
        }
        self.details.insert(rule.into(), status);
    }

    /// Names of the rules that failed on this item.
    pub fn failed_rules(&self) -> impl Iterator<Item = &str> {
        self.details
            .iter()
            .filter(|(_, s)| s.is_failed())
            .map(|(name, _)| name.as_str())
    }
}

/// Count of report items per aggregate status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub ok: usize,
    pub failed: usize,
}

/// Result of validating a bill of material. Every item is retained, passing or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub status: Status,
    pub items: Vec<ReportItem>,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            status: Status::Ok,
            items: Vec::new(),
        }
    }
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item; a failed item fails the report for good.
    pub fn push(&mut self, item: ReportItem) {
        if item.status.is_failed() {
            self.status = Status::Failed;
        }
        self.items.push(item);
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.status, Status::Ok)
    }

    pub fn failed_items(&self) -> impl Iterator<Item = &ReportItem> {
        self.items.iter().filter(|i| i.status.is_failed())
    }

    #[must_use]
    pub fn count_by_status(&self) -> StatusCounts {
        self.items
            .iter()
            .fold(StatusCounts::default(), |mut counts, item| {
                if item.status.is_failed() {
                    counts.failed += 1;
                } else {
                    counts.ok += 1;
                }
                counts
            })
    }
}
