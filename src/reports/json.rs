//! JSON report generator.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::model::{Bom, Report, Status, StatusCounts};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Include the parsed bill of material next to the verdicts
    include_bom: bool,
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_bom: true,
            pretty: true,
        }
    }

    /// Create a reporter that leaves the bill of material out
    #[must_use]
    pub const fn report_only() -> Self {
        Self {
            include_bom: false,
            pretty: true,
        }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, report: &Report, bom: &Bom) -> Result<String, ReportError> {
        let document = JsonReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME"),
                    version: env!("CARGO_PKG_VERSION"),
                },
                generated_at: Utc::now().to_rfc3339(),
                bom_created: bom.created.to_rfc3339(),
            },
            status: report.status,
            counts: report.count_by_status(),
            bom: self.include_bom.then_some(bom),
            report,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        }?;

        Ok(json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: JsonReportMetadata,
    status: Status,
    counts: StatusCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    bom: Option<&'a Bom>,
    report: &'a Report,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    bom_created: String,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}
