//! Report generation for validation results.
//!
//! This module provides multiple output formats for a validation [`Report`]:
//! - JSON: Structured data for programmatic integration
//! - Summary: Compact shell-friendly output listing failed items
//! - Table: Aligned per-item, per-rule terminal output

mod json;
mod summary;
mod types;

pub use json::JsonReporter;
pub use summary::{SummaryReporter, TableReporter};
pub use types::ReportFormat;

use crate::model::{Bom, Report};
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the validation report of a parsed bill of material
    fn generate(&self, report: &Report, bom: &Bom) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_report(
        &self,
        report: &Report,
        bom: &Bom,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let rendered = self.generate(report, bom)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
///
/// `Auto` must be resolved by the caller; it falls back to the summary.
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    colored: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Table if colored => Box::new(TableReporter::new()),
        ReportFormat::Table => Box::new(TableReporter::new().no_color()),
        ReportFormat::Auto | ReportFormat::Summary if colored => Box::new(SummaryReporter::new()),
        ReportFormat::Auto | ReportFormat::Summary => Box::new(SummaryReporter::new().no_color()),
    }
}
