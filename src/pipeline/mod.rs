//! Pipeline orchestration for bill of material checks.
//!
//! This module provides the load → parse → sort → validate → report workflow
//! shared by the CLI command handlers.

mod output;
mod parse;
mod sort_stage;
mod validate_stage;

pub use output::{auto_detect_format, output_report, should_use_color, write_output, OutputTarget};
pub use parse::{load_grid, load_paths, process_bom};
pub use sort_stage::{sort_bom, sort_items};
pub use validate_stage::validate_bom;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse the export
    #[error("Parse failed for {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: crate::error::BomError,
    },

    /// Rule evaluation failed
    #[error("Validation failed: {source}")]
    ValidationFailed {
        #[source]
        source: crate::error::BomError,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Every item passed every applicable rule
    pub const SUCCESS: i32 = 0;
    /// At least one item failed a rule
    pub const VALIDATION_FAILED: i32 = 1;
    /// The run could not complete
    pub const ERROR: i32 = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::VALIDATION_FAILED, 1);
        assert_eq!(exit_codes::ERROR, 2);
    }

    #[test]
    fn test_pipeline_error_names_path() {
        let err = PipelineError::ParseFailed {
            path: "export.xlsx".to_string(),
            source: crate::error::BomError::validation("broken"),
        };
        assert!(err.to_string().starts_with("Parse failed for export.xlsx"));
    }
}
