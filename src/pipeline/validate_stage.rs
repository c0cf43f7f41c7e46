//! Rule validation stage.

use crate::config::ResolvedConfig;
use crate::error::{ErrorContext, Result};
use crate::model::{Bom, Report};
use crate::rules::RuleEngine;

/// Validate every assembly item of `bom` against the enabled rules.
pub fn validate_bom(config: &ResolvedConfig, bom: &Bom) -> Result<Report> {
    let engine =
        RuleEngine::new(&config.filters, config.workspace.clone()).context("loading rules")?;
    let report = engine.generate_report(bom)?;

    let counts = report.count_by_status();
    if report.is_ok() {
        tracing::info!("Validation passed: {} items OK", counts.ok);
    } else {
        tracing::warn!(
            "Validation failed: {} of {} items FAILED",
            counts.failed,
            counts.ok + counts.failed
        );
    }
    Ok(report)
}
