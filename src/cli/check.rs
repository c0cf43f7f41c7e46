//! Check command handler.
//!
//! Implements the `check` subcommand: parse an export, sort it, validate every
//! assembly item against the configured rules and report the verdicts.

use super::{prepare_config, RunOptions};
use crate::grid::Grid;
use crate::model::Paths;
use crate::parsers::ParseOptions;
use crate::pipeline::{
    exit_codes, load_grid, load_paths, output_report, process_bom, validate_bom, OutputTarget,
    PipelineError,
};
use crate::reports::ReportFormat;
use anyhow::Result;
use std::path::PathBuf;

/// Settings of one `check` run.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// The tabular export to read
    pub export: PathBuf,
    /// Part number → document path lookup
    pub paths: PathBuf,
    pub run: RunOptions,
    pub format: ReportFormat,
    /// Output file path (stdout if not specified)
    pub output_file: Option<PathBuf>,
    pub no_color: bool,
    pub quiet: bool,
}

/// Run the check command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_check(config: CheckConfig) -> Result<i32> {
    let grid = load_grid(&config.export).map_err(|source| PipelineError::ParseFailed {
        path: config.export.display().to_string(),
        source,
    })?;
    let paths = load_paths(&config.paths)?;
    check_grid(&config, &grid, &paths)
}

/// The part of `check` that runs after the inputs are loaded.
pub(crate) fn check_grid<G: Grid + ?Sized>(
    config: &CheckConfig,
    grid: &G,
    paths: &Paths,
) -> Result<i32> {
    let resolved = prepare_config(&config.run)?;
    let options = ParseOptions::from_export(&resolved.export);

    let parsed = process_bom(&resolved, grid, paths, &options).map_err(|source| {
        PipelineError::ParseFailed {
            path: config.export.display().to_string(),
            source,
        }
    })?;
    let report = validate_bom(&resolved, &parsed.bom)
        .map_err(|source| PipelineError::ValidationFailed { source })?;

    let target = OutputTarget::from_option(config.output_file.clone());
    output_report(
        &report,
        &parsed.bom,
        config.format,
        &target,
        config.no_color,
        config.quiet,
    )
    .map_err(|source| PipelineError::ReportFailed { source })?;

    Ok(if report.is_ok() {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_FAILED
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MemoryGrid;
    use std::io::Write;

    const HEADER: [&str; 6] = [
        "pytia.project",
        "pytia.machine",
        "Part Number",
        "Revision",
        "Quantity",
        "Source",
    ];

    fn grid(revision: &str) -> MemoryGrid {
        let row = vec!["1234", "M", "P1", revision, "1", "Made"];
        MemoryGrid::from_text_rows(vec![
            vec!["Bill of Material: A1"],
            HEADER.to_vec(),
            row.clone(),
            vec![],
            vec!["Recapitulation: A1"],
            vec!["Different parts: 1"],
            vec!["Total parts: 1"],
            vec![],
            HEADER.to_vec(),
            row,
        ])
    }

    fn config(dir: &tempfile::TempDir) -> CheckConfig {
        let config_path = dir.path().join(".cad-bom.yaml");
        let mut file = std::fs::File::create(&config_path).expect("create");
        file.write_all(
            br#"
bom:
  header_items:
    summary: [pytia.project, pytia.machine, $partnumber, $revision, $quantity, $source]
  sort:
    made: $partnumber
    bought: $partnumber
filters:
  - name: Revision
    property_name: $revision
    criteria: '[A-Z]'
"#,
        )
        .expect("write");

        CheckConfig {
            export: PathBuf::from("export.xlsx"),
            paths: PathBuf::from("paths.json"),
            run: RunOptions {
                config_file: Some(config_path),
                ..RunOptions::default()
            },
            format: ReportFormat::Json,
            output_file: Some(dir.path().join("report.json")),
            no_color: true,
            quiet: true,
        }
    }

    fn paths() -> Paths {
        [("A1", "/cad/A1.CATProduct"), ("P1", "/cad/P1.CATPart")]
            .into_iter()
            .collect()
    }

    #[test]
    fn passing_export_exits_zero() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config(&dir);
        let code = check_grid(&config, &grid("B"), &paths()).expect("check");
        assert_eq!(code, exit_codes::SUCCESS);

        let json = std::fs::read_to_string(dir.path().join("report.json")).expect("read");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(value["status"], "OK");
    }

    #[test]
    fn failing_rule_exits_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config(&dir);
        let code = check_grid(&config, &grid("7"), &paths()).expect("check");
        assert_eq!(code, exit_codes::VALIDATION_FAILED);
    }

    #[test]
    fn structural_error_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config(&dir);
        let grid = MemoryGrid::from_text_rows(vec![vec!["nothing to see"]]);
        let err = check_grid(&config, &grid, &paths()).unwrap_err();
        assert!(err.to_string().starts_with("Parse failed for export.xlsx"));
    }
}
