//! Parse command handler.
//!
//! Implements the `parse` subcommand: reconstruct the bill of material of an export
//! and print it as JSON, together with the notices collected on the way.

use super::{prepare_config, RunOptions};
use crate::grid::Grid;
use crate::model::{Bom, Paths};
use crate::parsers::{ParseNotice, ParseOptions};
use crate::pipeline::{load_grid, load_paths, process_bom, write_output, OutputTarget};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Settings of one `parse` run.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// The tabular export to read
    pub export: PathBuf,
    /// Part number → document path lookup
    pub paths: PathBuf,
    pub run: RunOptions,
    /// Output file path (stdout if not specified)
    pub output_file: Option<PathBuf>,
    /// Leave the notices out of the output
    pub bom_only: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    bom: &'a Bom,
    notices: &'a [ParseNotice],
}

/// Run the parse command.
#[allow(clippy::needless_pass_by_value)]
pub fn run_parse(config: ParseConfig) -> Result<()> {
    let grid = load_grid(&config.export)
        .with_context(|| format!("Failed to read export {}", config.export.display()))?;
    let paths = load_paths(&config.paths)?;
    let json = render_parse(&config, &grid, &paths)?;
    write_output(&json, &OutputTarget::from_option(config.output_file.clone()), config.quiet)
}

pub(crate) fn render_parse<G: Grid + ?Sized>(
    config: &ParseConfig,
    grid: &G,
    paths: &Paths,
) -> Result<String> {
    let resolved = prepare_config(&config.run)?;
    let options = ParseOptions::from_export(&resolved.export);
    let parsed = process_bom(&resolved, grid, paths, &options)
        .with_context(|| format!("Failed to parse export {}", config.export.display()))?;

    for notice in &parsed.notices {
        tracing::debug!("Row {}: {} {:?}", notice.row, notice.partnumber, notice.kind);
    }

    let json = if config.bom_only {
        serde_json::to_string_pretty(&parsed.bom)?
    } else {
        serde_json::to_string_pretty(&ParseOutput {
            bom: &parsed.bom,
            notices: &parsed.notices,
        })?
    };
    Ok(json + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MemoryGrid;

    fn grid() -> MemoryGrid {
        let header = vec![
            "pytia.project",
            "pytia.machine",
            "Part Number",
            "Revision",
            "Quantity",
            "Source",
            "Definition",
        ];
        let row = vec!["1234", "M", "TMP-1", "A", "1", "Bought", "screw"];
        MemoryGrid::from_text_rows(vec![
            vec!["Recapitulation: TOP"],
            vec![],
            vec![],
            vec![],
            header,
            row,
        ])
    }

    fn config(bom_only: bool) -> ParseConfig {
        ParseConfig {
            export: PathBuf::from("export.xlsx"),
            paths: PathBuf::from("paths.json"),
            run: RunOptions {
                config_file: Some(PathBuf::from("/nonexistent/.cad-bom.yaml")),
                ..RunOptions::default()
            },
            output_file: None,
            bom_only,
            quiet: true,
        }
    }

    #[test]
    fn explicit_config_must_exist() {
        let paths: Paths = [("TOP", "/cad/TOP.CATProduct")].into_iter().collect();
        assert!(render_parse(&config(false), &grid(), &paths).is_err());
    }

    #[test]
    fn output_includes_notices() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("cad-bom.yaml");
        std::fs::write(
            &config_path,
            "bom:\n  header_items:\n    summary: [pytia.project, pytia.machine, $partnumber, $revision, $quantity, $source, $definition]\n",
        )
        .expect("write");
        let mut config = config(false);
        config.run.config_file = Some(config_path);

        let paths: Paths = [("TOP", "/cad/TOP.CATProduct")].into_iter().collect();
        let json = render_parse(&config, &grid(), &paths).expect("render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(value["bom"]["summary"]["items"][0]["partnumber"], "TMP-1");
        assert_eq!(value["notices"][0]["kind"], "missing_path");

        config.bom_only = true;
        let json = render_parse(&config, &grid(), &paths).expect("render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(value["summary"]["partnumber"], "TOP");
    }
}
