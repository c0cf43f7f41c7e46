//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod check;
mod config;
mod parse;

pub use check::{run_check, CheckConfig};
pub use config::{run_config_example, run_config_schema, run_config_validate};
pub use parse::{run_parse, ParseConfig};

use crate::config::{load_config_file, load_or_default, ResolvedConfig, Validatable};
use crate::parsers::ExclusionPolicy;
use crate::rules::Workspace;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Settings shared by every command that reads an export.
///
/// Each `Some` field overrides the matching value of the configuration file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit configuration file; discovered when absent
    pub config_file: Option<PathBuf>,
    /// Keyword language, e.g. `en` or `de`
    pub language: Option<String>,
    /// Project number to stamp on every item, or `KEEP`
    pub project: Option<String>,
    /// `;`-separated part number prefixes to drop
    pub ignore_prefixes: Option<String>,
    pub ignore_source_unknown: bool,
    /// Workspace definition for `%WS:` criteria
    pub workspace: Option<PathBuf>,
    /// Rules to switch off for this run
    pub disabled_rules: Vec<String>,
}

/// Load, override, validate and resolve the configuration of a run.
pub fn prepare_config(options: &RunOptions) -> Result<ResolvedConfig> {
    let mut config = match &options.config_file {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => {
            let (config, loaded_from) = load_or_default(None);
            match &loaded_from {
                Some(path) => tracing::info!("Using config {}", path.display()),
                None => tracing::debug!("No config file found, using defaults"),
            }
            config
        }
    };

    if let Some(language) = &options.language {
        config.keywords.language.clone_from(language);
    }
    if let Some(project) = &options.project {
        config.export.project_number = Some(project.clone());
    }
    if let Some(prefixes) = &options.ignore_prefixes {
        config.export.ignore_prefixes = ExclusionPolicy::split_prefixes(prefixes);
    }
    config.export.ignore_source_unknown |= options.ignore_source_unknown;
    if let Some(path) = &options.workspace {
        let workspace = Workspace::from_file(path)
            .with_context(|| format!("Failed to load workspace {}", path.display()))?;
        config.workspace = Some(workspace);
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let lines: Vec<String> = errors.iter().map(|e| format!("  {e}")).collect();
        bail!("Invalid configuration:\n{}", lines.join("\n"));
    }

    let mut resolved = config.resolve()?;
    for name in resolved.disable_rules(&options.disabled_rules) {
        tracing::warn!("Cannot disable unknown rule '{name}'");
    }
    Ok(resolved)
}
