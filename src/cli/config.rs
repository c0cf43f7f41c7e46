//! Config command handlers.
//!
//! Implements the `config` subcommand: print an example file or the JSON Schema,
//! and check a configuration file without running a parse.

use crate::config::{
    discover_config_file, generate_example_config, generate_json_schema, load_config_file,
    Validatable,
};
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Print an example configuration with every default spelled out.
pub fn run_config_example(output_file: Option<PathBuf>) -> Result<()> {
    write_output(
        &generate_example_config(),
        &OutputTarget::from_option(output_file),
        false,
    )
}

/// Print the JSON Schema of the configuration file format.
pub fn run_config_schema(output_file: Option<PathBuf>) -> Result<()> {
    let schema = generate_json_schema().context("Failed to generate schema")?;
    write_output(&(schema + "\n"), &OutputTarget::from_option(output_file), false)
}

/// Validate the explicit or discovered configuration file.
///
/// Returns the exit code: problems are printed to stderr, one per line.
pub fn run_config_validate(explicit_path: Option<&Path>) -> Result<i32> {
    let Some(path) = discover_config_file(explicit_path) else {
        anyhow::bail!("No config file found");
    };
    let config = load_config_file(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;

    let errors = config.validate();
    if errors.is_empty() {
        eprintln!("{}: OK", path.display());
        return Ok(exit_codes::SUCCESS);
    }
    eprintln!("{}: {} problem(s)", path.display(), errors.len());
    for error in &errors {
        eprintln!("  {error}");
    }
    Ok(exit_codes::VALIDATION_FAILED)
}
