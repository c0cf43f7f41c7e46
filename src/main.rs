//! cad-bom: bill of material reconstruction and validation for CAD exports
//!
//! Reads the flat report export of a CAD product structure, rebuilds the bill of
//! material and checks every item against configurable rules.

#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use cad_bom_tools::{
    cli::{self, CheckConfig, ParseConfig, RunOptions},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cad-bom")]
#[command(version)]
#[command(about = "Bill of material reconstruction and rule validation for CAD exports", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Every item passed every applicable rule
    1  At least one item failed a rule
    2  Error occurred

EXAMPLES:
    # Check an export with the discovered config
    cad-bom check export.xlsx --paths paths.json

    # German CAD UI, stamp the project number, skip temporary parts
    cad-bom check export.xlsx --paths paths.json --language de --project 4711 --ignore-prefix \"TMP;X-\"

    # Machine-readable result
    cad-bom check export.xlsx --paths paths.json -o json -O report.json

    # Inspect the reconstructed bill of material
    cad-bom parse export.xlsx --paths paths.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "CAD_BOM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Inputs and overrides shared by `check` and `parse`
#[derive(Args)]
struct RunArgs {
    /// Path to the tabular export (.xlsx)
    export: PathBuf,

    /// Part number → document path lookup (JSON or YAML)
    #[arg(short, long)]
    paths: PathBuf,

    /// Keyword language of the CAD UI that produced the export
    #[arg(short, long)]
    language: Option<String>,

    /// Project number stamped on every item (KEEP keeps the exported one)
    #[arg(long)]
    project: Option<String>,

    /// Part number prefixes to drop, separated by ';'
    #[arg(long)]
    ignore_prefix: Option<String>,

    /// Drop items whose source is unknown
    #[arg(long)]
    ignore_source_unknown: bool,
}

/// Arguments for the `check` subcommand
#[derive(Args)]
struct CheckArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Workspace definition for %WS: criteria (JSON or YAML)
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Rule to skip for this run (repeatable)
    #[arg(long = "disable-rule", value_name = "NAME")]
    disabled_rules: Vec<String>,

    /// Output format (auto detects TTY: table if interactive, summary otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `parse` subcommand
#[derive(Args)]
struct ParseArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Print the bill of material without the parse notices
    #[arg(long)]
    bom_only: bool,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an export and validate every item against the rules
    Check(CheckArgs),

    /// Parse an export and print the bill of material as JSON
    Parse(ParseArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print, describe, or validate configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print an example .cad-bom.yaml with all defaults
    Example {
        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the JSON Schema of the config file format
    Schema {
        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate the active config file
    Validate,
}

impl RunArgs {
    fn into_options(
        self,
        config_file: Option<PathBuf>,
        workspace: Option<PathBuf>,
        disabled_rules: Vec<String>,
    ) -> (PathBuf, PathBuf, RunOptions) {
        let options = RunOptions {
            config_file,
            language: self.language,
            project: self.project,
            ignore_prefixes: self.ignore_prefix,
            ignore_source_unknown: self.ignore_source_unknown,
            workspace,
            disabled_rules,
        };
        (self.export, self.paths, options)
    }
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for reports
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Check(args) => {
            let (export, paths, run) =
                args.run
                    .into_options(cli.config, args.workspace, args.disabled_rules);
            cli::run_check(CheckConfig {
                export,
                paths,
                run,
                format: args.output,
                output_file: args.output_file,
                no_color: cli.no_color,
                quiet: cli.quiet,
            })
        }

        Commands::Parse(args) => {
            let (export, paths, run) = args.run.into_options(cli.config, None, Vec::new());
            cli::run_parse(ParseConfig {
                export,
                paths,
                run,
                output_file: args.output_file,
                bom_only: args.bom_only,
                quiet: cli.quiet,
            })?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "cad-bom", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Example { output } => {
                cli::run_config_example(output)?;
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Schema { output } => {
                cli::run_config_schema(output)?;
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Validate => cli::run_config_validate(cli.config.as_deref()),
        },
    }
}
