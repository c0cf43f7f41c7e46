//! **Bill of material reconstruction and rule validation for CAD report exports.**
//!
//! CAD systems export a product structure as one flat sheet: a block per
//! sub-assembly, each with a title row, a header row and one row per child, followed
//! by a summary block of the whole product. `cad-bom-tools` turns that sheet back
//! into a tree and checks every item against configurable rules before the
//! bill of material is released.
//!
//! ## Core Concepts & Modules
//!
//! - **[`grid`]**: The [`Grid`] trait the parser reads through, an in-memory grid and
//!   (with the `xlsx` feature) a workbook loader.
//! - **[`parsers`]**: The [`BlockParser`] state machine, with header location, cell
//!   normalization and item exclusion.
//! - **[`model`]**: [`Bom`], its assemblies and items, and the validation [`Report`].
//! - **[`rules`]**: The [`RuleEngine`] and its [`FilterElement`] rules.
//! - **[`config`]**: [`AppConfig`], per-language keyword tables and `$key`
//!   placeholder resolution.
//! - **[`pipeline`]**: Load → parse → sort → validate → report, shared by the CLI.
//! - **[`reports`]**: JSON, summary and table renderers of a report.
//!
//! ## Getting Started
//!
//! ```no_run
//! use cad_bom_tools::config::AppConfig;
//! use cad_bom_tools::parsers::ParseOptions;
//! use cad_bom_tools::pipeline::{load_grid, load_paths, process_bom, validate_bom};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default().resolve()?;
//!     let grid = load_grid(Path::new("export.xlsx"))?;
//!     let paths = load_paths(Path::new("paths.json"))?;
//!
//!     let options = ParseOptions::from_export(&config.export);
//!     let parsed = process_bom(&config, &grid, &paths, &options)?;
//!     let report = validate_bom(&config, &parsed.bom)?;
//!
//!     for item in report.failed_items() {
//!         println!("{} in {}:", item.partnumber, item.parent_partnumber);
//!         for rule in item.failed_rules() {
//!             println!("  {rule}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `xlsx` (default): Read workbook exports through `calamine`. Without it, only
//!   in-memory grids can be parsed.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_excessive_bools
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod rules;

// Re-export main types for convenience
pub use config::{AppConfig, ConfigError, ResolvedConfig, Validatable};
pub use error::{BomError, ErrorContext, Result};
pub use grid::{CellValue, Grid, MemoryGrid};
pub use model::{Bom, BomAssembly, BomAssemblyItem, Paths, Report, ReportItem, Source, Status};
pub use parsers::{BlockParser, ParseOptions, ParsedBom};
pub use reports::{ReportFormat, ReportGenerator};
pub use rules::{Condition, FilterElement, RuleEngine, Workspace};
