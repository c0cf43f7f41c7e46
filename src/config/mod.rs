//! Configuration module for cad-bom-tools.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Per-language keyword tables and `$key` placeholder resolution
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cad_bom_tools::config::file::load_or_default;
//!
//! let (config, loaded_from) = load_or_default(None);
//! let resolved = config.resolve()?;
//! ```
//!
//! # Configuration File
//!
//! Place a `.cad-bom.yaml` file in your project root or `~/.config/cad-bom-tools/`:
//!
//! ```yaml
//! keywords:
//!   language: de
//! bom:
//!   sort:
//!     made: $partnumber
//!     bought: $definition
//! filters:
//!   - name: Number
//!     property_name: $number
//!     criteria: ^\d+$
//!     condition:
//!       $source: $made
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{DEFAULT_LANGUAGE, KEEP_PROJECT_NUMBER};
pub use types::{
    AppConfig, BomConfig, ExportConfig, HeaderItems, KeywordConfig, KeywordElements, PropsConfig,
    RequiredHeaderItems, ResolvedConfig, SortConfig, User, KEYWORD_PREFIX,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.cad-bom.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
