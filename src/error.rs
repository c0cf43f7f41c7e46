//! Unified error types for cad-bom-tools.
//!
//! Every fatal condition of a parse or validation run surfaces as a [`BomError`].
//! The kinds carry the row, header or rule that caused them so a failed run can be
//! diagnosed from the message alone. Recoverable data-quality conditions never
//! become errors; they are logged and recorded as notices or `SKIPPED` verdicts.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cad-bom-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BomError {
    /// The export layout does not match the configured contract
    #[error("Failed to parse bill of material: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// The rule configuration does not match the parsed bill of material
    #[error("Rule evaluation failed: {context}")]
    Rule {
        context: String,
        #[source]
        source: RuleErrorKind,
    },

    /// The spreadsheet could not be read into a grid
    #[error("Failed to read grid: {context}")]
    Grid {
        context: String,
        #[source]
        source: GridErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Fatal errors raised by the header locator and the block parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Header item '{header}' not found in header row {row}")]
    MissingHeader { header: String, row: usize },

    #[error("Required header item '{header}' not found in header row {row}")]
    MissingRequiredHeader { header: String, row: usize },

    #[error(
        "Part number key '{key}' missing from data row {row}; check the language setting \
         and the header items"
    )]
    MissingPartNumberKey { key: String, row: usize },

    #[error("Part number '{key}' is empty in data row {row}")]
    EmptyPartNumberValue { key: String, row: usize },

    #[error("No path known for block '{name}' opened at row {row}")]
    UnresolvedAssemblyPath { name: String, row: usize },

    #[error("Export contains no summary block")]
    MissingSummaryBlock,

    #[error("Second summary block '{name}' at row {row}")]
    DuplicateSummaryBlock { name: String, row: usize },
}

/// Fatal errors raised by the rule engine and the filter configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleErrorKind {
    #[error("Rule '{rule}' targets property '{property}' which is not in the bill of material")]
    UnknownProperty { rule: String, property: String },

    #[error("Condition key '{key}' of rule '{rule}' is not in the bill of material")]
    ConditionKey { rule: String, key: String },

    #[error("Rule name '{rule}' is used by more than one enabled rule")]
    DuplicateRule { rule: String },

    #[error("Condition must be a boolean or a mapping, found {found}")]
    InvalidConditionType { found: String },

    #[error("Criteria '{pattern}' of rule '{rule}' is not a valid regular expression: {message}")]
    InvalidCriteria {
        rule: String,
        pattern: String,
        message: String,
    },
}

/// Errors raised while loading a spreadsheet export.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GridErrorKind {
    #[error("Unsupported spreadsheet extension: {0}")]
    UnsupportedFormat(String),

    #[error("Workbook has no worksheet")]
    NoWorksheet,

    #[error("Workbook error: {0}")]
    Workbook(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for cad-bom-tools operations
pub type Result<T> = std::result::Result<T, BomError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl BomError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a rule error with context
    pub fn rule(context: impl Into<String>, source: RuleErrorKind) -> Self {
        Self::Rule {
            context: context.into(),
            source,
        }
    }

    /// Create a grid error with context
    pub fn grid(context: impl Into<String>, source: GridErrorKind) -> Self {
        Self::Grid {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The parse error kind, if this is a parse error
    #[must_use]
    pub const fn parse_kind(&self) -> Option<&ParseErrorKind> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The rule error kind, if this is a rule error
    #[must_use]
    pub const fn rule_kind(&self) -> Option<&RuleErrorKind> {
        match self {
            Self::Rule { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for BomError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for BomError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON deserialization: {err}"))
    }
}

impl From<serde_yaml::Error> for BomError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(format!("YAML deserialization: {err}"))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context, creating a
/// chain that shows the path through the code:
///
/// ```ignore
/// use cad_bom_tools::error::ErrorContext;
///
/// parser.parse(&grid).with_context(|| format!("parsing {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<BomError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: BomError, new_ctx: &str) -> BomError {
    match err {
        BomError::Parse {
            context: existing,
            source,
        } => BomError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        BomError::Rule {
            context: existing,
            source,
        } => BomError::Rule {
            context: chain_context(new_ctx, &existing),
            source,
        },
        BomError::Grid {
            context: existing,
            source,
        } => BomError::Grid {
            context: chain_context(new_ctx, &existing),
            source,
        },
        BomError::Io {
            path,
            message,
            source,
        } => BomError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        BomError::Config(msg) => BomError::Config(chain_context(new_ctx, &msg)),
        BomError::Validation(msg) => BomError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_header_and_row() {
        let err = BomError::parse(
            "block 'Bracket'",
            ParseErrorKind::MissingRequiredHeader {
                header: "Source".to_string(),
                row: 2,
            },
        );
        assert!(err.to_string().contains("Bracket"));

        let source = std::error::Error::source(&err).expect("kind is the source");
        let display = source.to_string();
        assert!(display.contains("Source"), "{display}");
        assert!(display.contains("row 2"), "{display}");
    }

    #[test]
    fn test_rule_error_names_rule() {
        let kind = RuleErrorKind::UnknownProperty {
            rule: "number format".to_string(),
            property: "Number".to_string(),
        };
        assert!(kind.to_string().contains("number format"));
        assert!(kind.to_string().contains("Number"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = BomError::io("/exports/bom.xlsx", io_err);

        assert!(err.to_string().contains("/exports/bom.xlsx"));
    }

    #[test]
    fn test_context_chaining() {
        fn inner() -> Result<()> {
            Err(BomError::parse("base", ParseErrorKind::MissingSummaryBlock))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(BomError::Parse { context, source }) => {
                assert_eq!(context, "outer layer: middle layer: base");
                assert_eq!(source, ParseErrorKind::MissingSummaryBlock);
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(BomError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_kind_accessors() {
        let err = BomError::rule(
            "rule engine",
            RuleErrorKind::InvalidConditionType {
                found: "number".to_string(),
            },
        );
        assert!(err.parse_kind().is_none());
        assert!(matches!(
            err.rule_kind(),
            Some(RuleErrorKind::InvalidConditionType { .. })
        ));
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
