//! Configuration validation for cad-bom-tools.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, KeywordConfig, ResolvedConfig};
use std::collections::HashSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.keywords.validate();

        if self.bom.header_items.summary.is_empty() {
            errors.push(ConfigError::new(
                "bom.header_items.summary",
                "At least one header item is required",
            ));
        }

        let mut names = HashSet::new();
        for (i, filter) in self.filters.iter().enumerate() {
            if filter.name.trim().is_empty() {
                errors.push(ConfigError::new(
                    format!("filters[{i}].name"),
                    "Rule name must not be empty",
                ));
            } else if !names.insert(filter.name.as_str()) {
                errors.push(ConfigError::new(
                    format!("filters[{i}].name"),
                    format!("Duplicate rule name '{}'", filter.name),
                ));
            }
        }

        // Layout checks only make sense once placeholders resolve.
        match self.resolve() {
            Ok(resolved) => errors.extend(resolved.validate()),
            Err(e) => errors.push(ConfigError::new("keywords", e.to_string())),
        }

        errors
    }
}

impl Validatable for KeywordConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !self.languages.contains_key(&self.language) {
            errors.push(ConfigError::new(
                "keywords.language",
                format!(
                    "Unknown language '{}'. Valid options: {}",
                    self.language,
                    self.languages
                        .keys()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ));
        }

        for (language, elements) in &self.languages {
            for key in ["partnumber", "source", "bom", "summary"] {
                if elements.get(key).is_some_and(|v| v.trim().is_empty()) {
                    errors.push(ConfigError::new(
                        format!("keywords.languages.{language}.{key}"),
                        "Keyword must not be empty",
                    ));
                }
            }
        }
        errors
    }
}

impl Validatable for ResolvedConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let headers: HashSet<&str> = self.expected_headers().collect();

        let required = &self.required_headers;
        for (field, value) in [
            ("project", &required.project),
            ("machine", &required.machine),
            ("partnumber", &required.partnumber),
            ("revision", &required.revision),
            ("quantity", &required.quantity),
            ("source", &required.source),
        ] {
            if !headers.contains(value.as_str()) {
                errors.push(ConfigError::new(
                    format!("bom.required_header_items.{field}"),
                    format!("'{value}' is not among the summary header items"),
                ));
            }
        }

        if !headers.contains(self.keywords.partnumber.as_str()) {
            errors.push(ConfigError::new(
                "bom.header_items.summary",
                format!(
                    "The part number column '{}' is missing; check the language",
                    self.keywords.partnumber
                ),
            ));
        }

        for (field, value) in [("made", &self.sort.made), ("bought", &self.sort.bought)] {
            if !headers.contains(value.as_str()) {
                errors.push(ConfigError::new(
                    format!("bom.sort.{field}"),
                    format!("Sort key '{value}' is not among the summary header items"),
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        let errors = config.validate();
        assert!(errors.is_empty(), "{errors:?}");
        assert!(config.is_valid());
    }

    #[test]
    fn test_unknown_language() {
        let mut config = AppConfig::default();
        config.keywords.language = "fr".to_string();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "keywords.language"));
    }

    #[test]
    fn test_duplicate_and_empty_rule_names() {
        let mut config = AppConfig::default();
        let first = config.filters[0].clone();
        config.filters.push(first);
        let mut unnamed = config.filters[1].clone();
        unnamed.name = " ".to_string();
        config.filters.push(unnamed);

        let errors = config.validate();
        assert!(errors.iter().any(|e| e.message.contains("Duplicate")));
        assert!(errors.iter().any(|e| e.message.contains("empty")));
    }

    #[test]
    fn test_sort_key_outside_header_items() {
        let mut config = AppConfig::default();
        config.bom.sort.bought = "pytia.supplier".to_string();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "bom.sort.bought"));
    }

    #[test]
    fn test_required_header_outside_header_items() {
        let mut config = AppConfig::default();
        config.bom.header_items.summary.retain(|h| !h.contains("machine"));
        let errors = config.validate();
        assert!(errors
            .iter()
            .any(|e| e.field == "bom.required_header_items.machine"));
    }

    #[test]
    fn test_empty_summary_header_items() {
        let mut config = AppConfig::default();
        config.bom.header_items.summary.clear();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "bom.header_items.summary"));
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::new("keywords.language", "Unknown language");
        assert_eq!(error.to_string(), "keywords.language: Unknown language");
    }
}
