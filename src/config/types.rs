//! Configuration types for cad-bom-tools.
//!
//! [`AppConfig`] is what a config file holds. Names written as `$key` are
//! placeholders for the CAD system's language-dependent keywords; they are replaced
//! once by [`AppConfig::resolve`], which produces the [`ResolvedConfig`] bundle the
//! parser and the rule engine consume.

use crate::error::{BomError, Result};
use crate::model::Source;
use crate::parsers::HeaderItem;
use crate::rules::{Condition, FilterElement, Workspace};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Prefix marking a keyword placeholder.
pub const KEYWORD_PREFIX: char = '$';

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from config files.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// CAD UI language and its keyword tables
    pub keywords: KeywordConfig,
    /// Expected layout of the export
    pub bom: BomConfig,
    /// Identity columns for username translation
    pub props: PropsConfig,
    /// Export behaviour switches
    pub export: ExportConfig,
    /// Validation rules, evaluated in order
    pub filters: Vec<FilterElement>,
    /// User directory for username translation
    pub users: Vec<User>,
    /// Workspace values referenced by `%WS:` criteria
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Workspace>,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The keyword table of the selected language.
    pub fn keyword_elements(&self) -> Result<&KeywordElements> {
        self.keywords
            .languages
            .get(&self.keywords.language)
            .ok_or_else(|| {
                BomError::config(format!(
                    "unknown language '{}' (available: {})",
                    self.keywords.language,
                    self.keywords
                        .languages
                        .keys()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }

    /// Replace every `$key` placeholder with the selected language's keyword.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let keywords = self.keyword_elements()?.clone();
        let resolver = KeywordResolver::new(&keywords);

        let header_items = self
            .bom
            .header_items
            .summary
            .iter()
            .map(|item| resolver.header_item(item).map(|s| HeaderItem::parse(&s)))
            .collect::<Result<Vec<_>>>()?;

        let required = &self.bom.required_header_items;
        let required_headers = RequiredHeaderItems {
            project: resolver.word(&required.project)?,
            machine: resolver.word(&required.machine)?,
            partnumber: resolver.word(&required.partnumber)?,
            revision: resolver.word(&required.revision)?,
            quantity: resolver.word(&required.quantity)?,
            source: resolver.word(&required.source)?,
        };

        let sort = SortConfig {
            made: resolver.word(&self.bom.sort.made)?,
            bought: resolver.word(&self.bom.sort.bought)?,
        };

        let props = PropsConfig {
            creator: resolver.word(&self.props.creator)?,
            modifier: resolver.word(&self.props.modifier)?,
        };

        let filters = self
            .filters
            .iter()
            .map(|filter| resolver.filter(filter))
            .collect::<Result<Vec<_>>>()?;

        Ok(ResolvedConfig {
            language: self.keywords.language.clone(),
            keywords,
            header_items,
            required_headers,
            sort,
            props,
            export: self.export.clone(),
            filters,
            users: self.users.clone(),
            workspace: self.workspace.clone().unwrap_or_default(),
        })
    }
}

/// Applies one keyword table to configuration strings.
struct KeywordResolver<'a> {
    keywords: &'a KeywordElements,
}

impl<'a> KeywordResolver<'a> {
    const fn new(keywords: &'a KeywordElements) -> Self {
        Self { keywords }
    }

    /// Resolve a bare name: `$partnumber` becomes e.g. `Part Number`.
    fn word(&self, word: &str) -> Result<String> {
        match word.strip_prefix(KEYWORD_PREFIX) {
            Some(key) => self
                .keywords
                .get(key)
                .map(str::to_string)
                .ok_or_else(|| BomError::config(format!("unknown keyword '{word}'"))),
            None => Ok(word.to_string()),
        }
    }

    /// Resolve the property part of a header item, keeping label and fixed text.
    fn header_item(&self, item: &str) -> Result<String> {
        if let Some((label, property)) = item.rsplit_once(':') {
            return Ok(format!("{label}:{}", self.word(property)?));
        }
        if let Some((property, text)) = item.split_once('=') {
            return Ok(format!("{}={text}", self.word(property)?));
        }
        self.word(item)
    }

    fn filter(&self, filter: &FilterElement) -> Result<FilterElement> {
        let condition = match &filter.condition {
            Condition::AlwaysApplies(applies) => Condition::AlwaysApplies(*applies),
            Condition::PropertyEquals(pairs) => Condition::PropertyEquals(
                pairs
                    .iter()
                    .map(|(key, value)| Ok((self.word(key)?, self.word(value)?)))
                    .collect::<Result<IndexMap<_, _>>>()?,
            ),
        };

        Ok(FilterElement {
            property_name: self.word(&filter.property_name)?,
            condition,
            ..filter.clone()
        })
    }
}

// ============================================================================
// Keywords
// ============================================================================

/// Keyword tables per CAD UI language.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct KeywordConfig {
    /// Language of the CAD UI that produced the export
    pub language: String,
    /// Language code → keyword table
    pub languages: IndexMap<String, KeywordElements>,
}

/// The language-dependent names the CAD system uses in its exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordElements {
    pub partnumber: String,
    pub revision: String,
    pub definition: String,
    pub nomenclature: String,
    pub source: String,
    pub made: String,
    pub bought: String,
    pub unknown: String,
    pub description: String,
    pub number: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub part: String,
    pub assembly: String,
    pub quantity: String,
    /// Title keyword of a sub-assembly block
    pub bom: String,
    /// Title keyword of the summary block
    pub summary: String,
}

impl KeywordElements {
    /// Look up a keyword by its placeholder name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "partnumber" => &self.partnumber,
            "revision" => &self.revision,
            "definition" => &self.definition,
            "nomenclature" => &self.nomenclature,
            "source" => &self.source,
            "made" => &self.made,
            "bought" => &self.bought,
            "unknown" => &self.unknown,
            "description" => &self.description,
            "number" => &self.number,
            "type" => &self.kind,
            "part" => &self.part,
            "assembly" => &self.assembly,
            "quantity" => &self.quantity,
            "bom" => &self.bom,
            "summary" => &self.summary,
            _ => return None,
        };
        Some(value)
    }

    /// Classify the raw value of the source column.
    #[must_use]
    pub fn classify_source(&self, raw: Option<&str>) -> Source {
        match raw {
            None => Source::Unset,
            Some(token) if token == self.made => Source::Made,
            Some(token) if token == self.bought => Source::Bought,
            Some(token) if token == self.unknown => Source::Unknown,
            Some(token) => Source::Other(token.to_string()),
        }
    }
}

// ============================================================================
// Export layout
// ============================================================================

/// Expected layout of the bill of material export.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BomConfig {
    pub header_items: HeaderItems,
    pub required_header_items: RequiredHeaderItems,
    pub sort: SortConfig,
}

/// Header item lists.
///
/// Each entry is `PROPERTY`, `Label:PROPERTY` or `PROPERTY=fixed text`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HeaderItems {
    /// Columns the export must contain; drives parsing
    pub summary: Vec<String>,
    /// Column selection for the made-parts sheet of a formatted workbook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub made: Option<Vec<String>>,
    /// Column selection for the bought-parts sheet of a formatted workbook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bought: Option<Vec<String>>,
}

/// Headers every export must carry, whatever the configured header items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RequiredHeaderItems {
    pub project: String,
    pub machine: String,
    pub partnumber: String,
    pub revision: String,
    pub quantity: String,
    pub source: String,
}

impl RequiredHeaderItems {
    /// All required header names, in declaration order.
    #[must_use]
    pub fn values(&self) -> [&str; 6] {
        [
            self.project.as_str(),
            self.machine.as_str(),
            self.partnumber.as_str(),
            self.revision.as_str(),
            self.quantity.as_str(),
            self.source.as_str(),
        ]
    }
}

/// Sort keys applied after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SortConfig {
    /// Property that orders made items
    pub made: String,
    /// Property that orders bought items
    pub bought: String,
}

/// Identity columns whose logon values may be replaced by display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PropsConfig {
    pub creator: String,
    pub modifier: String,
}

/// Export behaviour switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExportConfig {
    /// Replace creator/modifier logons with the user's name
    pub apply_username_in_bom: bool,
    /// Drop items whose source is the `unknown` keyword
    pub ignore_source_unknown: bool,
    /// Drop items whose part number starts with any of these
    pub ignore_prefixes: Vec<String>,
    /// Stamp this project number on every item; absent keeps the exported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_number: Option<String>,
}

impl ExportConfig {
    /// The project number to stamp, with the `KEEP` token read as no override.
    #[must_use]
    pub fn project_override(&self) -> Option<&str> {
        self.project_number
            .as_deref()
            .filter(|number| *number != super::KEEP_PROJECT_NUMBER)
    }
}

/// One entry of the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct User {
    pub logon: String,
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mail: String,
}

// ============================================================================
// Resolved configuration
// ============================================================================

/// Configuration with every keyword placeholder applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub language: String,
    pub keywords: KeywordElements,
    /// Parsed summary header items
    pub header_items: Vec<HeaderItem>,
    pub required_headers: RequiredHeaderItems,
    pub sort: SortConfig,
    pub props: PropsConfig,
    pub export: ExportConfig,
    pub filters: Vec<FilterElement>,
    pub users: Vec<User>,
    pub workspace: Workspace,
}

impl ResolvedConfig {
    /// Column names the export must contain.
    pub fn expected_headers(&self) -> impl Iterator<Item = &str> {
        self.header_items.iter().map(|item| item.property.as_str())
    }

    /// The display name of a user, looked up by logon.
    #[must_use]
    pub fn user_name(&self, logon: &str) -> Option<&str> {
        self.users
            .iter()
            .find(|user| user.logon == logon)
            .map(|user| user.name.as_str())
    }

    /// Disable rules by name. Returns the names that matched no rule.
    pub fn disable_rules<'n>(&mut self, names: &'n [String]) -> Vec<&'n str> {
        let mut unmatched = Vec::new();
        for name in names {
            let mut found = false;
            for filter in self.filters.iter_mut().filter(|f| &f.name == name) {
                filter.enabled = false;
                found = true;
            }
            if !found {
                unmatched.push(name.as_str());
            }
        }
        unmatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resolves_in_every_language() {
        let mut config = AppConfig::default();
        for language in ["en", "de"] {
            config.keywords.language = language.to_string();
            let resolved = config.resolve().expect("defaults resolve");
            assert!(!resolved
                .expected_headers()
                .any(|h| h.starts_with(KEYWORD_PREFIX)));
        }
    }

    #[test]
    fn placeholders_follow_language() {
        let mut config = AppConfig::default();
        config.keywords.language = "de".to_string();
        let resolved = config.resolve().expect("resolve");
        assert_eq!(resolved.required_headers.partnumber, "Teilenummer");
        assert_eq!(resolved.keywords.bom, "Stückliste");
    }

    #[test]
    fn header_item_keeps_label_and_fixed_text() {
        let keywords = KeywordElements::english();
        let resolver = KeywordResolver::new(&keywords);
        assert_eq!(
            resolver.header_item("PN:$partnumber").expect("label"),
            "PN:Part Number"
        );
        assert_eq!(
            resolver.header_item("$definition=n/a").expect("fixed"),
            "Definition=n/a"
        );
        assert_eq!(resolver.header_item("Mass").expect("plain"), "Mass");
    }

    #[test]
    fn filter_condition_is_resolved() {
        let mut config = AppConfig::default();
        config.filters = vec![FilterElement::new(
            "made parts",
            "$definition",
            ".+",
            Condition::property_equals([("$source", "$made")]),
        )];
        let resolved = config.resolve().expect("resolve");
        let filter = &resolved.filters[0];
        assert_eq!(filter.property_name, "Definition");
        assert_eq!(
            filter.condition,
            Condition::property_equals([("Source", "Made")])
        );
    }

    #[test]
    fn unknown_placeholder_is_a_config_error() {
        let mut config = AppConfig::default();
        config.bom.sort.made = "$weight".to_string();
        let err = config.resolve().expect_err("no such keyword");
        assert!(matches!(err, BomError::Config(ref msg) if msg.contains("$weight")));
    }

    #[test]
    fn unknown_language_is_a_config_error() {
        let mut config = AppConfig::default();
        config.keywords.language = "fr".to_string();
        let err = config.resolve().expect_err("no french table");
        assert!(err.to_string().contains("fr"));
    }

    #[test]
    fn classify_source_tokens() {
        let keywords = KeywordElements::english();
        assert_eq!(keywords.classify_source(Some("Made")), Source::Made);
        assert_eq!(keywords.classify_source(Some("Bought")), Source::Bought);
        assert_eq!(keywords.classify_source(Some("Unknown")), Source::Unknown);
        assert_eq!(
            keywords.classify_source(Some("made")),
            Source::Other("made".to_string())
        );
        assert_eq!(keywords.classify_source(None), Source::Unset);
    }

    #[test]
    fn disable_rules_reports_unmatched_names() {
        let mut resolved = AppConfig::default().resolve().expect("resolve");
        let first = resolved.filters[0].name.clone();
        let names = vec![first.clone(), "nope".to_string()];
        let unmatched = resolved.disable_rules(&names);
        assert_eq!(unmatched, vec!["nope"]);
        assert!(!resolved.filters[0].enabled);
    }

    #[test]
    fn user_name_by_logon() {
        let mut resolved = AppConfig::default().resolve().expect("resolve");
        resolved.users.push(User {
            logon: "jdoe".to_string(),
            id: "042".to_string(),
            name: "Jane Doe".to_string(),
            mail: String::new(),
        });
        assert_eq!(resolved.user_name("jdoe"), Some("Jane Doe"));
        assert_eq!(resolved.user_name("Jane Doe"), None);
    }

    #[test]
    fn keep_token_means_no_project_override() {
        let mut export = ExportConfig::default();
        assert_eq!(export.project_override(), None);
        export.project_number = Some("KEEP".to_string());
        assert_eq!(export.project_override(), None);
        export.project_number = Some("4711".to_string());
        assert_eq!(export.project_override(), Some("4711"));
    }
}
