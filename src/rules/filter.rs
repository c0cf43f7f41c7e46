//! Filter rule definitions.

use crate::error::RuleErrorKind;
use crate::model::BomAssemblyItem;
use indexmap::IndexMap;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::Workspace;

/// Criteria prefix that compares against a workspace value instead of a pattern.
pub const WORKSPACE_PREFIX: &str = "%WS:";

/// One validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterElement {
    /// Rule name; the key of the verdict in a report item
    pub name: String,
    /// Property the criteria is checked against
    pub property_name: String,
    /// Regular expression, or `%WS:<key>` for a workspace value
    pub criteria: String,
    /// When the rule applies: `true`/`false`, or property → expected value
    #[serde(default)]
    #[schemars(with = "serde_json::Value")]
    pub condition: Condition,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl FilterElement {
    pub fn new(
        name: impl Into<String>,
        property_name: impl Into<String>,
        criteria: impl Into<String>,
        condition: Condition,
    ) -> Self {
        Self {
            name: name.into(),
            property_name: property_name.into(),
            criteria: criteria.into(),
            condition,
            description: String::new(),
            enabled: true,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style toggle of the enabled flag.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Applicability gate of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum Condition {
    /// Applies to every item, or to none
    AlwaysApplies(bool),
    /// Applies when every listed property equals its expected value;
    /// an empty mapping always applies
    PropertyEquals(IndexMap<String, String>),
}

impl Condition {
    /// Convenience constructor for mapping conditions.
    pub fn property_equals<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::PropertyEquals(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Whether the rule applies to `item`.
    ///
    /// A condition key the item does not carry is a configuration error, not a
    /// mismatch.
    pub fn applies_to(&self, rule: &str, item: &BomAssemblyItem) -> Result<bool, RuleErrorKind> {
        match self {
            Self::AlwaysApplies(applies) => Ok(*applies),
            Self::PropertyEquals(expected) => {
                let mut applies = true;
                for (key, value) in expected {
                    if !item.has_property(key) {
                        return Err(RuleErrorKind::ConditionKey {
                            rule: rule.to_string(),
                            key: key.clone(),
                        });
                    }
                    if item.property(key) != Some(value.as_str()) {
                        applies = false;
                    }
                }
                Ok(applies)
            }
        }
    }
}

impl Default for Condition {
    fn default() -> Self {
        Self::AlwaysApplies(true)
    }
}

impl TryFrom<Value> for Condition {
    type Error = RuleErrorKind;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(applies) => Ok(Self::AlwaysApplies(applies)),
            Value::Object(map) => map
                .into_iter()
                .map(|(key, expected)| match expected {
                    Value::String(s) => Ok((key, s)),
                    Value::Number(n) => Ok((key, n.to_string())),
                    Value::Bool(b) => Ok((key, b.to_string())),
                    other => Err(RuleErrorKind::InvalidConditionType {
                        found: format!("{} for condition key '{key}'", value_kind(&other)),
                    }),
                })
                .collect::<Result<IndexMap<_, _>, _>>()
                .map(Self::PropertyEquals),
            other => Err(RuleErrorKind::InvalidConditionType {
                found: value_kind(&other).to_string(),
            }),
        }
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::AlwaysApplies(applies) => serializer.serialize_bool(*applies),
            Self::PropertyEquals(map) => map.serialize(serializer),
        }
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// Compiled pass criteria of a rule.
#[derive(Debug, Clone)]
pub enum Criteria {
    /// Regular expression anchored at the start of the value
    Pattern(Regex),
    /// Exact match against a workspace value
    Workspace(String),
}

impl Criteria {
    /// Compile the raw criteria string of `rule`.
    pub fn compile(rule: &str, raw: &str) -> Result<Self, RuleErrorKind> {
        if let Some(key) = raw.strip_prefix(WORKSPACE_PREFIX) {
            return Ok(Self::Workspace(key.to_string()));
        }
        Regex::new(&format!("^(?:{raw})"))
            .map(Self::Pattern)
            .map_err(|e| RuleErrorKind::InvalidCriteria {
                rule: rule.to_string(),
                pattern: raw.to_string(),
                message: e.to_string(),
            })
    }

    /// Whether `value` satisfies the criteria.
    #[must_use]
    pub fn is_satisfied_by(&self, value: &str, workspace: &Workspace) -> bool {
        match self {
            Self::Pattern(re) => re.is_match(value),
            Self::Workspace(key) => workspace.get(key) == Some(value),
        }
    }
}
