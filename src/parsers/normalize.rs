//! Cell normalization.
//!
//! Raw export cells go through a fixed chain of steps before they are stored in an
//! item's properties. Each step is a pure function; [`Normalizer`] binds them to the
//! configuration of one run and applies them in order.

use super::HeaderItem;
use crate::config::ResolvedConfig;
use crate::grid::CellValue;

/// Escape token some exporters write in place of a carriage return.
pub const CARRIAGE_RETURN_ARTIFACT: &str = "_x000D_\n";

/// Replace carriage-return artifacts with plain newlines.
#[must_use]
pub fn strip_carriage_returns(value: Option<String>) -> Option<String> {
    value.map(|v| {
        if v.contains(CARRIAGE_RETURN_ARTIFACT) {
            v.replace(CARRIAGE_RETURN_ARTIFACT, "\n")
        } else {
            v
        }
    })
}

/// Whitespace-only values are empty cells; the exporter writes those as `" "`.
#[must_use]
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Stamp the project number on the project column.
#[must_use]
pub fn override_project(
    header: &str,
    value: Option<String>,
    project_header: &str,
    project_number: Option<&str>,
) -> Option<String> {
    match project_number {
        Some(number) if header == project_header => Some(number.to_string()),
        _ => value,
    }
}

/// Replace a logon with the user's display name on identity columns.
///
/// `lookup` maps a logon to a display name; unknown logons are kept.
#[must_use]
pub fn translate_username<F>(
    header: &str,
    value: Option<String>,
    identity_headers: &[&str],
    lookup: F,
) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if !identity_headers.contains(&header) {
        return value;
    }
    value.map(|logon| lookup(&logon).unwrap_or(logon))
}

/// Constant columns always carry their configured text.
#[must_use]
pub fn apply_fixed_text(
    header: &str,
    value: Option<String>,
    header_items: &[HeaderItem],
) -> Option<String> {
    header_items
        .iter()
        .find(|item| item.property == header)
        .and_then(|item| item.fixed_text.clone())
        .or(value)
}

/// The normalization chain configured for one parse.
#[derive(Debug, Clone)]
pub struct Normalizer<'a> {
    project_header: &'a str,
    project_number: Option<&'a str>,
    identity_headers: Vec<&'a str>,
    config: &'a ResolvedConfig,
    header_items: &'a [HeaderItem],
}

impl<'a> Normalizer<'a> {
    /// Bind the chain to a resolved configuration.
    ///
    /// `project_number` stamps every project cell; `None` keeps the exported value.
    #[must_use]
    pub fn new(config: &'a ResolvedConfig, project_number: Option<&'a str>) -> Self {
        let identity_headers = if config.export.apply_username_in_bom {
            vec![config.props.creator.as_str(), config.props.modifier.as_str()]
        } else {
            Vec::new()
        };

        Self {
            project_header: &config.required_headers.project,
            project_number,
            identity_headers,
            config,
            header_items: &config.header_items,
        }
    }

    /// Normalize the raw cell of column `header`.
    #[must_use]
    pub fn normalize(&self, header: &str, raw: Option<&CellValue>) -> Option<String> {
        self.normalize_text(header, raw.map(CellValue::to_text))
    }

    /// Normalize an already stringified cell.
    #[must_use]
    pub fn normalize_text(&self, header: &str, value: Option<String>) -> Option<String> {
        let value = strip_carriage_returns(value);
        let value = blank_to_none(value);
        let value = override_project(header, value, self.project_header, self.project_number);
        let value = translate_username(header, value, &self.identity_headers, |logon| {
            self.config.user_name(logon).map(str::to_string)
        });
        apply_fixed_text(header, value, self.header_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, User};

    fn user(logon: &str, name: &str) -> User {
        User {
            logon: logon.to_string(),
            id: String::new(),
            name: name.to_string(),
            mail: String::new(),
        }
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn carriage_return_artifact_becomes_newline() {
        assert_eq!(
            strip_carriage_returns(some("line 1_x000D_\nline 2")),
            some("line 1\nline 2")
        );
        assert_eq!(strip_carriage_returns(some("_x000D_")), some("_x000D_"));
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(blank_to_none(some(" ")), None);
        assert_eq!(blank_to_none(some("\t\n")), None);
        assert_eq!(blank_to_none(some(" a ")), some(" a "));
        assert_eq!(blank_to_none(None), None);
    }

    #[test]
    fn artifact_then_blank_is_empty() {
        let value = blank_to_none(strip_carriage_returns(some("_x000D_\n")));
        assert_eq!(value, None);
    }

    #[test]
    fn project_override_only_hits_project_column() {
        assert_eq!(
            override_project("Project", some("1111"), "Project", Some("2222")),
            some("2222")
        );
        assert_eq!(
            override_project("Project", None, "Project", Some("2222")),
            some("2222")
        );
        assert_eq!(
            override_project("Machine", some("M"), "Project", Some("2222")),
            some("M")
        );
        assert_eq!(
            override_project("Project", some("1111"), "Project", None),
            some("1111")
        );
    }

    #[test]
    fn username_translation() {
        let lookup = |logon: &str| (logon == "jdoe").then(|| "Jane Doe".to_string());
        let identity = ["Creator", "Modifier"];
        assert_eq!(
            translate_username("Creator", some("jdoe"), &identity, lookup),
            some("Jane Doe")
        );
        assert_eq!(
            translate_username("Creator", some("xyz"), &identity, lookup),
            some("xyz")
        );
        assert_eq!(
            translate_username("Machine", some("jdoe"), &identity, lookup),
            some("jdoe")
        );
        assert_eq!(translate_username("Creator", None, &identity, lookup), None);
    }

    #[test]
    fn fixed_text_replaces_any_value() {
        let items = [HeaderItem::parse("Material=Steel"), HeaderItem::parse("Mass")];
        assert_eq!(apply_fixed_text("Material", None, &items), some("Steel"));
        assert_eq!(apply_fixed_text("Material", some("Alu"), &items), some("Steel"));
        assert_eq!(apply_fixed_text("Mass", some("3"), &items), some("3"));
    }

    #[test]
    fn chain_with_defaults() {
        let mut config = AppConfig::default();
        config.export.apply_username_in_bom = true;
        config.users.push(user("jdoe", "Jane Doe"));
        let resolved = config.resolve().expect("resolve");

        let normalizer = Normalizer::new(&resolved, Some("4711"));
        assert_eq!(
            normalizer.normalize("pytia.creator", Some(&CellValue::from("jdoe"))),
            some("Jane Doe")
        );
        assert_eq!(
            normalizer.normalize("pytia.project", Some(&CellValue::from(" "))),
            some("4711")
        );
        assert_eq!(
            normalizer.normalize("Quantity", Some(&CellValue::Float(2.0))),
            some("2")
        );
        assert_eq!(normalizer.normalize("Quantity", None), None);
    }

    #[test]
    fn translation_disabled_by_default() {
        let mut config = AppConfig::default();
        config.users.push(user("jdoe", "Jane Doe"));
        let resolved = config.resolve().expect("resolve");
        let normalizer = Normalizer::new(&resolved, None);
        assert_eq!(
            normalizer.normalize("pytia.creator", Some(&CellValue::from("jdoe"))),
            some("jdoe")
        );
    }
}
