//! Default configuration values.
//!
//! The defaults describe an export of the standard report with the property set
//! maintained by the company property manager (`pytia.*` user properties).

use super::types::{
    AppConfig, BomConfig, ExportConfig, HeaderItems, KeywordConfig, KeywordElements, PropsConfig,
    RequiredHeaderItems, SortConfig,
};
use crate::rules::{Condition, FilterElement};
use indexmap::IndexMap;

/// Language selected when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// CLI token that keeps the exported project numbers.
pub const KEEP_PROJECT_NUMBER: &str = "KEEP";

/// Summary header items of the standard export.
const DEFAULT_SUMMARY_HEADER_ITEMS: &[&str] = &[
    "Project:pytia.project",
    "Machine:pytia.machine",
    "$number",
    "$partnumber",
    "$revision",
    "$definition",
    "$nomenclature",
    "$source",
    "$quantity",
    "Material:pytia.material",
    "Creator:pytia.creator",
    "Modifier:pytia.modifier",
];

impl KeywordElements {
    /// Keywords of an English CAD UI.
    #[must_use]
    pub fn english() -> Self {
        Self {
            partnumber: "Part Number".to_string(),
            revision: "Revision".to_string(),
            definition: "Definition".to_string(),
            nomenclature: "Nomenclature".to_string(),
            source: "Source".to_string(),
            made: "Made".to_string(),
            bought: "Bought".to_string(),
            unknown: "Unknown".to_string(),
            description: "Product Description".to_string(),
            number: "Number".to_string(),
            kind: "Type".to_string(),
            part: "Part".to_string(),
            assembly: "Assembly".to_string(),
            quantity: "Quantity".to_string(),
            bom: "Bill of Material".to_string(),
            summary: "Recapitulation".to_string(),
        }
    }

    /// Keywords of a German CAD UI.
    #[must_use]
    pub fn german() -> Self {
        Self {
            partnumber: "Teilenummer".to_string(),
            revision: "Revision".to_string(),
            definition: "Definition".to_string(),
            nomenclature: "Nomenklatur".to_string(),
            source: "Quelle".to_string(),
            made: "Hergestellt".to_string(),
            bought: "Gekauft".to_string(),
            unknown: "Unbekannt".to_string(),
            description: "Produktbeschreibung".to_string(),
            number: "Nummer".to_string(),
            kind: "Typ".to_string(),
            part: "Teil".to_string(),
            assembly: "Baugruppe".to_string(),
            quantity: "Menge".to_string(),
            bom: "Stückliste".to_string(),
            summary: "Rekapitulation".to_string(),
        }
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        let mut languages = IndexMap::new();
        languages.insert("en".to_string(), KeywordElements::english());
        languages.insert("de".to_string(), KeywordElements::german());
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            languages,
        }
    }
}

impl Default for HeaderItems {
    fn default() -> Self {
        Self {
            summary: DEFAULT_SUMMARY_HEADER_ITEMS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            made: None,
            bought: None,
        }
    }
}

impl Default for RequiredHeaderItems {
    fn default() -> Self {
        Self {
            project: "pytia.project".to_string(),
            machine: "pytia.machine".to_string(),
            partnumber: "$partnumber".to_string(),
            revision: "$revision".to_string(),
            quantity: "$quantity".to_string(),
            source: "$source".to_string(),
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            made: "$partnumber".to_string(),
            bought: "$definition".to_string(),
        }
    }
}

impl Default for PropsConfig {
    fn default() -> Self {
        Self {
            creator: "pytia.creator".to_string(),
            modifier: "pytia.modifier".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            keywords: KeywordConfig::default(),
            bom: BomConfig::default(),
            props: PropsConfig::default(),
            export: ExportConfig::default(),
            filters: default_filters(),
            users: Vec::new(),
            workspace: None,
        }
    }
}

/// The rule set shipped with the tool.
fn default_filters() -> Vec<FilterElement> {
    vec![
        FilterElement::new(
            "Project number",
            "pytia.project",
            r"\d{4,}$",
            Condition::AlwaysApplies(true),
        )
        .with_description("The project number must consist of at least four digits."),
        FilterElement::new(
            "Revision",
            "$revision",
            r"\S+",
            Condition::AlwaysApplies(true),
        )
        .with_description("Every item needs a revision."),
        FilterElement::new(
            "Definition of made parts",
            "$definition",
            r"\S+",
            Condition::property_equals([("$source", "$made")]),
        )
        .with_description("Made parts need a definition."),
        FilterElement::new(
            "Workspace project",
            "pytia.project",
            "%WS:projectno",
            Condition::AlwaysApplies(true),
        )
        .with_description("The project number must match the workspace.")
        .enabled(false),
    ]
}
