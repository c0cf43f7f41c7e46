//! Rule engine for validating a bill of material.
//!
//! Evaluates the enabled filter rules against every item of every sub-assembly.
//! The summary block is not validated: it omits empty containers, so the
//! sub-assemblies are the complete source.

use crate::error::{BomError, Result, RuleErrorKind};
use crate::model::{Bom, BomAssembly, BomAssemblyItem, Report, ReportItem, Status};
use std::collections::HashSet;

use super::filter::{Criteria, FilterElement};
use super::Workspace;

/// A rule with its criteria compiled once up front.
#[derive(Debug, Clone)]
struct CompiledRule {
    element: FilterElement,
    criteria: Criteria,
}

/// Engine for applying filter rules to a bill of material
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<CompiledRule>,
    workspace: Workspace,
}

impl RuleEngine {
    /// Create a rule engine from the configured rules.
    ///
    /// Disabled rules are dropped here; every enabled rule's criteria must compile.
    /// Rule names key the verdicts of a report item, so they must be unique.
    pub fn new(filters: &[FilterElement], workspace: Workspace) -> Result<Self> {
        let mut names = HashSet::new();
        if let Some(duplicate) = filters
            .iter()
            .filter(|element| element.enabled)
            .find(|element| !names.insert(element.name.as_str()))
        {
            return Err(BomError::rule(
                "compiling rules",
                RuleErrorKind::DuplicateRule {
                    rule: duplicate.name.clone(),
                },
            ));
        }

        let rules = filters
            .iter()
            .filter(|element| element.enabled)
            .map(|element| {
                Criteria::compile(&element.name, &element.criteria)
                    .map(|criteria| CompiledRule {
                        element: element.clone(),
                        criteria,
                    })
                    .map_err(|kind| BomError::rule("compiling rule criteria", kind))
            })
            .collect::<Result<Vec<_>>>()?;

        let skipped = filters.len() - rules.len();
        if skipped > 0 {
            tracing::debug!("{skipped} disabled rule(s) will not be evaluated");
        }

        Ok(Self { rules, workspace })
    }

    /// Names of the rules that will be evaluated, in order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.element.name.as_str())
    }

    /// Validate every sub-assembly item and collect the verdicts.
    pub fn generate_report(&self, bom: &Bom) -> Result<Report> {
        tracing::info!(
            "Verifying bill of material: {} assemblies, {} rules",
            bom.assemblies.len(),
            self.rules.len()
        );

        let mut report = Report::new();
        for assembly in &bom.assemblies {
            tracing::debug!("Verifying element {:?}", assembly.partnumber);
            for item in &assembly.items {
                report.push(self.check_item(assembly, item)?);
            }
        }

        let counts = report.count_by_status();
        tracing::info!(
            "Verification {}: {} OK, {} FAILED",
            report.status,
            counts.ok,
            counts.failed
        );
        Ok(report)
    }

    /// Evaluate every rule on one item.
    pub fn check_item(&self, assembly: &BomAssembly, item: &BomAssemblyItem) -> Result<ReportItem> {
        let mut report_item = ReportItem::new(
            &item.partnumber,
            item.path.clone(),
            &assembly.partnumber,
            &assembly.path,
        );

        for rule in &self.rules {
            let status = self.evaluate(rule, item).map_err(|kind| {
                BomError::rule(
                    format!(
                        "item {:?} of element {:?}",
                        item.partnumber, assembly.partnumber
                    ),
                    kind,
                )
            })?;
            tracing::debug!("  {} - {}: {status}", item.partnumber, rule.element.name);
            report_item.record(&rule.element.name, status);
        }

        Ok(report_item)
    }

    fn evaluate(
        &self,
        rule: &CompiledRule,
        item: &BomAssemblyItem,
    ) -> std::result::Result<Status, RuleErrorKind> {
        let element = &rule.element;
        if !item.has_property(&element.property_name) {
            return Err(RuleErrorKind::UnknownProperty {
                rule: element.name.clone(),
                property: element.property_name.clone(),
            });
        }

        if !element.condition.applies_to(&element.name, item)? {
            return Ok(Status::Skipped);
        }

        let passed = item
            .property(&element.property_name)
            .is_some_and(|value| rule.criteria.is_satisfied_by(value, &self.workspace));
        Ok(if passed { Status::Ok } else { Status::Failed })
    }
}
