//! Rule validation of a parsed bill of material.
//!
//! Rules are declarative [`FilterElement`]s: a target property, an applicability
//! [`Condition`] and a pass [`Criteria`]. The [`RuleEngine`] evaluates every enabled
//! rule against every item of every sub-assembly and collects the verdicts into a
//! [`Report`](crate::model::Report).
//!
//! ```ignore
//! use cad_bom_tools::rules::{RuleEngine, Workspace};
//!
//! let engine = RuleEngine::new(&resolved.filters, Workspace::default())?;
//! let report = engine.generate_report(&bom)?;
//! ```

mod engine;
mod filter;
mod workspace;

pub use engine::RuleEngine;
pub use filter::{Condition, Criteria, FilterElement, WORKSPACE_PREFIX};
pub use workspace::Workspace;
