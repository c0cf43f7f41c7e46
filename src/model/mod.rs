//! Data model for reconstructed bills of material and validation reports.
//!
//! A parse produces a [`Bom`]: one [`BomAssembly`] per sub-assembly block of the
//! export, plus the single summary block. The rule engine reads a `Bom` and produces
//! an independent [`Report`]. [`Paths`] is the part-number → document lookup the
//! parser uses to attach file paths.

mod bom;
mod paths;
mod report;

pub use bom::*;
pub use paths::*;
pub use report::*;
