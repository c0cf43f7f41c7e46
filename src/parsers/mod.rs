//! Bill of material export parser.
//!
//! Turns the flat report export of a CAD system into a [`Bom`](crate::model::Bom).
//! The work is split the way the export is built:
//!
//! - [`locate_headers`] maps the header row of a block to column positions
//! - [`Normalizer`] cleans raw cell values
//! - [`ExclusionPolicy`] decides which items are dropped
//! - [`BlockParser`] walks the rows, recognizes block boundaries and assembles
//!   the tree
//!
//! ## Usage
//!
//! ```no_run
//! use cad_bom_tools::config::AppConfig;
//! use cad_bom_tools::grid::MemoryGrid;
//! use cad_bom_tools::model::Paths;
//! use cad_bom_tools::parsers::{BlockParser, ParseOptions};
//!
//! let resolved = AppConfig::default().resolve().unwrap();
//! let paths = Paths::new();
//! let options = ParseOptions::from_export(&resolved.export);
//! let grid = MemoryGrid::new();
//! let parsed = BlockParser::new(&resolved, &paths, &options).parse(&grid);
//! ```

mod block;
mod exclusion;
mod header;
mod normalize;

pub use block::{
    split_title, BlockParser, NoticeKind, ParseNotice, ParseOptions, ParsedBom, TITLE_DELIMITER,
};
pub use exclusion::{ExclusionPolicy, ExclusionReason};
pub use header::{locate_headers, HeaderItem, HeaderLayout};
pub use normalize::{
    apply_fixed_text, blank_to_none, override_project, strip_carriage_returns, translate_username,
    Normalizer, CARRIAGE_RETURN_ARTIFACT,
};
