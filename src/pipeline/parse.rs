//! Export loading and parsing stage.
//!
//! Opens the tabular export and the part-number lookup, then runs the block parser
//! and the sorter over the grid.

use crate::config::ResolvedConfig;
use crate::error::{ErrorContext, Result};
use crate::grid::{Grid, MemoryGrid};
use crate::model::Paths;
use crate::parsers::{BlockParser, NoticeKind, ParseOptions, ParsedBom};
use std::path::Path;

use super::sort_bom;

/// Load the first worksheet of an export into memory.
#[cfg(feature = "xlsx")]
pub fn load_grid(path: &Path) -> Result<MemoryGrid> {
    tracing::info!("Reading export: {}", path.display());
    let grid = crate::grid::read_xlsx(path).context("loading export")?;
    tracing::debug!("Export spans {} rows, {} columns", grid.max_row(), grid.max_col());
    Ok(grid)
}

/// Without a workbook backend no export format can be opened.
#[cfg(not(feature = "xlsx"))]
pub fn load_grid(path: &Path) -> Result<MemoryGrid> {
    use crate::error::{BomError, GridErrorKind};

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_string();
    Err(BomError::grid(
        format!("opening {} (built without the xlsx feature)", path.display()),
        GridErrorKind::UnsupportedFormat(extension),
    ))
}

/// Load the part-number → document path lookup.
pub fn load_paths(path: &Path) -> Result<Paths> {
    let paths = Paths::from_file(path).context("loading part number paths")?;
    tracing::info!("Loaded {} document paths from {}", paths.len(), path.display());
    Ok(paths)
}

/// Parse the export and sort every item list.
///
/// Recoverable conditions are returned as notices on the result and logged as
/// warnings; structural problems abort the run.
pub fn process_bom<G: Grid + ?Sized>(
    config: &ResolvedConfig,
    grid: &G,
    paths: &Paths,
    options: &ParseOptions,
) -> Result<ParsedBom> {
    let mut parsed = BlockParser::new(config, paths, options).parse(grid)?;
    sort_bom(&mut parsed.bom, &config.sort);

    let excluded = parsed.excluded().count();
    let missing = parsed
        .notices
        .iter()
        .filter(|n| matches!(n.kind, NoticeKind::MissingPath))
        .count();
    tracing::info!(
        "Parsed {} assemblies, {} items ({} excluded, {} without path)",
        parsed.bom.assemblies.len(),
        parsed.bom.item_count(),
        excluded,
        missing
    );

    Ok(parsed)
}
