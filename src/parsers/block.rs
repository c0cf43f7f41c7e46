//! Block parser: reconstructs the bill of material from the flat export.
//!
//! The export is one sheet of concatenated blocks. A sub-assembly block starts with
//! a title row `"<bom keyword>: <name>"`, followed by its header row and its data
//! rows, and ends at the next blank row. The summary block starts with
//! `"<summary keyword>: <name>"`, has three caption rows before its header row and
//! runs to the end of the sheet.
//!
//! ```text
//! r      Bill of Material: A1           r      Recapitulation: A1
//! r+1    <headers>                      r+1..r+3  <captions>
//! r+2..  <data>                         r+4    <headers>
//!        <blank>                        r+5..  <data until end of sheet>
//! ```

use super::exclusion::{ExclusionPolicy, ExclusionReason};
use super::header::{locate_headers, HeaderLayout};
use super::normalize::Normalizer;
use crate::config::{ExportConfig, ResolvedConfig};
use crate::error::{BomError, ParseErrorKind, Result};
use crate::grid::Grid;
use crate::model::{Bom, BomAssembly, BomAssemblyItem, Paths, Properties};
use serde::Serialize;
use std::path::PathBuf;

/// Separator between the block keyword and the block name in a title cell.
pub const TITLE_DELIMITER: &str = ": ";

/// Rows from a sub-assembly title to its header row.
const ASSEMBLY_HEADER_OFFSET: usize = 1;
/// Rows from a sub-assembly title to its first data row.
const ASSEMBLY_DATA_OFFSET: usize = 2;
/// Rows from the summary title to its header row.
const SUMMARY_HEADER_OFFSET: usize = 4;
/// Rows from the summary title to its first data row.
const SUMMARY_DATA_OFFSET: usize = 5;

/// Per-run switches of the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Project number stamped on every item; `None` keeps the exported one
    pub project_number: Option<String>,
    pub ignore_source_unknown: bool,
    pub ignore_prefixes: Vec<String>,
}

impl ParseOptions {
    /// Options as configured in the `export` section.
    #[must_use]
    pub fn from_export(export: &ExportConfig) -> Self {
        Self {
            project_number: export.project_override().map(str::to_string),
            ignore_source_unknown: export.ignore_source_unknown,
            ignore_prefixes: export.ignore_prefixes.clone(),
        }
    }
}

/// A recoverable condition met while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseNotice {
    pub row: usize,
    pub partnumber: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// The part number has no document path; the item was kept without one
    MissingPath,
    /// The item was dropped
    Excluded(ExclusionReason),
}

/// The parse result: the bill of material and what was tolerated on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBom {
    pub bom: Bom,
    pub notices: Vec<ParseNotice>,
}

impl ParsedBom {
    /// Items excluded by the exclusion policy.
    pub fn excluded(&self) -> impl Iterator<Item = &ParseNotice> {
        self.notices
            .iter()
            .filter(|n| matches!(n.kind, NoticeKind::Excluded(_)))
    }
}

/// A block that is being filled.
#[derive(Debug)]
struct OpenBlock {
    assembly: BomAssembly,
    header: HeaderLayout,
    data_start: usize,
}

#[derive(Debug)]
enum State {
    Seeking,
    InAssembly(OpenBlock),
    InSummary(OpenBlock),
}

/// Which block a title row opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Assembly,
    Summary,
}

/// Single-pass parser over the rows of an export.
#[derive(Debug)]
pub struct BlockParser<'a> {
    config: &'a ResolvedConfig,
    paths: &'a Paths,
    normalizer: Normalizer<'a>,
    exclusion: ExclusionPolicy,
}

impl<'a> BlockParser<'a> {
    #[must_use]
    pub fn new(config: &'a ResolvedConfig, paths: &'a Paths, options: &'a ParseOptions) -> Self {
        Self {
            config,
            paths,
            normalizer: Normalizer::new(config, options.project_number.as_deref()),
            exclusion: ExclusionPolicy::new(
                options.ignore_source_unknown,
                options.ignore_prefixes.iter().cloned(),
            ),
        }
    }

    /// Parse the whole grid.
    ///
    /// Any fatal layout problem aborts the parse; no partial result is returned.
    pub fn parse<G: Grid + ?Sized>(&self, grid: &G) -> Result<ParsedBom> {
        tracing::info!("Retrieving bill of material from export");

        let max_row = grid.max_row();
        let mut assemblies = Vec::new();
        let mut notices = Vec::new();
        let mut state = State::Seeking;

        // One row past the end so the summary is closed by running off the sheet.
        for row in 1..=max_row + 1 {
            let blank = row > max_row || grid.row_is_empty(row);

            state = match state {
                State::InAssembly(block) if blank => {
                    close_assembly(block, &mut assemblies);
                    State::Seeking
                }
                State::InSummary(block) => {
                    if let Some((BlockKind::Summary, name)) = self.title(grid, row) {
                        return Err(BomError::parse(
                            format!("row {row}"),
                            ParseErrorKind::DuplicateSummaryBlock { name, row },
                        ));
                    }
                    State::InSummary(block)
                }
                other => match self.title(grid, row) {
                    Some((kind, name)) => {
                        if let State::InAssembly(block) = other {
                            close_assembly(block, &mut assemblies);
                        }
                        self.open_block(grid, kind, name, row)?
                    }
                    None => other,
                },
            };

            if blank {
                continue;
            }
            let block = match &mut state {
                State::InAssembly(block) | State::InSummary(block) if row >= block.data_start => {
                    block
                }
                _ => continue,
            };
            if let Some(item) = self.read_item(grid, row, block, &mut notices)? {
                tracing::debug!(
                    " - Added item {:?} to element {:?}",
                    item.partnumber,
                    block.assembly.partnumber
                );
                block.assembly.items.push(item);
            }
        }

        let summary = match state {
            State::InSummary(block) => {
                tracing::info!(
                    "Closed summary {:?} with {} items",
                    block.assembly.partnumber,
                    block.assembly.len()
                );
                Some(block.assembly)
            }
            // The row past the end is blank, so no assembly is still open here.
            State::InAssembly(_) | State::Seeking => None,
        };

        let summary = summary.ok_or_else(|| {
            BomError::parse(
                format!("{} rows scanned", max_row),
                ParseErrorKind::MissingSummaryBlock,
            )
        })?;

        tracing::info!(
            "Retrieved {} assemblies and a summary of {} items ({} notices)",
            assemblies.len(),
            summary.len(),
            notices.len()
        );
        Ok(ParsedBom {
            bom: Bom::new(assemblies, summary),
            notices,
        })
    }

    /// Recognize a block title in the first cell of `row`.
    fn title<G: Grid + ?Sized>(&self, grid: &G, row: usize) -> Option<(BlockKind, String)> {
        let text = grid.text(row, 1)?;
        let (keyword, name) = split_title(&text);
        let keywords = &self.config.keywords;

        let kind = if matches_keyword(keyword, &keywords.bom) {
            BlockKind::Assembly
        } else if matches_keyword(keyword, &keywords.summary) {
            BlockKind::Summary
        } else {
            return None;
        };
        Some((kind, name.to_string()))
    }

    fn open_block<G: Grid + ?Sized>(
        &self,
        grid: &G,
        kind: BlockKind,
        name: String,
        row: usize,
    ) -> Result<State> {
        let context = || format!("block {name:?} at row {row}");
        let path = self.paths.get(&name).map(PathBuf::from).ok_or_else(|| {
            BomError::parse(
                context(),
                ParseErrorKind::UnresolvedAssemblyPath {
                    name: name.clone(),
                    row,
                },
            )
        })?;

        let (header_offset, data_offset) = match kind {
            BlockKind::Assembly => (ASSEMBLY_HEADER_OFFSET, ASSEMBLY_DATA_OFFSET),
            BlockKind::Summary => (SUMMARY_HEADER_OFFSET, SUMMARY_DATA_OFFSET),
        };
        let header = locate_headers(
            grid,
            row + header_offset,
            self.config.expected_headers(),
            self.config.required_headers.values(),
        )
        .map_err(|e| BomError::parse(context(), e))?;

        let block = OpenBlock {
            assembly: BomAssembly::new(name, path),
            header,
            data_start: row + data_offset,
        };
        Ok(match kind {
            BlockKind::Assembly => {
                tracing::info!("Processing BOM of element {:?}", block.assembly.partnumber);
                State::InAssembly(block)
            }
            BlockKind::Summary => {
                tracing::info!("Processing BOM summary {:?}", block.assembly.partnumber);
                State::InSummary(block)
            }
        })
    }

    /// Read one data row. `None` if the item was excluded.
    fn read_item<G: Grid + ?Sized>(
        &self,
        grid: &G,
        row: usize,
        block: &OpenBlock,
        notices: &mut Vec<ParseNotice>,
    ) -> Result<Option<BomAssemblyItem>> {
        let mut properties = Properties::with_capacity(block.header.len());
        for (label, col) in block.header.iter() {
            let value = self.normalizer.normalize(label, grid.cell(row, col));
            properties.insert(label.to_string(), value);
        }

        let keywords = &self.config.keywords;
        let context = || format!("row {row} of block {:?}", block.assembly.partnumber);
        let partnumber = match properties.get(&keywords.partnumber) {
            None => {
                return Err(BomError::parse(
                    context(),
                    ParseErrorKind::MissingPartNumberKey {
                        key: keywords.partnumber.clone(),
                        row,
                    },
                ))
            }
            Some(None) => {
                return Err(BomError::parse(
                    context(),
                    ParseErrorKind::EmptyPartNumberValue {
                        key: keywords.partnumber.clone(),
                        row,
                    },
                ))
            }
            Some(Some(partnumber)) => partnumber.clone(),
        };

        let path = self.paths.get(&partnumber).map(PathBuf::from);
        if path.is_none() {
            tracing::warn!("No path found for item {partnumber:?} (row {row})");
            notices.push(ParseNotice {
                row,
                partnumber: partnumber.clone(),
                kind: NoticeKind::MissingPath,
            });
        }

        let source = keywords.classify_source(
            properties
                .get(&keywords.source)
                .and_then(|v| v.as_deref()),
        );
        let item = BomAssemblyItem::new(partnumber, source, properties, path);

        if let Some(reason) = self.exclusion.excludes(&item) {
            tracing::warn!("Ignoring item {:?} (row {row}): {reason}", item.partnumber);
            notices.push(ParseNotice {
                row,
                partnumber: item.partnumber,
                kind: NoticeKind::Excluded(reason),
            });
            return Ok(None);
        }
        Ok(Some(item))
    }
}

fn close_assembly(block: OpenBlock, assemblies: &mut Vec<BomAssembly>) {
    tracing::info!(
        "Closed BOM of element {:?} with {} items",
        block.assembly.partnumber,
        block.assembly.len()
    );
    assemblies.push(block.assembly);
}

/// Split a title cell into `(keyword, name)` at the first and last delimiter.
///
/// Without a delimiter the whole text is both keyword and name.
#[must_use]
pub fn split_title(text: &str) -> (&str, &str) {
    let keyword = text.split(TITLE_DELIMITER).next().unwrap_or(text);
    let name = text.rsplit(TITLE_DELIMITER).next().unwrap_or(text);
    (keyword, name)
}

/// Substring match of a configured block keyword; empty keywords never match.
fn matches_keyword(candidate: &str, keyword: &str) -> bool {
    !keyword.is_empty() && candidate.contains(keyword)
}
