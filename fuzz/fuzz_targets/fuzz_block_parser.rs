#![no_main]
use cad_bom_tools::config::AppConfig;
use cad_bom_tools::grid::MemoryGrid;
use cad_bom_tools::model::Paths;
use cad_bom_tools::parsers::{BlockParser, ParseOptions};
use libfuzzer_sys::fuzz_target;

/// Fuzz the block parser with arbitrary grids.
///
/// Lines become rows and tabs separate cells, so the fuzzer can reach title,
/// header and data rows with plain text.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = AppConfig::default().resolve() else {
        return;
    };
    let grid = MemoryGrid::from_text_rows(text.lines().map(|line| line.split('\t')));
    let paths = Paths::new();
    let options = ParseOptions::from_export(&config.export);
    let _ = BlockParser::new(&config, &paths, &options).parse(&grid);
});
