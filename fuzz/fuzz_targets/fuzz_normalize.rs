#![no_main]
use cad_bom_tools::parsers::{blank_to_none, split_title, strip_carriage_returns};
use libfuzzer_sys::fuzz_target;

/// Fuzz the cell cleanup steps and title splitting.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(v) = blank_to_none(strip_carriage_returns(Some(s.to_string()))) {
            assert!(!v.trim().is_empty());
        }
        let _ = split_title(s);
    }
});
