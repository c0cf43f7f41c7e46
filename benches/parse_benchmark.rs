//! Performance benchmarks for parsing and validating large exports.
//!
//! Run with: cargo bench --bench parse_benchmark

use cad_bom_tools::config::AppConfig;
use cad_bom_tools::grid::MemoryGrid;
use cad_bom_tools::model::Paths;
use cad_bom_tools::parsers::{BlockParser, ParseOptions};
use cad_bom_tools::pipeline::{process_bom, validate_bom};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

const HEADER: [&str; 12] = [
    "pytia.project",
    "pytia.machine",
    "Number",
    "Part Number",
    "Revision",
    "Definition",
    "Nomenclature",
    "Source",
    "Quantity",
    "pytia.material",
    "pytia.creator",
    "pytia.modifier",
];

fn data_row(partnumber: &str, i: usize) -> Vec<String> {
    let source = if i % 3 == 0 { "Bought" } else { "Made" };
    vec![
        "4711".to_string(),
        "M-01".to_string(),
        (i + 1).to_string(),
        partnumber.to_string(),
        if i % 3 == 0 { "-" } else { "A" }.to_string(),
        format!("definition {}", i % 17),
        "Bracket".to_string(),
        source.to_string(),
        (1 + i % 4).to_string(),
        "S235".to_string(),
        "jdoe".to_string(),
        "jdoe".to_string(),
    ]
}

/// An export with `assemblies` blocks of `items` rows each, plus the summary.
fn generate_export(assemblies: usize, items: usize) -> (MemoryGrid, Paths) {
    let header: Vec<String> = HEADER.iter().map(|s| (*s).to_string()).collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut paths = Paths::new();
    paths.insert("TOP", "/cad/TOP.CATProduct");

    for a in 0..assemblies {
        let name = format!("ASM-{a:04}");
        paths.insert(name.clone(), format!("/cad/{name}.CATProduct"));
        rows.push(vec![format!("Bill of Material: {name}")]);
        rows.push(header.clone());
        for i in 0..items {
            let partnumber = format!("{name}-P{i:04}");
            paths.insert(partnumber.clone(), format!("/cad/{partnumber}.CATPart"));
            rows.push(data_row(&partnumber, i));
        }
        rows.push(Vec::new());
    }

    rows.push(vec!["Recapitulation: TOP".to_string()]);
    rows.push(vec![format!("Different parts: {}", assemblies * items)]);
    rows.push(vec![format!("Total parts: {}", assemblies * items)]);
    rows.push(Vec::new());
    rows.push(header);
    for a in 0..assemblies {
        for i in 0..items {
            rows.push(data_row(&format!("ASM-{a:04}-P{i:04}"), i));
        }
    }

    (MemoryGrid::from_text_rows(rows), paths)
}

fn bench_parse(c: &mut Criterion) {
    let config = AppConfig::default().resolve().expect("resolve");
    let options = ParseOptions::from_export(&config.export);
    let mut group = c.benchmark_group("parse");

    for assemblies in [10, 50, 200] {
        let (grid, paths) = generate_export(assemblies, 25);
        group.bench_with_input(
            BenchmarkId::new("block_parser", assemblies),
            &assemblies,
            |b, _| {
                b.iter(|| {
                    let parser = BlockParser::new(&config, &paths, &options);
                    let _ = black_box(parser.parse(black_box(&grid)));
                });
            },
        );
    }

    group.finish();
}

fn bench_check(c: &mut Criterion) {
    let config = AppConfig::default().resolve().expect("resolve");
    let options = ParseOptions::from_export(&config.export);
    let (grid, paths) = generate_export(100, 25);
    let parsed = process_bom(&config, &grid, &paths, &options).expect("parse");

    c.bench_function("validate_5000_items", |b| {
        b.iter(|| {
            let _ = black_box(validate_bom(&config, black_box(&parsed.bom)));
        });
    });

    c.bench_function("parse_and_validate_5000_items", |b| {
        b.iter(|| {
            let parsed = process_bom(&config, &grid, &paths, &options).expect("parse");
            let _ = black_box(validate_bom(&config, &parsed.bom));
        });
    });
}

criterion_group!(benches, bench_parse, bench_check);
criterion_main!(benches);
