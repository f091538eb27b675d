#![allow(dead_code)]
use std::path::Path;

use kori::ast::Program;
use kori::{parse_tokens, tokenize};
use test_support::bench_cases;

const PROGRAMS_DIR: &str = "tests/programs";

/// Fixture programs tagged for benchmarking, as `(label, source)`.
pub fn workloads() -> Vec<(String, String)> {
    let cases = bench_cases(Path::new(PROGRAMS_DIR)).unwrap_or_else(|err| panic!("{err:#}"));
    assert!(!cases.is_empty(), "no bench-enabled cases in {PROGRAMS_DIR}");
    cases
        .into_iter()
        .map(|case| {
            let source = case
                .read_program()
                .unwrap_or_else(|err| panic!("read {}: {err:#}", case.name));
            (case.name, source.trim().to_string())
        })
        .collect()
}

pub fn load_program(label: &str, source: &str) -> Program {
    let tokens = tokenize(source).unwrap_or_else(|err| panic!("tokenize {label}: {err}"));
    parse_tokens(tokens).unwrap_or_else(|err| panic!("parse {label}: {err}"))
}
