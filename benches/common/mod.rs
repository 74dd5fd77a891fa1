#![allow(dead_code)]
use std::fs;
use std::path::Path;

use plc::ast::Source;
use plc::{lexer, parser};

/// `(case name, program path)` for every fixture with benchmarking enabled.
pub fn workloads() -> Vec<(String, String)> {
    test_support::load_bench_cases(Path::new("tests/programs"))
        .unwrap_or_else(|err| panic!("load bench cases: {err:#}"))
        .into_iter()
        .map(|case| (case.name, case.program_path.display().to_string()))
        .collect()
}

pub fn load_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("read {path}: {err}"))
}

pub fn load_program(path: &str) -> Source {
    let source = load_source(path);
    let tokens = lexer::tokenize(&source).unwrap_or_else(|err| panic!("tokenize {path}: {err}"));
    parser::parse_tokens(&tokens).unwrap_or_else(|err| panic!("parse {path}: {err}"))
}
