//! Common test utilities and macros

use rust_parser::{ParseStatus, ParsedAst, parse_source};
use std::path::Path;

#[derive(Debug)]
pub enum TestResult {
    /// Clean parse with the names of the top-level items.
    Ok(Vec<String>),
    /// Recovered parse with the error messages and the kept item names.
    Error(Vec<String>, Vec<String>),
    /// Recovered parse with this many errors and the kept item names.
    ErrorCount(usize, Vec<String>),
    /// Recovered parse whose first error matches the pattern.
    ErrorRegex(String),
    /// Failed parse with its error message.
    Fatal(String),
    FatalRegex(String),
}

impl PartialEq for TestResult {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TestResult::Ok(a), TestResult::Ok(b)) => a == b,
            (TestResult::Error(a, x), TestResult::Error(b, y)) => a == b && x == y,
            (TestResult::ErrorCount(count, a), TestResult::Error(messages, b))
            | (TestResult::Error(messages, b), TestResult::ErrorCount(count, a)) => {
                *count == messages.len() && a == b
            }
            (TestResult::ErrorRegex(pattern), TestResult::Error(messages, _))
            | (TestResult::Error(messages, _), TestResult::ErrorRegex(pattern)) => messages
                .first()
                .is_some_and(|msg| regex::Regex::new(pattern).unwrap().is_match(msg)),
            (TestResult::Fatal(a), TestResult::Fatal(b)) => a == b,
            (TestResult::FatalRegex(pattern), TestResult::Fatal(msg))
            | (TestResult::Fatal(msg), TestResult::FatalRegex(pattern)) => {
                regex::Regex::new(pattern).unwrap().is_match(msg)
            }
            _ => false,
        }
    }
}

pub fn items(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub fn parse_input(input_file: &Path) -> ParsedAst {
    let source = std::fs::read_to_string(input_file)
        .unwrap_or_else(|e| panic!("cannot read {}: {}", input_file.display(), e));
    parse_source(&source)
}

/// Top-level items are named after their declared name, or their kind when
/// they have none (`impl` blocks, `use` declarations).
fn item_names(parsed: &ParsedAst) -> Vec<String> {
    parsed
        .ast
        .iter()
        .flat_map(|ast| &ast.children)
        .filter(|node| node.kind.starts_with("Item"))
        .map(|node| node.token.clone().unwrap_or_else(|| node.kind.to_string()))
        .collect()
}

pub fn run_parser_test(input_file: &Path) -> TestResult {
    let parsed = parse_input(input_file);
    let messages = parsed.errors.iter().map(|d| d.message.clone()).collect();

    match parsed.status {
        ParseStatus::Ok => TestResult::Ok(item_names(&parsed)),
        ParseStatus::Error => TestResult::Error(messages, item_names(&parsed)),
        ParseStatus::Fatal => TestResult::Fatal(messages.join("\n")),
    }
}

#[macro_export]
macro_rules! check_parse {
    ($test_name:ident, input=$input_file:expr, result=$expected:expr) => {
        #[test]
        fn $test_name() {
            let input_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("tests")
                .join("inputs")
                .join($input_file);

            let result = crate::common::run_parser_test(&input_path);
            assert_eq!(result, $expected);
        }
    };
}
