#[macro_use]
mod common;

use common::{TestResult, items, parse_input};
use rust_parser::ParseStatus;
use rust_parser::ast::{Node, Position};
use std::path::Path;

fn input(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("inputs")
        .join(name)
}

fn find<'a>(root: &'a Node, kind: &str, token: &str) -> Option<&'a Node> {
    root.walk()
        .find(|n| n.kind == kind && n.token.as_deref() == Some(token))
}

check_parse!(
    test_all_item_kinds,
    input = "items.rs",
    result = TestResult::Ok(items(&[
        "ItemUse",
        "MAX_DEPTH",
        "COUNTER",
        "Point",
        "ItemImpl",
        "Shape",
        "Area",
        "ItemImpl",
        "Meters",
        "geometry",
        "square",
        "main",
    ]))
);

check_parse!(
    test_inner_attributes,
    input = "inner_attrs.rs",
    result = TestResult::Ok(items(&["helper"]))
);

check_parse!(
    test_shebang,
    input = "shebang.rs",
    result = TestResult::Ok(items(&["main"]))
);

check_parse!(
    test_broken_bodies_are_kept,
    input = "broken_bodies.rs",
    result = TestResult::ErrorCount(2, items(&["meaning_of_life", "meaning_of_foo"]))
);

check_parse!(
    test_broken_body_message,
    input = "broken_bodies.rs",
    result = TestResult::ErrorRegex(r"expected".to_string())
);

check_parse!(
    test_broken_signature_is_fatal,
    input = "broken_signature.rs",
    result = TestResult::FatalRegex(r"^expected .+$".to_string())
);

check_parse!(
    test_broken_struct_is_fatal,
    input = "broken_struct.rs",
    result = TestResult::FatalRegex(r"expected `,`".to_string())
);

check_parse!(
    test_unbalanced_delimiters,
    input = "unbalanced.rs",
    result = TestResult::FatalRegex(r".+".to_string())
);

check_parse!(
    test_unterminated_string,
    input = "unterminated_string.rs",
    result = TestResult::FatalRegex(r".+".to_string())
);

#[test]
fn test_expression_tree() {
    let parsed = parse_input(&input("expressions.rs"));
    assert_eq!(parsed.status, ParseStatus::Ok);
    let root = parsed.ast.unwrap();

    let compute = find(&root, "ItemFn", "compute").unwrap();
    assert_eq!(compute.span.unwrap().start, Position { line: 1, column: 0 });

    for op in ["+", ">", "*", "+="] {
        assert!(
            find(compute, "ExprBinary", op).is_some(),
            "missing binary `{op}`"
        );
    }
    assert!(find(compute, "ExprUnary", "-").is_some());
    assert!(find(compute, "PatIdent", "sum").is_some());
    assert!(find(compute, "LitInt", "10").is_some());
    assert!(compute.walk().any(|n| n.kind == "ExprIf"));
    assert!(compute.walk().any(|n| n.kind == "Local"));

    let describe = find(&root, "ItemFn", "describe").unwrap();
    assert!(find(describe, "ExprMethodCall", "len").is_some());
    assert!(find(describe, "LitStr", "\"empty\"").is_some());
    assert_eq!(describe.walk().filter(|n| n.kind == "Arm").count(), 2);
    assert!(describe.walk().any(|n| n.kind == "PatWild"));
}

#[test]
fn test_recovered_function_has_empty_body() {
    let parsed = parse_input(&input("broken_bodies.rs"));
    let root = parsed.ast.unwrap();
    let life = find(&root, "ItemFn", "meaning_of_life").unwrap();

    let block = life.walk().find(|n| n.kind == "Block").unwrap();
    assert!(block.children.is_empty());
    assert!(life.walk().any(|n| n.kind == "TypePath"));
}

#[test]
fn test_error_positions() {
    let parsed = parse_input(&input("broken_bodies.rs"));
    let lines: Vec<_> = parsed
        .errors
        .iter()
        .map(|d| d.span.unwrap().start.line)
        .collect();
    assert_eq!(lines, [2, 5]);
}

#[test]
fn test_fatal_error_position() {
    let parsed = parse_input(&input("broken_struct.rs"));
    assert!(parsed.ast.is_none());
    let fatal = parsed.errors.last().unwrap();
    assert_eq!(fatal.span.unwrap().start.line, 5);
}

#[test]
fn test_shebang_keeps_positions() {
    let parsed = parse_input(&input("shebang.rs"));
    let root = parsed.ast.unwrap();
    let main = find(&root, "ItemFn", "main").unwrap();
    assert_eq!(main.span.unwrap().start.line, 2);
}

#[test]
fn test_parsing_is_deterministic() {
    let first = parse_input(&input("items.rs"));
    let second = parse_input(&input("items.rs"));
    assert_eq!(first, second);
}
