//! End-to-end tests for structured documents.

use projgen_document::{IndentStyle, StructuredDocument};
use proptest::prelude::*;
use serde_yaml::Value;

const PRE_COMMIT: &str = "\
repos:
- repo: https://github.com/pre-commit/pre-commit-hooks
  rev: v4.1.0
  hooks:
  - id: check-yaml
  - id: mixed-line-ending
    args:
    - --fix=auto
";

#[test]
fn test_pre_commit_config_with_comments() {
    let mut doc = StructuredDocument::parse(PRE_COMMIT)
        .unwrap()
        .with_style(IndentStyle::new(4, 0));

    doc.set_header_comment("This file let's you run pre-commit hooks!");
    doc.set_comment_before_key("repos.[0]", "This is the official pre-commit repository URL")
        .unwrap();
    doc.set_eol_comment("repos.[0].rev", "Showing off end-of-line comments 🎉")
        .unwrap();

    let expected = "\
# This file let's you run pre-commit hooks!
repos:
# This is the official pre-commit repository URL
- repo: https://github.com/pre-commit/pre-commit-hooks
  rev: v4.1.0 # Showing off end-of-line comments 🎉
  hooks:
  - id: check-yaml
  - id: mixed-line-ending
    args:
    - --fix=auto
";
    let out = doc.dump().unwrap();
    assert_eq!(out, expected);

    // Comments never change the data
    let reparsed: Value = serde_yaml::from_str(&out).unwrap();
    assert_eq!(reparsed, doc.value());
}

#[test]
fn test_canonical_text_round_trips() {
    let doc = StructuredDocument::parse(PRE_COMMIT).unwrap();
    assert_eq!(doc.dump().unwrap(), PRE_COMMIT);
}

#[test]
fn test_second_eol_comment_wins() {
    let mut doc = StructuredDocument::parse(PRE_COMMIT).unwrap();
    doc.set_eol_comment("repos.[0].rev", "first").unwrap();
    doc.set_eol_comment("repos.[0].rev", "second").unwrap();

    let out = doc.dump().unwrap();
    assert!(out.contains("rev: v4.1.0 # second\n"));
    assert!(!out.contains("first"));
}

#[test]
fn test_before_key_comment_in_nested_list() {
    let mut doc = StructuredDocument::parse(PRE_COMMIT)
        .unwrap()
        .with_style(IndentStyle::new(2, 2));
    doc.set_comment_before_key("repos.[0].hooks.[1]", "Normalise line endings")
        .unwrap();

    let out = doc.dump().unwrap();
    assert!(out.contains("      # Normalise line endings\n      - id: mixed-line-ending\n"));
}

#[test]
fn test_multiline_before_key_comment() {
    let mut doc = StructuredDocument::parse("a:\n  b: 1\n").unwrap();
    doc.set_comment_before_key("a.b", "line one\nline two").unwrap();
    assert_eq!(
        doc.dump().unwrap(),
        "a:\n  # line one\n  # line two\n  b: 1\n"
    );
}

#[test]
fn test_comment_on_missing_path_fails() {
    let mut doc = StructuredDocument::parse(PRE_COMMIT).unwrap();
    assert!(doc.set_comment_before_key("repos.[3]", "x").is_err());
    assert!(doc.set_eol_comment("repos.[0].missing", "x").is_err());
    assert!(doc.edits().is_empty());
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z]{1,6}( [a-z]{1,4})?".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::btree_map("[a-d]{1,3}", inner, 0..4).prop_map(|entries| {
                Value::Mapping(
                    entries
                        .into_iter()
                        .map(|(k, v)| (Value::from(k), v))
                        .collect(),
                )
            }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_dump_parses_back_to_same_value(
        value in arb_value(),
        indent in 1usize..5,
        list_indent in 0usize..4,
    ) {
        let doc = StructuredDocument::new(value.clone()).unwrap();
        let out = doc.dump_with(IndentStyle::new(indent, list_indent)).unwrap();
        let reparsed: Value = serde_yaml::from_str(&out).unwrap();
        prop_assert_eq!(reparsed, value);
    }
}
