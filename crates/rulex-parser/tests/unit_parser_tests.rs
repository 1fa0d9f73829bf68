//! Unit tests for the path tokenizer and document loading

use rulex_core::condition::ConditionTree;
use rulex_core::Operator;
use rulex_parser::{tokenize, IndexKey, ParseError, RuleDocument, Segment};
use std::io::Write;

// =============================================================================
// Tokenizer Tests
// =============================================================================

#[test]
fn test_paths_without_parentheses_match_dot_split() {
    let paths = [
        "Age",
        "Customer.Address.City",
        "a..b",
        ".leading",
        "trailing.",
        "Tags['region']",
        "Items[0].Name",
    ];
    for path in paths {
        let expected: Vec<String> = path
            .split('.')
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
        assert_eq!(tokenize(path).unwrap(), expected, "path: {}", path);
    }
}

#[test]
fn test_nested_group_is_preserved() {
    assert_eq!(
        tokenize("Foo.Bar(Baz(1,2)).Qux").unwrap(),
        vec!["Foo", "Bar(Baz(1,2))", "Qux"]
    );
}

#[test]
fn test_unbalanced_path_fails() {
    assert!(matches!(
        tokenize("Foo(Bar(1,2"),
        Err(ParseError::MalformedPath { .. })
    ));
    assert!(matches!(tokenize("Foo)("), Err(ParseError::MalformedPath { position: 3, .. })));
}

#[test]
fn test_tokenized_segments_classify() {
    let segments: Vec<Segment> = tokenize("Orders.Latest(2).Lines[0].Tags['k'].Self")
        .unwrap()
        .iter()
        .map(|s| Segment::parse(s))
        .collect();

    assert_eq!(
        segments,
        vec![
            Segment::Member("Orders".to_string()),
            Segment::Call {
                name: "Latest".to_string(),
                args: vec!["2".to_string()],
            },
            Segment::Index {
                name: "Lines".to_string(),
                key: IndexKey::Position(0),
            },
            Segment::Index {
                name: "Tags".to_string(),
                key: IndexKey::Key("k".to_string()),
            },
            Segment::SelfRef,
        ]
    );
}

// =============================================================================
// Document Tests
// =============================================================================

#[test]
fn test_document_from_yaml_file() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
    writeln!(file, "adult: Age >= 18")?;
    writeln!(file, "no_tags:")?;
    writeln!(file, "  left: Tags")?;
    writeln!(file, "  operator: IsEmpty")?;

    let document = RuleDocument::from_file(file.path())?;
    assert_eq!(document.len(), 2);
    assert_eq!(
        document.get("no_tags"),
        Some(&ConditionTree::leaf("Tags", Operator::IsEmpty, ""))
    );
    Ok(())
}

#[test]
fn test_document_from_json_file() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    write!(file, r#"{{"gold": {{"left": "Tier", "operator": "In", "right": ["Gold"]}}}}"#)?;

    let document = RuleDocument::from_file(file.path())?;
    assert_eq!(
        document.get("gold"),
        Some(&ConditionTree::leaf("Tier", Operator::In, r#"["Gold"]"#))
    );
    Ok(())
}

#[test]
fn test_document_missing_file() {
    let result = RuleDocument::from_file("/nonexistent/rules.yaml");
    assert!(matches!(result, Err(ParseError::Io { .. })));
}

#[test]
fn test_document_unsupported_extension() {
    let result = RuleDocument::from_file("rules.toml");
    assert!(matches!(result, Err(ParseError::UnsupportedFormat(_))));
}
