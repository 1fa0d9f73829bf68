//! Unit tests for the rule engine
//!
//! Covers rule loading from files and inline content, the predicate cache
//! and validation of whole rule sets.

use rulex_sdk::*;
use std::io::Write;
use tempfile::NamedTempFile;

struct Customer {
    age: i64,
    country: String,
    tags: Vec<String>,
}

struct Device {
    serial: String,
}

fn customer(age: i64) -> Customer {
    Customer {
        age,
        country: "CA".to_string(),
        tags: vec!["vip".to_string()],
    }
}

fn register(registry: &mut TypeRegistry) {
    registry
        .register::<Customer>("Customer")
        .member("Age", ValueType::Int, |c: &Customer| Value::Int(c.age))
        .member("Country", ValueType::String, |c: &Customer| c.country.as_str().into())
        .member("Tags", ValueType::sequence(ValueType::String), |c: &Customer| {
            Value::list(c.tags.clone())
        });
    registry
        .register::<Device>("Device")
        .member("Serial", ValueType::String, |d: &Device| d.serial.as_str().into());
}

fn rule_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ========== Loading ==========

#[test]
fn test_rules_from_yaml_file() -> anyhow::Result<()> {
    let file = rule_file(
        ".yaml",
        r#"
adults: Age >= 18
north_america:
  any:
    - Country in [US, CA]
    - Country == MX
"#,
    );

    let engine = RuleEngineBuilder::new()
        .register_types(register)
        .add_rule_file(file.path())
        .build()?;

    assert_eq!(engine.rule_ids(), vec!["adults", "north_america"]);
    assert!(engine.evaluate("adults", &customer(30))?);
    assert!(!engine.evaluate("adults", &customer(12))?);
    assert!(engine.evaluate("north_america", &customer(30))?);
    Ok(())
}

#[test]
fn test_rules_from_json_file() -> anyhow::Result<()> {
    let file = rule_file(
        ".json",
        r#"{ "tagged": { "left": "Tags", "operator": "contains_all", "right": ["vip"] } }"#,
    );

    let engine = RuleEngineBuilder::new()
        .register_types(register)
        .add_rule_file(file.path())
        .build()?;

    assert!(engine.evaluate("tagged", &customer(30))?);
    Ok(())
}

#[test]
fn test_inline_and_programmatic_rules() -> anyhow::Result<()> {
    let engine = RuleEngineBuilder::new()
        .register_types(register)
        .add_rule_content("seniors", "Age > 64")
        .add_rule(
            "untagged",
            ConditionTree::Leaf(LeafCondition::unary("Tags", Operator::IsEmpty)),
        )
        .build()?;

    assert!(!engine.evaluate("seniors", &customer(30))?);
    assert!(!engine.evaluate("untagged", &customer(30))?);
    Ok(())
}

#[test]
fn test_later_definition_wins() -> anyhow::Result<()> {
    let engine = RuleEngineBuilder::new()
        .register_types(register)
        .add_rule_content("adults", "Age >= 21")
        .add_rule("adults", ConditionTree::leaf("Age", Operator::GreaterThanOrEqual, "18"))
        .build()?;

    assert!(engine.evaluate("adults", &customer(19))?);
    Ok(())
}

#[test]
fn test_load_errors() {
    let missing = RuleEngineBuilder::new()
        .add_rule_file("does/not/exist.yaml")
        .build();
    assert!(matches!(missing, Err(SdkError::ParseError(_))));

    let unsupported = RuleEngineBuilder::new().add_rule_file("rules.toml").build();
    assert!(matches!(unsupported, Err(SdkError::ParseError(_))));

    let malformed = RuleEngineBuilder::new()
        .add_rule_content("broken", "Latest(3.Total > 1")
        .build();
    assert!(matches!(malformed, Err(SdkError::ParseError(_))));
}

// ========== Compilation ==========

#[test]
fn test_predicates_are_cached_per_type() -> anyhow::Result<()> {
    let engine = RuleEngineBuilder::new()
        .register_types(register)
        .add_rule_content("adults", "Age >= 18")
        .build()?;

    let resolutions = || engine.compiler().resolutions();
    engine.evaluate("adults", &customer(30))?;
    let after_first = resolutions();
    engine.evaluate("adults", &customer(40))?;
    assert_eq!(resolutions(), after_first);
    assert_eq!(engine.cached_predicates(), 1);

    engine.clear_cache();
    assert_eq!(engine.cached_predicates(), 0);
    Ok(())
}

#[test]
fn test_cache_can_be_disabled() -> anyhow::Result<()> {
    let engine = RuleEngineBuilder::new()
        .register_types(register)
        .add_rule_content("adults", "Age >= 18")
        .enable_cache(false)
        .build()?;

    engine.evaluate("adults", &customer(30))?;
    let after_first = engine.compiler().resolutions();
    engine.evaluate("adults", &customer(30))?;
    assert!(engine.compiler().resolutions() > after_first);
    assert_eq!(engine.cached_predicates(), 0);
    Ok(())
}

#[test]
fn test_unknown_rule() {
    let engine = RuleEngineBuilder::new()
        .register_types(register)
        .build()
        .unwrap();
    assert!(matches!(
        engine.evaluate("nope", &customer(1)),
        Err(SdkError::RuleNotFound(_))
    ));
}

#[test]
fn test_validate_reports_first_build_error() -> anyhow::Result<()> {
    let engine = RuleEngineBuilder::new()
        .register_types(register)
        .add_rule_content("adults", "Age >= 18")
        .add_rule_content("typo", "Agee >= 18")
        .build()?;

    match engine.validate::<Customer>() {
        Err(SdkError::RuleCompile { rule_id, .. }) => assert_eq!(rule_id, "typo"),
        other => panic!("expected a compile error, got {:?}", other),
    }

    // the same rules do not resolve on another registered type
    assert!(engine.validate::<Device>().is_err());
    Ok(())
}

#[test]
fn test_unregistered_target_type() -> anyhow::Result<()> {
    let engine = RuleEngineBuilder::new()
        .add_rule_content("adults", "Age >= 18")
        .build()?;
    let result = engine.evaluate("adults", &customer(30));
    assert!(matches!(result, Err(SdkError::RuleCompile { .. })));
    Ok(())
}

#[test]
fn test_value_extractor() -> anyhow::Result<()> {
    let engine = RuleEngineBuilder::new().register_types(register).build()?;
    let country = engine.value_extractor::<Customer, String>("Country")?;
    assert_eq!(country.extract(&customer(1))?, "CA");
    Ok(())
}

#[test]
fn test_engine_from_config() -> anyhow::Result<()> {
    let file = rule_file(".yml", "canadians: Country == CA\n");
    let yaml = format!("rule_files:\n  - {}\n", file.path().display());
    let config = EngineConfig::from_yaml_str(&yaml)?;

    let engine = RuleEngineBuilder::new()
        .with_config(config)
        .register_types(register)
        .build()?;
    assert!(engine.evaluate("canadians", &customer(30))?);
    Ok(())
}
