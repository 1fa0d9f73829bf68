//! Simple rule example
//!
//! This example demonstrates:
//! - Registering host types, an enum and a macro
//! - Loading rules from inline YAML
//! - Evaluating rules and extracting values
//!
//! Set `RUST_LOG=debug` to see segment resolution and rule loading.

use rulex_sdk::{EnumType, RuleEngineBuilder, TypeRegistry, Value, ValueType};
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
struct Order {
    total: f64,
}

struct Customer {
    name: String,
    age: i64,
    tier: &'static str,
    country: Option<String>,
    orders: Vec<Order>,
}

fn register(registry: &mut TypeRegistry) {
    let tier = registry.register_enum(EnumType::new("Tier", ["Bronze", "Silver", "Gold"]));

    registry
        .register::<Order>("Order")
        .member("Total", ValueType::Float, |o: &Order| Value::Float(o.total));

    registry
        .register::<Customer>("Customer")
        .member("Name", ValueType::String, |c: &Customer| c.name.as_str().into())
        .member("Age", ValueType::Int, |c: &Customer| Value::Int(c.age))
        .member("Tier", tier, |c: &Customer| Value::enumeration(c.tier))
        .member("Country", ValueType::nullable(ValueType::String), |c: &Customer| {
            c.country.clone().into()
        })
        .member("Orders", ValueType::sequence(ValueType::record("Order")), |c: &Customer| {
            Value::list(c.orders.iter().cloned().map(Value::record))
        })
        .macro_fn(
            "Latest",
            vec![ValueType::Int],
            ValueType::sequence(ValueType::record("Order")),
            |c: &Customer, args| {
                let n = match args.first() {
                    Some(Value::Int(n)) => *n as usize,
                    _ => 1,
                };
                Ok(Value::list(c.orders.iter().rev().take(n).cloned().map(Value::record)))
            },
        );
}

const RULES: &str = r#"
all:
  - Age >= 18
  - Tier in [Silver, Gold]
  - any:
      - Country in ["US", "CA"]
      - Latest(1)[0].Total > 500
  - not:
      - Name starts_with test
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Simple Rule Example ===\n");

    let engine = RuleEngineBuilder::new()
        .register_types(register)
        .add_rule_content("premium_customer", RULES)
        .add_rule_content("big_spender", "Orders.Count() >= 2")
        .build()?;

    engine.validate::<Customer>()?;
    println!("Rules loaded: {:?}\n", engine.rule_ids());

    let customers = [
        Customer {
            name: "Ada".to_string(),
            age: 36,
            tier: "Gold",
            country: Some("CA".to_string()),
            orders: vec![Order { total: 120.0 }, Order { total: 80.0 }],
        },
        Customer {
            name: "test-user".to_string(),
            age: 40,
            tier: "Silver",
            country: None,
            orders: vec![Order { total: 900.0 }],
        },
        Customer {
            name: "Linus".to_string(),
            age: 17,
            tier: "Bronze",
            country: Some("FI".to_string()),
            orders: Vec::new(),
        },
    ];

    let latest_total = engine.value_extractor::<Customer, Option<f64>>("Latest(1)[0].Total");

    for customer in &customers {
        println!("Customer: {}", customer.name);
        for rule_id in engine.rule_ids() {
            println!("  {}: {}", rule_id, engine.evaluate(rule_id, customer)?);
        }
        if let (Ok(extractor), false) = (&latest_total, customer.orders.is_empty()) {
            println!("  latest order total: {:?}", extractor.extract(customer)?);
        }
        println!();
    }

    println!("Cached predicates: {}", engine.cached_predicates());

    Ok(())
}
