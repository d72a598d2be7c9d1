//! Basic usage example for segment-core
//!
//! Run with: cargo run --example basic_usage

use segment_core::condition::{evaluate, RuleParser};
use segment_core::{arith, evaluate_rule, Validator, Value};
use std::collections::HashMap;

fn main() {
    println!("=== Segment Core Basic Usage Example ===\n");

    let now = 1_700_000_000;

    // Example 1: Validating a user record
    println!("1. Building a Record:");
    let raw: HashMap<String, Value> = [
        ("id", Value::from("user-001")),
        ("level", Value::from(5)),
        ("country", Value::from("US")),
        ("first_session", Value::from(now - 90 * 86_400)),
        ("last_session", Value::from(now - 3_600)),
        ("purchase_amount", Value::from(1_200)),
        ("last_purchase_at", Value::from(now - 7 * 86_400)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let record = match Validator::new().build_record(&raw) {
        Ok(record) => record,
        Err(e) => {
            println!("   Invalid record: {}", e);
            return;
        }
    };
    println!("   Record: {:?}\n", record);

    // Example 2: Arithmetic operands
    println!("2. Arithmetic:");
    for text in ["86400 * 7", "7 / 2 * 2", "10 / (5 - 5)"] {
        println!("   {} => {:?}", text, arith::evaluate(text));
    }
    println!();

    // Example 3: Parsing a rule into an expression tree
    println!("3. Parsing a Rule:");
    let rule = "country in ('US', 'CA') and last_session > _now() - 86400";
    match RuleParser::new(now).parse(rule) {
        Ok(expr) => {
            println!("   Fields: {:?}", expr.fields());
            println!("   Tree: {:#?}", expr);
            println!("   Matches: {:?}\n", evaluate(&expr, &record));
        }
        Err(e) => println!("   Parse error: {}\n", e),
    }

    // Example 4: One-shot evaluation, including failures
    println!("4. Evaluating Rules:");
    for rule in [
        "level between 3 and 10",
        "not id like 'admin%'",
        "purchase_amount > 100 or country = 'DE'",
        "(level > 1",
        "score > 10",
    ] {
        match evaluate_rule(rule, &record, now) {
            Ok(matched) => println!("   {:<45} => {}", rule, matched),
            Err(e) => println!("   {:<45} => error: {}", rule, e),
        }
    }

    println!("\n=== Example Complete ===");
}
