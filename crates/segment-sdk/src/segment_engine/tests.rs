//! Unit tests for SegmentEngine

use super::*;
use crate::clock::FixedClock;
use crate::config::EngineConfig;
use crate::error::SdkError;
use segment_core::{RuleError, ValidationError, Value};
use std::collections::HashMap;

const NOW: i64 = 1_700_000_000;

fn user() -> HashMap<String, Value> {
    serde_json::from_value(serde_json::json!({
        "id": "u1",
        "level": 3,
        "country": "CA",
        "first_session": NOW - 100_000,
        "last_session": NOW - 60,
        "purchase_amount": 0,
        "last_purchase_at": 0,
    }))
    .unwrap()
}

fn engine() -> SegmentEngine {
    SegmentEngine::builder().with_clock(FixedClock(NOW)).build()
}

#[test]
fn test_segment_rules_keep_order() {
    let rules: SegmentRules =
        serde_json::from_str(r#"{"zeta": "level > 1", "alpha": "level < 1", "mid": "level = 3"}"#)
            .unwrap();
    let names: Vec<&str> = rules.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_segment_rules_duplicate_name_keeps_last_rule() {
    let rules: SegmentRules =
        serde_json::from_str(r#"{"a": "level > 1", "b": "level > 2", "a": "level > 3"}"#).unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules.get("a"), Some("level > 3"));
}

#[test]
fn test_segment_rules_decode_large_map() {
    let body = (0..120_000)
        .map(|i| format!("\"s{}\": \"level > 1\"", i))
        .collect::<Vec<_>>()
        .join(", ");
    let rules: SegmentRules = serde_json::from_str(&format!("{{{}}}", body)).unwrap();

    assert_eq!(rules.len(), 120_000);
    assert_eq!(rules.iter().next().map(|(n, _)| n), Some("s0"));
    assert_eq!(rules.iter().last().map(|(n, _)| n), Some("s119999"));
    assert_eq!(rules.get("s60000"), Some("level > 1"));
}

#[test]
fn test_segment_rules_equality_respects_order() {
    let ab = SegmentRules::new().with("a", "level > 1").with("b", "level > 2");
    let ba = SegmentRules::new().with("b", "level > 2").with("a", "level > 1");
    assert_eq!(ab, ab.clone());
    assert_ne!(ab, ba);
}

#[test]
fn test_segment_rules_reject_non_string_rule() {
    let result: Result<SegmentRules, _> = serde_json::from_str(r#"{"a": 5}"#);
    assert!(result.is_err());
}

#[test]
fn test_evaluate_segments() {
    let rules = SegmentRules::new()
        .with("active", "last_session > _now() - 3600")
        .with("buyer", "purchase_amount > 0")
        .with("north_america", "country in ('US', 'CA')");

    let results = engine().evaluate_segments(&user(), rules.iter()).unwrap();

    assert_eq!(results.get("active"), Some(true));
    assert_eq!(results.get("buyer"), Some(false));
    assert_eq!(results.get("north_america"), Some(true));
    assert_eq!(results.matched().collect::<Vec<_>>(), vec!["active", "north_america"]);
}

#[test]
fn test_results_serialize_in_order() {
    let rules = SegmentRules::new()
        .with("z", "level > 1")
        .with("a", "level > 5");
    let results = engine().evaluate_segments(&user(), rules.iter()).unwrap();
    assert_eq!(serde_json::to_string(&results).unwrap(), r#"{"z":true,"a":false}"#);
}

#[test]
fn test_empty_rules() {
    let results = engine().evaluate_segments(&user(), SegmentRules::new().iter()).unwrap();
    assert!(results.is_empty());
    assert_eq!(serde_json::to_string(&results).unwrap(), "{}");
}

#[test]
fn test_invalid_record_fails_whole_request() {
    let mut raw = user();
    raw.remove("country");
    let err = engine()
        .evaluate_segments(&raw, [("s", "level > 1")])
        .unwrap_err();
    assert_eq!(
        err,
        SdkError::Validation(ValidationError::MissingField {
            field: "country".to_string()
        })
    );
}

#[test]
fn test_first_failing_segment_is_reported() {
    let err = engine()
        .evaluate_segments(
            &user(),
            [("ok", "level > 1"), ("bad", "score > 1"), ("worse", "(")],
        )
        .unwrap_err();
    match err {
        SdkError::Segment { segment, source } => {
            assert_eq!(segment, "bad");
            assert!(matches!(source, RuleError::UnknownField(_)));
        }
        other => panic!("Expected segment error, got {:?}", other),
    }
}

#[test]
fn test_strict_records() {
    let mut raw = user();
    raw.insert("plan".to_string(), Value::from("pro"));

    assert!(engine().build_record(&raw).is_ok());

    let strict = SegmentEngine::builder()
        .with_config(EngineConfig::new().strict_records(true))
        .with_clock(FixedClock(NOW))
        .build();
    assert_eq!(
        strict.build_record(&raw).unwrap_err(),
        SdkError::Validation(ValidationError::UnknownField {
            field: "plan".to_string()
        })
    );
}

#[test]
fn test_evaluate_at_overrides_clock() {
    let engine = engine();
    let record = engine.build_record(&user()).unwrap();
    let rules = [("recent", "last_session > _now() - 120")];

    assert_eq!(engine.evaluate(&record, rules).unwrap().get("recent"), Some(true));
    assert_eq!(
        engine.evaluate_at(&record, rules, NOW + 3600).unwrap().get("recent"),
        Some(false)
    );
}

#[test]
fn test_evaluate_request() {
    let request: SegmentRequest = serde_json::from_value(serde_json::json!({
        "user": user(),
        "segments": {"lvl": "level between 1 and 3"},
    }))
    .unwrap();
    let results = engine().evaluate_request(&request).unwrap();
    assert_eq!(results.get("lvl"), Some(true));
}

#[test]
fn test_engine_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SegmentEngine>();
}
