//! Integration tests for segment logic
//!
//! Covers boolean composition, `_now()` handling, request ordering and the
//! error surface of `SegmentEngine`.

#[macro_use]
mod common;

use common::{base_user, user_with, ResultAssertions, TestEngine, DAY, NOW};
use segment_sdk::{RuleError, SdkError, ValidationError, Value};

// ============================================================================
// Boolean Composition
// ============================================================================

#[test]
fn test_precedence() {
    let results = TestEngine::new()
        // parsed as: country = 'DE' or (level > 3 and purchase_amount > 0)
        .with_segment("and_first", "country = 'DE' or level > 3 and purchase_amount > 0")
        // parsed as: (not country = 'US') and level > 3
        .with_segment("not_first", "not country = 'US' and level > 3")
        .with_segment("grouped", "(country = 'DE' or level > 3) and purchase_amount > 0")
        .run(base_user());

    results.assert_in("and_first");
    results.assert_not_in("not_first");
    results.assert_in("grouped");
}

#[test]
fn test_keywords_are_case_insensitive() {
    let results = TestEngine::new()
        .with_segment("mixed", "level > 1 AnD country = 'US' oR NoT level > 1")
        .with_segment("upper", "LEVEL > 1")
        .try_run(base_user());
    // keywords fold case, field names do not
    assert!(matches!(
        results,
        Err(SdkError::Segment { ref segment, source: RuleError::UnknownField(_) }) if segment == "upper"
    ));

    let results = TestEngine::new()
        .with_segment("mixed", "level > 1 AnD country = 'US' oR NoT level > 1")
        .with_segment("between", "level BeTwEeN 1 AND 9")
        .run(base_user());
    results.assert_in("mixed");
    results.assert_in("between");
}

#[test]
fn test_keyword_substrings_in_strings_do_not_split() {
    let results = TestEngine::new()
        .with_segment("literal", "id = 'sand or stone' and level > 1")
        .run(user_with(user! { "id" => "sand or stone" }));
    results.assert_in("literal");
}

#[test]
fn test_double_negation() {
    let results = TestEngine::new()
        .with_segment("once", "not level > 3")
        .with_segment("twice", "not not level > 3")
        .with_segment("grouped", "not (not (level > 3))")
        .run(base_user());

    results.assert_not_in("once");
    results.assert_in("twice");
    results.assert_in("grouped");
}

// ============================================================================
// Time
// ============================================================================

#[test]
fn test_recency_segments() {
    let engine = TestEngine::new()
        .with_segment("active_48h", "last_session > _now() - 2 * 86400")
        .with_segment("new_user", "first_session > _now() - 30 * 86400")
        .with_segment("lapsed_buyer", "purchase_amount > 0 and last_purchase_at < _now() - 30 * 86400");

    let results = engine.run(base_user());
    results.assert_in("active_48h");
    results.assert_not_in("new_user");
    results.assert_not_in("lapsed_buyer");

    let results = engine.run(user_with(user! {
        "first_session" => NOW - 3 * DAY,
        "last_session" => NOW - 3 * DAY,
        "last_purchase_at" => NOW - 60 * DAY,
    }));
    results.assert_not_in("active_48h");
    results.assert_in("new_user");
    results.assert_in("lapsed_buyer");
}

#[test]
fn test_now_is_consistent_across_segments() {
    let results = TestEngine::new()
        .with_segment("a", "last_session = _now()")
        .with_segment("b", "last_session >= _now() and last_session <= _now()")
        .run(user_with(user! { "last_session" => NOW }));

    results.assert_in("a");
    results.assert_in("b");
}

// ============================================================================
// Results
// ============================================================================

#[test]
fn test_results_follow_input_order() {
    let results = TestEngine::new()
        .with_segment("zulu", "level > 1")
        .with_segment("alpha", "level > 100")
        .with_segment("mike", "country = 'US'")
        .run(base_user());

    let names: Vec<&str> = results.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    assert_eq!(
        serde_json::to_value(&results).unwrap(),
        serde_json::json!({"zulu": true, "alpha": false, "mike": true})
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_validation_errors() {
    let engine = TestEngine::new().with_segment("s", "level > 1");

    let mut user = base_user();
    user.remove("id");
    assert_eq!(
        engine.try_run(user).unwrap_err().to_string(),
        "Missing required field: id"
    );

    let err = engine
        .try_run(user_with(user! { "level" => "five" }))
        .unwrap_err();
    assert_eq!(err.to_string(), "Field 'level' must be an integer, got string");

    let err = engine
        .try_run(user_with(user! { "purchase_amount" => -1 }))
        .unwrap_err();
    assert_eq!(err.to_string(), "Field 'purchase_amount' must be non-negative");

    let err = engine.try_run(user_with(user! { "country" => "" })).unwrap_err();
    assert_eq!(err.to_string(), "Field 'country' cannot be empty");

    let err = engine
        .try_run(user_with(user! { "level" => Value::Null }))
        .unwrap_err();
    assert_eq!(err.to_string(), "Field 'level' cannot be null");
}

#[test]
fn test_extra_fields() {
    let engine = TestEngine::new().with_segment("s", "level > 1");
    let extra = user_with(user! { "plan" => "pro" });

    engine.run(extra.clone()).assert_in("s");

    let err = engine.strict().try_run(extra).unwrap_err();
    assert_eq!(
        err,
        SdkError::Validation(ValidationError::UnknownField {
            field: "plan".to_string()
        })
    );
}

#[test]
fn test_segment_error_messages() {
    let cases = [
        ("level > 1 and (country = 'US'", "Invalid SQL syntax: Unbalanced parentheses in SQL condition"),
        ("", "Invalid SQL syntax: Empty SQL condition"),
        ("level >> 1", "Invalid SQL syntax: Invalid SQL operator syntax: '>>'"),
        ("score > 1 or tier = 'gold'", "Unknown fields in segment rule: score, tier"),
        ("level > 1 / 0", "Invalid expression: Division by zero"),
    ];

    for (rule, cause) in cases {
        let err = TestEngine::new()
            .with_segment("broken", rule)
            .try_run(base_user())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Error in segment 'broken': {}", cause),
            "rule: {:?}",
            rule
        );
    }
}

#[test]
fn test_type_mismatch_is_segment_error() {
    let err = TestEngine::new()
        .with_segment("mismatch", "country > 5")
        .try_run(base_user())
        .unwrap_err();
    match err {
        SdkError::Segment { segment, source } => {
            assert_eq!(segment, "mismatch");
            assert!(matches!(source, RuleError::Eval(_)));
        }
        other => panic!("Expected segment error, got {:?}", other),
    }
}

#[test]
fn test_first_error_stops_evaluation() {
    let err = TestEngine::new()
        .with_segment("fine", "level > 1")
        .with_segment("first_bad", "nope = 1")
        .with_segment("second_bad", "(")
        .try_run(base_user())
        .unwrap_err();
    assert_eq!(err.segment(), Some("first_bad"));
}
