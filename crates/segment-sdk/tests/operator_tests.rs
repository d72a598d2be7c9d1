//! Integration tests for operators
//!
//! Tests that every operator form works end-to-end from rule text through
//! record validation and evaluation.

#[macro_use]
mod common;

use common::{base_user, user_with, ResultAssertions, TestEngine, DAY, NOW};

// ============================================================================
// Comparison Operators
// ============================================================================

#[test]
fn test_integer_comparisons() {
    let results = TestEngine::new()
        .with_segment("gt", "level > 4")
        .with_segment("ge", "level >= 5")
        .with_segment("lt", "level < 5")
        .with_segment("le", "level <= 5")
        .with_segment("eq", "level = 5")
        .with_segment("ne", "level != 5")
        .run(base_user());

    results.assert_in("gt");
    results.assert_in("ge");
    results.assert_not_in("lt");
    results.assert_in("le");
    results.assert_in("eq");
    results.assert_not_in("ne");
}

#[test]
fn test_text_comparisons() {
    let results = TestEngine::new()
        .with_segment("us", "country = 'US'")
        .with_segment("us_double", "country = \"US\"")
        .with_segment("not_ca", "country != 'CA'")
        .with_segment("case", "country = 'us'")
        .with_segment("ordered", "country > 'CA'")
        .run(base_user());

    results.assert_in("us");
    results.assert_in("us_double");
    results.assert_in("not_ca");
    results.assert_not_in("case");
    results.assert_in("ordered");
}

#[test]
fn test_arithmetic_operands() {
    let results = TestEngine::new()
        .with_segment("big_spender", "purchase_amount >= 100 * 12")
        .with_segment("truncation", "level = 11 / 2")
        .with_segment("negative", "level > -1")
        .with_segment("grouped", "level = (2 + 3) * (4 - 3)")
        .run(base_user());

    results.assert_in("big_spender");
    results.assert_in("truncation");
    results.assert_in("negative");
    results.assert_in("grouped");
}

// ============================================================================
// BETWEEN
// ============================================================================

#[test]
fn test_between_is_inclusive() {
    let results = TestEngine::new()
        .with_segment("low_edge", "level between 5 and 10")
        .with_segment("high_edge", "level between 1 and 5")
        .with_segment("outside", "level between 6 and 10")
        .with_segment("reversed", "level between 10 and 1")
        .with_segment("negated", "level not between 6 and 10")
        .run(base_user());

    results.assert_in("low_edge");
    results.assert_in("high_edge");
    results.assert_not_in("outside");
    results.assert_not_in("reversed");
    results.assert_in("negated");
}

#[test]
fn test_between_with_time_window() {
    let results = TestEngine::new()
        .with_segment("bought_last_fortnight", "last_purchase_at between _now() - 14 * 86400 and _now()")
        .run(base_user());
    results.assert_in("bought_last_fortnight");

    let results = TestEngine::new()
        .with_segment("bought_last_fortnight", "last_purchase_at between _now() - 14 * 86400 and _now()")
        .run(user_with(user! { "last_purchase_at" => NOW - 30 * DAY }));
    results.assert_not_in("bought_last_fortnight");
}

// ============================================================================
// IN
// ============================================================================

#[test]
fn test_in_text() {
    let results = TestEngine::new()
        .with_segment("na", "country in ('US', 'CA', 'MX')")
        .with_segment("eu", "country IN ('DE', 'FR')")
        .with_segment("not_eu", "country not in ('DE', 'FR')")
        .with_segment("empty", "country in ()")
        .run(base_user());

    results.assert_in("na");
    results.assert_not_in("eu");
    results.assert_in("not_eu");
    results.assert_not_in("empty");
}

#[test]
fn test_in_numeric() {
    let results = TestEngine::new()
        .with_segment("plain", "level in (1, 3, 5)")
        .with_segment("quoted", "level in ('5')")
        .with_segment("formula", "level in (2 + 3)")
        .with_segment("miss", "level in (2, 4)")
        .run(base_user());

    results.assert_in("plain");
    results.assert_in("quoted");
    results.assert_in("formula");
    results.assert_not_in("miss");
}

// ============================================================================
// LIKE
// ============================================================================

#[test]
fn test_like() {
    let results = TestEngine::new()
        .with_segment("prefix", "id like 'user-%'")
        .with_segment("single", "country like 'U_'")
        .with_segment("too_short", "country like '_'")
        .with_segment("anchored", "id like 'user'")
        .with_segment("negated", "id not like 'admin%'")
        .with_segment("numeric", "purchase_amount like '12%'")
        .run(base_user());

    results.assert_in("prefix");
    results.assert_in("single");
    results.assert_not_in("too_short");
    results.assert_not_in("anchored");
    results.assert_in("negated");
    results.assert_in("numeric");
}

#[test]
fn test_like_treats_regex_characters_literally() {
    let results = TestEngine::new()
        .with_segment("dot", "id like 'user.001'")
        .with_segment("brackets", "id like '[u]%'")
        .run(user_with(user! { "id" => "[u]ser.001" }));

    results.assert_not_in("dot");
    results.assert_in("brackets");
}
