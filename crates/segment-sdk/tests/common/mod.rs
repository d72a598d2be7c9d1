//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use segment_sdk::{
    FixedClock, SdkError, SegmentEngine, SegmentEngineBuilder, SegmentResults, SegmentRules, Value,
};
use std::collections::HashMap;

/// Helper to create user data from key-value pairs
#[macro_export]
macro_rules! user {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map: std::collections::HashMap<String, segment_sdk::Value> =
            std::collections::HashMap::new();
        $(
            map.insert($key.to_string(), segment_sdk::Value::from($value));
        )*
        map
    }};
}

/// Fixed "now" used by every test engine: 2023-11-14T22:13:20Z
pub const NOW: i64 = 1_700_000_000;
pub const DAY: i64 = 86_400;

/// Test helper bundling segment definitions with a frozen clock
pub struct TestEngine {
    segments: SegmentRules,
    strict: bool,
}

impl TestEngine {
    pub fn new() -> Self {
        Self {
            segments: SegmentRules::new(),
            strict: false,
        }
    }

    /// Add a named segment rule
    pub fn with_segment(mut self, name: &str, rule: &str) -> Self {
        self.segments.insert(name, rule);
        self
    }

    /// Reject unknown record fields
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    fn engine(&self) -> SegmentEngine {
        SegmentEngineBuilder::new()
            .strict_records(self.strict)
            .with_clock(FixedClock(NOW))
            .build()
    }

    /// Evaluate every segment, panicking on failure
    pub fn run(&self, user: HashMap<String, Value>) -> SegmentResults {
        self.try_run(user).expect("Evaluation failed")
    }

    pub fn try_run(&self, user: HashMap<String, Value>) -> Result<SegmentResults, SdkError> {
        self.engine().evaluate_segments(&user, self.segments.iter())
    }
}

/// A valid user with every field populated
pub fn base_user() -> HashMap<String, Value> {
    user! {
        "id" => "user-001",
        "level" => 5,
        "country" => "US",
        "first_session" => NOW - 90 * DAY,
        "last_session" => NOW - DAY,
        "purchase_amount" => 1200,
        "last_purchase_at" => NOW - 7 * DAY,
    }
}

/// `base_user` with some fields replaced
pub fn user_with(overrides: HashMap<String, Value>) -> HashMap<String, Value> {
    let mut user = base_user();
    user.extend(overrides);
    user
}

/// Assertion helpers for SegmentResults
pub trait ResultAssertions {
    fn assert_in(&self, segment: &str);
    fn assert_not_in(&self, segment: &str);
}

impl ResultAssertions for SegmentResults {
    fn assert_in(&self, segment: &str) {
        assert_eq!(
            self.get(segment),
            Some(true),
            "expected user to be in segment '{}', results: {:?}",
            segment,
            self
        );
    }

    fn assert_not_in(&self, segment: &str) {
        assert_eq!(
            self.get(segment),
            Some(false),
            "expected user not to be in segment '{}', results: {:?}",
            segment,
            self
        );
    }
}
