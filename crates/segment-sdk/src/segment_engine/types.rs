//! Request/Response types for SegmentEngine

use indexmap::IndexMap;
use segment_core::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named segment rules in evaluation order.
///
/// Serialized as a JSON object. Deserialization keeps the order keys appear
/// in the input; a repeated name keeps its first position and its last rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentRules {
    rules: IndexMap<String, String>,
}

impl SegmentRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment, replacing the rule of an existing one with that name
    pub fn insert(&mut self, name: impl Into<String>, rule: impl Into<String>) {
        self.rules.insert(name.into(), rule.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, rule: impl Into<String>) -> Self {
        self.insert(name, rule);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.rules.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|(n, r)| (n.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// IndexMap equality ignores order; segment order is significant here
impl PartialEq for SegmentRules {
    fn eq(&self, other: &Self) -> bool {
        self.rules.iter().eq(other.rules.iter())
    }
}

impl Eq for SegmentRules {}

impl<N: Into<String>, R: Into<String>> FromIterator<(N, R)> for SegmentRules {
    fn from_iter<I: IntoIterator<Item = (N, R)>>(iter: I) -> Self {
        let mut rules = SegmentRules::new();
        for (name, rule) in iter {
            rules.insert(name, rule);
        }
        rules
    }
}

/// Segment evaluation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentRequest {
    /// Raw user attributes
    pub user: HashMap<String, Value>,

    /// Segments to evaluate
    pub segments: SegmentRules,
}

impl SegmentRequest {
    pub fn new(user: HashMap<String, Value>, segments: SegmentRules) -> Self {
        Self { user, segments }
    }
}

/// Segment membership results in evaluation order.
///
/// Serialized as a JSON object `{"name": true, ...}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SegmentResults {
    results: IndexMap<String, bool>,
}

impl SegmentResults {
    pub(crate) fn push(&mut self, name: String, matched: bool) {
        self.results.insert(name, matched);
    }

    /// Membership for a segment
    pub fn get(&self, name: &str) -> Option<bool> {
        self.results.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.results.iter().map(|(n, m)| (n.as_str(), *m))
    }

    /// Names of the segments the user belongs to
    pub fn matched(&self) -> impl Iterator<Item = &str> {
        self.results.iter().filter(|(_, m)| **m).map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl PartialEq for SegmentResults {
    fn eq(&self, other: &Self) -> bool {
        self.results.iter().eq(other.results.iter())
    }
}

impl Eq for SegmentResults {}
