//! SQL LIKE patterns
//!
//! - `%` matches any sequence of characters (including empty)
//! - `_` matches exactly one character
//!
//! Matching is case-sensitive and anchored to the whole value.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

/// A compiled LIKE pattern
#[derive(Clone)]
pub struct LikePattern {
    /// SQL LIKE pattern as written in the rule
    pattern: String,
    /// Anchored regex equivalent
    regex: Regex,
}

impl LikePattern {
    /// Compile a LIKE pattern
    pub fn new(pattern: impl Into<String>) -> Result<Self, regex::Error> {
        let pattern = pattern.into();
        let regex = Regex::new(&Self::to_regex(&pattern))?;
        Ok(Self { pattern, regex })
    }

    /// Translate a LIKE pattern into an anchored regex source
    fn to_regex(pattern: &str) -> String {
        let mut regex_pattern = String::with_capacity(pattern.len() * 2 + 8);
        // `.` must also match newlines
        regex_pattern.push_str("(?s)^");

        let mut literal = String::new();
        for c in pattern.chars() {
            match c {
                '%' | '_' => {
                    regex_pattern.push_str(&regex::escape(&literal));
                    literal.clear();
                    regex_pattern.push_str(if c == '%' { ".*" } else { "." });
                }
                _ => literal.push(c),
            }
        }
        regex_pattern.push_str(&regex::escape(&literal));

        regex_pattern.push('$');
        regex_pattern
    }

    /// Check whether the whole value matches
    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl PartialEq for LikePattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl fmt::Debug for LikePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LikePattern").field(&self.pattern).finish()
    }
}

impl Serialize for LikePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.pattern)
    }
}
