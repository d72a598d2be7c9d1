//! Configuration types for SegmentEngine

use serde::{Deserialize, Serialize};

/// Main engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Reject record fields outside the schema instead of ignoring them
    #[serde(default)]
    pub strict_records: bool,

    /// Log every segment outcome at debug level
    #[serde(default)]
    pub trace_segments: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict record validation
    pub fn strict_records(mut self, strict: bool) -> Self {
        self.strict_records = strict;
        self
    }

    /// Enable per-segment tracing
    pub fn trace_segments(mut self, enable: bool) -> Self {
        self.trace_segments = enable;
        self
    }
}
