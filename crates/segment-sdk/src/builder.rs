//! Builder pattern for SegmentEngine

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::segment_engine::SegmentEngine;
use std::sync::Arc;

/// Builder for SegmentEngine
///
/// # Example
///
/// ```rust
/// use segment_sdk::{FixedClock, SegmentEngineBuilder};
///
/// let engine = SegmentEngineBuilder::new()
///     .strict_records(true)
///     .with_clock(FixedClock(1_700_000_000))
///     .build();
/// assert_eq!(engine.now(), 1_700_000_000);
/// ```
#[derive(Debug, Default)]
pub struct SegmentEngineBuilder {
    config: EngineConfig,
    clock: Option<Arc<dyn Clock>>,
}

impl SegmentEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Reject record fields outside the schema
    pub fn strict_records(mut self, strict: bool) -> Self {
        self.config.strict_records = strict;
        self
    }

    /// Log every segment outcome
    pub fn trace_segments(mut self, enable: bool) -> Self {
        self.config.trace_segments = enable;
        self
    }

    /// Use a custom time source for `_now()`
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build the engine
    pub fn build(self) -> SegmentEngine {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        tracing::debug!(strict_records = self.config.strict_records, "building segment engine");
        SegmentEngine::with_clock(self.config, clock)
    }
}
