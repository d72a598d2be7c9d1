//! Core SegmentEngine implementation

use super::types::{SegmentRequest, SegmentResults};
use crate::builder::SegmentEngineBuilder;
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use segment_core::{evaluate_rule, Record, Validator, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Evaluates named segment rules against user records.
///
/// The engine holds no per-request state and can be shared across threads
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SegmentEngine {
    /// Configuration
    config: EngineConfig,

    /// Record validator derived from the configuration
    validator: Validator,

    /// Source of `_now()`
    clock: Arc<dyn Clock>,
}

impl SegmentEngine {
    /// Create an engine that reads the system clock
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub(crate) fn with_clock(config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        let validator = Validator::new().allow_unknown_fields(!config.strict_records);
        Self {
            config,
            validator,
            clock,
        }
    }

    pub fn builder() -> SegmentEngineBuilder {
        SegmentEngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current timestamp from the engine's clock
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// Validate raw attributes into a record
    pub fn build_record(&self, raw: &HashMap<String, Value>) -> Result<Record> {
        Ok(self.validator.build_record(raw)?)
    }

    /// Evaluate rules against a record, sampling the clock once
    pub fn evaluate<'r, I>(&self, record: &Record, rules: I) -> Result<SegmentResults>
    where
        I: IntoIterator<Item = (&'r str, &'r str)>,
    {
        self.evaluate_at(record, rules, self.now())
    }

    /// Evaluate rules against a record with `_now()` bound to `now`.
    ///
    /// Segments run in iteration order and the first failure aborts the
    /// whole call.
    pub fn evaluate_at<'r, I>(&self, record: &Record, rules: I, now: i64) -> Result<SegmentResults>
    where
        I: IntoIterator<Item = (&'r str, &'r str)>,
    {
        let mut results = SegmentResults::default();
        for (name, rule) in rules {
            let matched = evaluate_rule(rule, record, now).map_err(|source| {
                tracing::debug!(segment = name, error = %source, "segment failed");
                SdkError::Segment {
                    segment: name.to_string(),
                    source,
                }
            })?;
            if self.config.trace_segments {
                tracing::debug!(segment = name, rule, matched, "segment evaluated");
            }
            results.push(name.to_string(), matched);
        }
        Ok(results)
    }

    /// Validate raw attributes and evaluate every rule against them
    pub fn evaluate_segments<'r, I>(
        &self,
        raw: &HashMap<String, Value>,
        rules: I,
    ) -> Result<SegmentResults>
    where
        I: IntoIterator<Item = (&'r str, &'r str)>,
    {
        let start = Instant::now();
        let record = self.build_record(raw).map_err(|e| {
            tracing::debug!(error = %e, "user record rejected");
            e
        })?;
        let now = self.now();
        let results = self.evaluate_at(&record, rules, now)?;

        tracing::debug!(
            segments = results.len(),
            matched = results.matched().count(),
            now,
            elapsed_us = start.elapsed().as_micros() as u64,
            "segments evaluated"
        );
        Ok(results)
    }

    /// Evaluate a full request
    pub fn evaluate_request(&self, request: &SegmentRequest) -> Result<SegmentResults> {
        self.evaluate_segments(&request.user, request.segments.iter())
    }
}

impl Default for SegmentEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
