//! SegmentEngine - Main API for evaluating segments
//!
//! The module is organized into:
//! - `types`: Request/Response types (SegmentRequest, SegmentRules, SegmentResults)
//! - `engine`: Core SegmentEngine implementation
//! - `tests`: Unit tests (test-only)

mod engine;
mod types;

pub use engine::SegmentEngine;
pub use types::{SegmentRequest, SegmentResults, SegmentRules};

#[cfg(test)]
mod tests;
