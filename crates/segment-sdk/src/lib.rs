//! Segment Engine SDK
//!
//! High-level API for evaluating named segment rules against user records.

pub mod builder;
pub mod clock;
pub mod config;
pub mod error;
pub mod segment_engine;

// Re-export main types
pub use builder::SegmentEngineBuilder;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use error::{Result, SdkError};
pub use segment_engine::{SegmentEngine, SegmentRequest, SegmentResults, SegmentRules};

// Re-export commonly used types from dependencies
pub use segment_core::{Record, RuleError, ValidationError, Value};
