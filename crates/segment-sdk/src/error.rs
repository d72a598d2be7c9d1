//! SDK error types

use segment_core::{RuleError, ValidationError};
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkError {
    /// The user record failed schema validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A segment rule failed to parse or evaluate
    #[error("Error in segment '{segment}': {source}")]
    Segment { segment: String, source: RuleError },
}

impl SdkError {
    /// Name of the failing segment, if any
    pub fn segment(&self) -> Option<&str> {
        match self {
            SdkError::Segment { segment, .. } => Some(segment),
            SdkError::Validation(_) => None,
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
