//! Segment Core - Rule language and record model for the segment engine
//!
//! This crate provides the building blocks used by the SDK and server:
//! - Record types and schema validation
//! - Restricted integer arithmetic
//! - Rule parsing into an expression tree
//! - Expression evaluation against a record
//! - Error types

pub mod arith;
pub mod ast;
pub mod condition;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::Expression;
pub use condition::{EvalError, RuleParser};
pub use error::{Result, RuleError, SyntaxError, UnknownFieldError};
pub use types::{Record, ValidationError, Validator, Value};

/// Parse `rule` with `_now()` bound to `now` and evaluate it against `record`
pub fn evaluate_rule(rule: &str, record: &Record, now: i64) -> Result<bool> {
    let expr = RuleParser::new(now).parse(rule)?;
    Ok(condition::evaluate(&expr, record)?)
}
