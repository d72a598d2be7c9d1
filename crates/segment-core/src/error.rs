//! Error types for rule parsing and evaluation

use crate::arith::ArithError;
use crate::condition::EvalError;
use thiserror::Error;

/// Structural problem in rule text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Unbalanced parentheses in SQL condition")]
    UnbalancedParens,

    #[error("Empty SQL condition")]
    EmptyCondition,

    #[error("Invalid SQL operator syntax: '{operator}'")]
    InvalidOperator { operator: String },

    #[error("Invalid condition format: {condition}")]
    UnrecognizedForm { condition: String },

    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("Unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("Condition nested too deeply")]
    NestingTooDeep,
}

/// Rule references fields outside the record schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown fields in segment rule: {}", .fields.join(", "))]
pub struct UnknownFieldError {
    pub fields: Vec<String>,
}

/// Any failure while parsing or evaluating one rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Invalid SQL syntax: {0}")]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),

    #[error("Invalid expression: {0}")]
    Arith(#[from] ArithError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, RuleError>;
