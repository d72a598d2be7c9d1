//! Segment rule language
//!
//! Rules are SQL-like boolean conditions over the fields of a user record.
//!
//! # Syntax
//!
//! ## Comparisons
//! ```text
//! level >= 3
//! country = 'US'
//! last_session > _now() - 86400 * 7
//! ```
//!
//! ## Predicates
//! ```text
//! purchase_amount between 100 and 500
//! country in ('US', 'CA')
//! id like 'beta-%'
//! country not in ('RU')
//! ```
//!
//! ## Combinators
//! `and`, `or` and `not` (case-insensitive), grouped with parentheses.
//! `not` binds tightest, then `and`, then `or`.
//!
//! ## Supported Operators
//! - `=` (equal)
//! - `!=` (not equal)
//! - `>` / `>=` (greater than / or equal)
//! - `<` / `<=` (less than / or equal)
//!
//! ## Time
//! `_now()` is replaced with the evaluation timestamp (Unix seconds) before
//! parsing. Every occurrence in one rule sees the same value.

mod evaluator;
mod lexer;
mod like;
mod parser;

pub use evaluator::{evaluate, EvalError};
pub use lexer::{tokenize, Token, TokenKind};
pub use like::LikePattern;
pub use parser::{parse, RuleParser, NOW_TOKEN};
