//! Expression tree definitions for segment rules

pub mod expression;
pub mod operator;

pub use expression::{Expression, Literal, Operand};
pub use operator::{ArithOperator, Operator};
