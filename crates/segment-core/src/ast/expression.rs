//! Rule expression tree

use super::operator::Operator;
use crate::arith::ArithExpr;
use crate::condition::LikePattern;
use serde::Serialize;
use std::fmt;

/// Boolean expression tree produced by [`crate::condition::RuleParser`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    /// At least one child must be true
    Or(Vec<Expression>),

    /// All children must be true
    And(Vec<Expression>),

    /// Logical negation
    Not(Box<Expression>),

    /// `field <op> operand`
    Comparison {
        field: String,
        op: Operator,
        operand: Operand,
    },

    /// `field BETWEEN lower AND upper`, inclusive
    Between {
        field: String,
        lower: ArithExpr,
        upper: ArithExpr,
    },

    /// `field IN (v1, v2, ...)`
    In { field: String, values: Vec<Literal> },

    /// `field LIKE 'pattern'`
    Like { field: String, pattern: LikePattern },
}

/// Right-hand side of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Operand {
    /// Quoted string literal
    Text(String),
    /// Integer formula
    Arith(ArithExpr),
}

/// Element of an IN list, already coerced to the field's type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Literal {
    Text(String),
    Integer(i64),
}

impl Expression {
    /// Create a negation
    pub fn not(inner: Expression) -> Self {
        Expression::Not(Box::new(inner))
    }

    /// Field referenced by a leaf node
    pub fn field(&self) -> Option<&str> {
        match self {
            Expression::Comparison { field, .. }
            | Expression::Between { field, .. }
            | Expression::In { field, .. }
            | Expression::Like { field, .. } => Some(field),
            Expression::Or(_) | Expression::And(_) | Expression::Not(_) => None,
        }
    }

    /// All fields referenced anywhere in the tree, in order of appearance
    pub fn fields(&self) -> Vec<&str> {
        let mut result = Vec::new();
        self.collect_fields(&mut result);
        result
    }

    fn collect_fields<'a>(&'a self, result: &mut Vec<&'a str>) {
        match self {
            Expression::Or(children) | Expression::And(children) => {
                for child in children {
                    child.collect_fields(result);
                }
            }
            Expression::Not(inner) => inner.collect_fields(result),
            leaf => {
                if let Some(field) = leaf.field() {
                    result.push(field);
                }
            }
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Text(s) => write!(f, "'{}'", s),
            Literal::Integer(i) => write!(f, "{}", i),
        }
    }
}
