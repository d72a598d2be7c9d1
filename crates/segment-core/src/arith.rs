//! Restricted integer arithmetic
//!
//! Operands in rules (comparison right-hand sides, BETWEEN bounds, numeric IN
//! elements) may be small formulas such as `1700000000 - 86400 * 7`. This
//! module parses and evaluates them without touching any other state: the
//! only accepted characters are digits, `+ - * /`, parentheses and spaces.
//!
//! Division truncates toward zero at every `/`, so `7 / 2 * 2` is `6`.

use crate::ast::ArithOperator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum parenthesis / unary nesting accepted
const MAX_DEPTH: usize = 64;

/// Maximum binary operators in one expression; bounds the depth of the tree
const MAX_OPERATORS: usize = 1024;

/// Arithmetic error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithError {
    #[error("Invalid character '{ch}' in expression: {expression}")]
    InvalidCharacter { ch: char, expression: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Malformed expression '{expression}': {reason}")]
    Malformed { expression: String, reason: String },

    #[error("Integer overflow")]
    Overflow,
}

/// Parsed integer expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithExpr {
    Literal(i64),
    Neg(Box<ArithExpr>),
    Binary {
        op: ArithOperator,
        lhs: Box<ArithExpr>,
        rhs: Box<ArithExpr>,
    },
}

impl ArithExpr {
    /// Evaluate to an integer
    pub fn eval(&self) -> Result<i64, ArithError> {
        match self {
            ArithExpr::Literal(n) => Ok(*n),
            ArithExpr::Neg(inner) => inner.eval()?.checked_neg().ok_or(ArithError::Overflow),
            ArithExpr::Binary { op, lhs, rhs } => {
                let l = lhs.eval()?;
                let r = rhs.eval()?;
                match op {
                    ArithOperator::Add => l.checked_add(r).ok_or(ArithError::Overflow),
                    ArithOperator::Sub => l.checked_sub(r).ok_or(ArithError::Overflow),
                    ArithOperator::Mul => l.checked_mul(r).ok_or(ArithError::Overflow),
                    ArithOperator::Div => {
                        if r == 0 {
                            return Err(ArithError::DivisionByZero);
                        }
                        // i64 division already truncates toward zero
                        l.checked_div(r).ok_or(ArithError::Overflow)
                    }
                }
            }
        }
    }

    /// Returns the value if the expression is a bare literal
    pub fn as_literal(&self) -> Option<i64> {
        match self {
            ArithExpr::Literal(n) => Some(*n),
            _ => None,
        }
    }
}

/// Parse an arithmetic expression
pub fn parse(text: &str) -> Result<ArithExpr, ArithError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    if let Some(ch) = compact
        .chars()
        .find(|c| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')')))
    {
        return Err(ArithError::InvalidCharacter {
            ch,
            expression: text.trim().to_string(),
        });
    }

    let mut parser = ArithParser {
        input: compact.as_bytes(),
        source: &compact,
        pos: 0,
        depth: 0,
        operators: 0,
    };
    let expr = parser.parse_sum()?;
    if parser.pos < parser.input.len() {
        return Err(parser.malformed(format!(
            "unexpected '{}' at position {}",
            parser.input[parser.pos] as char, parser.pos
        )));
    }
    Ok(expr)
}

/// Parse and evaluate an arithmetic expression
pub fn evaluate(text: &str) -> Result<i64, ArithError> {
    parse(text)?.eval()
}

/// Recursive-descent parser over the whitespace-free input
struct ArithParser<'a> {
    input: &'a [u8],
    source: &'a str,
    pos: usize,
    depth: usize,
    operators: usize,
}

impl<'a> ArithParser<'a> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn malformed(&self, reason: impl Into<String>) -> ArithError {
        ArithError::Malformed {
            expression: self.source.to_string(),
            reason: reason.into(),
        }
    }

    /// sum := product (('+' | '-') product)*
    fn parse_sum(&mut self) -> Result<ArithExpr, ArithError> {
        let mut lhs = self.parse_product()?;
        while let Some(op) = self.peek().and_then(|b| ArithOperator::from_char(b as char)) {
            if op.is_multiplicative() {
                break;
            }
            self.pos += 1;
            self.count_operator()?;
            let rhs = self.parse_product()?;
            lhs = ArithExpr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    /// product := unary (('*' | '/') unary)*
    fn parse_product(&mut self) -> Result<ArithExpr, ArithError> {
        let mut lhs = self.parse_unary()?;
        while let Some(op) = self.peek().and_then(|b| ArithOperator::from_char(b as char)) {
            if !op.is_multiplicative() {
                break;
            }
            self.pos += 1;
            self.count_operator()?;
            let rhs = self.parse_unary()?;
            lhs = ArithExpr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    /// unary := ('+' | '-') unary | primary
    fn parse_unary(&mut self) -> Result<ArithExpr, ArithError> {
        match self.peek() {
            Some(b'-') | Some(b'+') => {
                let negate = self.peek() == Some(b'-');
                self.pos += 1;
                self.enter()?;
                let inner = self.parse_unary()?;
                self.depth -= 1;
                Ok(if negate {
                    ArithExpr::Neg(Box::new(inner))
                } else {
                    inner
                })
            }
            _ => self.parse_primary(),
        }
    }

    /// primary := digits | '(' sum ')'
    fn parse_primary(&mut self) -> Result<ArithExpr, ArithError> {
        match self.peek() {
            Some(b'(') => {
                self.pos += 1;
                self.enter()?;
                let inner = self.parse_sum()?;
                self.depth -= 1;
                if self.peek() != Some(b')') {
                    return Err(self.malformed("missing closing parenthesis"));
                }
                self.pos += 1;
                Ok(inner)
            }
            Some(b) if b.is_ascii_digit() => {
                let start = self.pos;
                while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1;
                }
                self.source[start..self.pos]
                    .parse::<i64>()
                    .map(ArithExpr::Literal)
                    .map_err(|_| ArithError::Overflow)
            }
            Some(b) => Err(self.malformed(format!(
                "unexpected '{}' at position {}",
                b as char, self.pos
            ))),
            None => Err(self.malformed("unexpected end of expression")),
        }
    }

    fn count_operator(&mut self) -> Result<(), ArithError> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(self.malformed(format!("more than {} operators", MAX_OPERATORS)));
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<(), ArithError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.malformed("nesting too deep"));
        }
        Ok(())
    }
}
