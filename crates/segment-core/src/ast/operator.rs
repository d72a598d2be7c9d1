//! Operators for segment rule expressions

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Relational operators used by `field <op> operand` comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (=)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
}

impl Operator {
    /// Parse an operator token. `==` and `<>` are not part of the language.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Operator::Eq),
            "!=" => Some(Operator::Ne),
            ">" => Some(Operator::Gt),
            ">=" => Some(Operator::Ge),
            "<" => Some(Operator::Lt),
            "<=" => Some(Operator::Le),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
        }
    }

    /// Apply the operator to the ordering of `left` relative to `right`
    pub fn test(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
        }
    }

    /// Compare two values with this operator
    pub fn compare<T: Ord + ?Sized>(&self, left: &T, right: &T) -> bool {
        self.test(left.cmp(right))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Integer arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithOperator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/), truncating toward zero
    Div,
}

impl ArithOperator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(ArithOperator::Add),
            '-' => Some(ArithOperator::Sub),
            '*' => Some(ArithOperator::Mul),
            '/' => Some(ArithOperator::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            ArithOperator::Add => '+',
            ArithOperator::Sub => '-',
            ArithOperator::Mul => '*',
            ArithOperator::Div => '/',
        }
    }

    /// Returns true for `*` and `/`
    pub fn is_multiplicative(&self) -> bool {
        matches!(self, ArithOperator::Mul | ArithOperator::Div)
    }
}
