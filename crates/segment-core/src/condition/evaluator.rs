//! Expression evaluation against a validated record

use crate::arith::ArithError;
use crate::ast::{Expression, Literal, Operand};
use crate::types::{FieldType, FieldValue, Record};
use thiserror::Error;

/// Evaluation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Type mismatch for field '{field}': cannot compare {field_type} with {operand_type}")]
    TypeMismatch {
        field: String,
        field_type: FieldType,
        operand_type: FieldType,
    },

    #[error("Field '{field}' not found in user record")]
    UnknownField { field: String },

    #[error("Invalid expression: {0}")]
    Arith(#[from] ArithError),
}

/// Evaluate an expression tree against a record.
///
/// AND/OR short-circuit left to right, so an error in a child that is never
/// reached is not reported.
pub fn evaluate(expr: &Expression, record: &Record) -> Result<bool, EvalError> {
    match expr {
        Expression::Or(children) => {
            for child in children {
                if evaluate(child, record)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Expression::And(children) => {
            for child in children {
                if !evaluate(child, record)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Expression::Not(inner) => Ok(!evaluate(inner, record)?),

        Expression::Comparison { field, op, operand } => {
            match (lookup(record, field)?, operand) {
                (FieldValue::Text(value), Operand::Text(text)) => {
                    Ok(op.compare(value.as_str(), text.as_str()))
                }
                (FieldValue::Integer(value), Operand::Arith(arith)) => {
                    Ok(op.compare(value, &arith.eval()?))
                }
                (value, operand) => Err(mismatch(field, value, operand_type(operand))),
            }
        }

        Expression::Between { field, lower, upper } => match lookup(record, field)? {
            FieldValue::Integer(value) => {
                let lower = lower.eval()?;
                let upper = upper.eval()?;
                Ok(lower <= *value && *value <= upper)
            }
            value => Err(mismatch(field, value, FieldType::Integer)),
        },

        Expression::In { field, values } => {
            let value = lookup(record, field)?;
            Ok(values.iter().any(|literal| literal_matches(value, literal)))
        }

        Expression::Like { field, pattern } => {
            let value = lookup(record, field)?;
            Ok(match value {
                FieldValue::Text(s) => pattern.matches(s),
                FieldValue::Integer(i) => pattern.matches(&i.to_string()),
            })
        }
    }
}

fn lookup<'r>(record: &'r Record, field: &str) -> Result<&'r FieldValue, EvalError> {
    record.get(field).ok_or_else(|| EvalError::UnknownField {
        field: field.to_string(),
    })
}

fn operand_type(operand: &Operand) -> FieldType {
    match operand {
        Operand::Text(_) => FieldType::Text,
        Operand::Arith(_) => FieldType::Integer,
    }
}

fn mismatch(field: &str, value: &FieldValue, operand_type: FieldType) -> EvalError {
    EvalError::TypeMismatch {
        field: field.to_string(),
        field_type: value.field_type(),
        operand_type,
    }
}

fn literal_matches(value: &FieldValue, literal: &Literal) -> bool {
    match (value, literal) {
        (FieldValue::Text(v), Literal::Text(l)) => v == l,
        (FieldValue::Integer(v), Literal::Integer(l)) => v == l,
        _ => false,
    }
}
