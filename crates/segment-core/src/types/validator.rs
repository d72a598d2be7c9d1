//! Record validation against the user schema

use super::record::{FieldValue, Record};
use super::schema::{FieldType, Schema};
use super::value::Value;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Validation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Field present but null
    #[error("Field '{field}' cannot be null")]
    NullField { field: String },

    /// Type mismatch
    #[error("Field '{field}' must be {} {expected}, got {actual}", article(.expected))]
    TypeMismatch {
        field: String,
        expected: FieldType,
        actual: &'static str,
    },

    /// Empty text field
    #[error("Field '{field}' cannot be empty")]
    EmptyString { field: String },

    /// Negative numeric field
    #[error("Field '{field}' must be non-negative")]
    Negative { field: String },

    /// Field outside the schema (strict mode only)
    #[error("Unknown field: {field}")]
    UnknownField { field: String },
}

fn article(field_type: &FieldType) -> &'static str {
    match field_type {
        FieldType::Integer => "an",
        FieldType::Text => "a",
    }
}

/// Builds [`Record`]s from raw input
#[derive(Debug, Clone)]
pub struct Validator {
    /// Whether to allow unknown fields
    allow_unknown_fields: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            allow_unknown_fields: true,
        }
    }

    /// Allow unknown fields in validation
    pub fn allow_unknown_fields(mut self, allow: bool) -> Self {
        self.allow_unknown_fields = allow;
        self
    }

    /// Validate raw input and build a record.
    ///
    /// Missing fields are reported before anything else. Then every present
    /// field is checked in schema order, followed by any extra fields.
    pub fn build_record(&self, raw: &HashMap<String, Value>) -> Result<Record, ValidationError> {
        if let Some(missing) = Schema::fields().iter().find(|f| !raw.contains_key(f.name)) {
            return Err(ValidationError::MissingField {
                field: missing.name.to_string(),
            });
        }

        let mut fields = BTreeMap::new();
        for schema_field in Schema::fields() {
            // presence checked above
            let Some(value) = raw.get(schema_field.name) else {
                continue;
            };
            let typed = self.validate_field(schema_field.name, value, schema_field.field_type)?;
            fields.insert(schema_field.name, typed);
        }

        let mut extras: Vec<&String> = raw.keys().filter(|k| !Schema::is_known(k)).collect();
        extras.sort();
        for name in extras {
            if !self.allow_unknown_fields {
                return Err(ValidationError::UnknownField { field: name.clone() });
            }
            if raw[name].is_null() {
                return Err(ValidationError::NullField { field: name.clone() });
            }
        }

        Ok(Record::from_fields(fields))
    }

    /// Validate a single field
    fn validate_field(
        &self,
        field_name: &str,
        value: &Value,
        field_type: FieldType,
    ) -> Result<FieldValue, ValidationError> {
        match (field_type, value) {
            (_, Value::Null) => Err(ValidationError::NullField {
                field: field_name.to_string(),
            }),

            (FieldType::Text, Value::String(s)) => {
                if s.is_empty() {
                    return Err(ValidationError::EmptyString {
                        field: field_name.to_string(),
                    });
                }
                Ok(FieldValue::Text(s.clone()))
            }

            (FieldType::Integer, Value::Integer(i)) => {
                if *i < 0 {
                    return Err(ValidationError::Negative {
                        field: field_name.to_string(),
                    });
                }
                Ok(FieldValue::Integer(*i))
            }

            (expected, other) => Err(ValidationError::TypeMismatch {
                field: field_name.to_string(),
                expected,
                actual: other.type_name(),
            }),
        }
    }
}
