//! Validated user record

use super::schema::FieldType;
use super::validator::{ValidationError, Validator};
use super::value::Value;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A typed record field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Integer(_) => FieldType::Integer,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{}", i),
        }
    }
}

/// A fully validated user record.
///
/// Only [`Validator::build_record`] constructs one, so every recognized field
/// is present with its declared type and constraints satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<&'static str, FieldValue>,
}

impl Record {
    /// Validate raw input with the default (lenient) validator
    pub fn from_raw(raw: &HashMap<String, Value>) -> Result<Self, ValidationError> {
        Validator::new().build_record(raw)
    }

    pub(crate) fn from_fields(fields: BTreeMap<&'static str, FieldValue>) -> Self {
        Self { fields }
    }

    /// Get a field value by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
