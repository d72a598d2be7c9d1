//! User record schema
//!
//! The record has a closed set of fields; every rule and every record is
//! checked against this table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Non-empty text
    Text,
    /// Non-negative integer
    Integer,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "string"),
            FieldType::Integer => write!(f, "integer"),
        }
    }
}

/// A field in the user record schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaField {
    pub name: &'static str,
    pub field_type: FieldType,
}

/// The user record fields, in validation order.
pub const USER_FIELDS: [SchemaField; 7] = [
    SchemaField { name: "id", field_type: FieldType::Text },
    SchemaField { name: "level", field_type: FieldType::Integer },
    SchemaField { name: "country", field_type: FieldType::Text },
    SchemaField { name: "first_session", field_type: FieldType::Integer },
    SchemaField { name: "last_session", field_type: FieldType::Integer },
    SchemaField { name: "purchase_amount", field_type: FieldType::Integer },
    SchemaField { name: "last_purchase_at", field_type: FieldType::Integer },
];

/// Schema lookups over [`USER_FIELDS`]
pub struct Schema;

impl Schema {
    /// All recognized fields
    pub fn fields() -> &'static [SchemaField] {
        &USER_FIELDS
    }

    /// Get a field by name
    pub fn get_field(name: &str) -> Option<&'static SchemaField> {
        USER_FIELDS.iter().find(|f| f.name == name)
    }

    /// Type of a field, if recognized
    pub fn field_type(name: &str) -> Option<FieldType> {
        Self::get_field(name).map(|f| f.field_type)
    }

    pub fn is_known(name: &str) -> bool {
        Self::get_field(name).is_some()
    }
}
