//! Type system for the segment engine
//!
//! This module contains:
//! - Untyped input values
//! - The closed user record schema
//! - The validated, typed record

pub mod record;
pub mod schema;
pub mod validator;
pub mod value;

pub use record::{FieldValue, Record};
pub use schema::{FieldType, Schema, SchemaField, USER_FIELDS};
pub use validator::{ValidationError, Validator};
pub use value::Value;
