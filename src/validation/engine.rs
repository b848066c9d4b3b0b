//! Validation Engine
//!
//! Walks a candidate value alongside the declared shape of its kind and
//! collects every violation. Nothing here allocates a typed record or touches
//! the filesystem.

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::schema::{Field, FieldPath, FieldType, RecordKind};

/// Why a field failed its check
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationReason {
    /// Declared field is absent
    Missing,
    /// Field is present with the wrong semantic type
    TypeMismatch { actual: String },
    /// String is present but must not be empty
    Empty,
    /// The record itself is not an object
    NotAnObject { kind: RecordKind, actual: String },
}

/// A single defect found in a record
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaViolation {
    pub path: FieldPath,
    pub expected: &'static str,
    pub reason: ViolationReason,
}

impl SchemaViolation {
    /// Machine-readable reason tag
    pub fn code(&self) -> &'static str {
        match self.reason {
            ViolationReason::Missing => "missing",
            ViolationReason::TypeMismatch { .. } => "type_mismatch",
            ViolationReason::Empty => "empty",
            ViolationReason::NotAnObject { .. } => "not_an_object",
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            ViolationReason::Missing => write!(
                f,
                "missing required field '{}' (expected {})",
                self.path, self.expected
            ),
            ViolationReason::TypeMismatch { actual } => write!(
                f,
                "field '{}' must be a {}, found {}",
                self.path, self.expected, actual
            ),
            ViolationReason::Empty => write!(f, "field '{}' must be non-empty", self.path),
            ViolationReason::NotAnObject { kind, actual } => write!(
                f,
                "record is not a structured object of kind {} (found {})",
                kind.type_name(),
                actual
            ),
        }
    }
}

impl std::error::Error for SchemaViolation {}

impl Serialize for SchemaViolation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SchemaViolation", 4)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("reason", self.code())?;
        state.serialize_field("expected", self.expected)?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result of validating one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// True iff `violations` is empty
    pub ok: bool,
    pub violations: Vec<SchemaViolation>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            ok: true,
            violations: Vec::new(),
        }
    }

    pub fn add_violation(
        &mut self,
        path: FieldPath,
        expected: &'static str,
        reason: ViolationReason,
    ) {
        self.violations.push(SchemaViolation {
            path,
            expected,
            reason,
        });
        self.ok = false;
    }

    pub fn is_valid(&self) -> bool {
        self.ok
    }
}

/// Short description of a JSON value for messages
pub fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) if s.is_empty() => "empty string".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(items) => format!("array of {} element(s)", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

/// Validate a record claiming to be `kind`
pub fn validate(kind: RecordKind, record: &Value) -> ValidationResult {
    let mut result = ValidationResult::new();

    match record {
        Value::Object(map) => {
            validate_fields(kind.fields(), map, &FieldPath::root(), &mut result)
        }
        other => result.add_violation(
            FieldPath::root(),
            "object",
            ViolationReason::NotAnObject {
                kind,
                actual: describe_value(other),
            },
        ),
    }

    result
}

/// Validate every declared field of an object, in declaration order
fn validate_fields(
    fields: &[Field],
    map: &Map<String, Value>,
    path: &FieldPath,
    result: &mut ValidationResult,
) {
    for field in fields {
        let field_path = path.key(field.name);
        match map.get(field.name) {
            Some(value) => validate_value(&field.ty, value, &field_path, result),
            None => {
                result.add_violation(field_path, field.ty.expected(), ViolationReason::Missing)
            }
        }
    }
}

/// Validate one value against its declared type
fn validate_value(ty: &FieldType, value: &Value, path: &FieldPath, result: &mut ValidationResult) {
    match (ty, value) {
        (FieldType::Text, Value::String(_)) => {}
        (FieldType::NonEmptyText, Value::String(text)) => {
            if text.trim().is_empty() {
                result.add_violation(path.clone(), ty.expected(), ViolationReason::Empty);
            }
        }
        (FieldType::List(element), Value::Array(items)) => {
            // Elements are checked independently
            for (idx, item) in items.iter().enumerate() {
                validate_value(element, item, &path.index(idx), result);
            }
        }
        (FieldType::Object(fields), Value::Object(map)) => {
            validate_fields(fields, map, path, result);
        }
        (ty, other) => result.add_violation(
            path.clone(),
            ty.expected(),
            ViolationReason::TypeMismatch {
                actual: describe_value(other),
            },
        ),
    }
}
