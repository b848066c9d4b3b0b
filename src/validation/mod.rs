//! Validation Engine
//!
//! Structural validation of records plus advisory convention checks.

pub mod conventions;
pub mod engine;

pub use conventions::{Advisory, Severity, check_conventions};
pub use engine::{SchemaViolation, ValidationResult, ViolationReason, describe_value, validate};
