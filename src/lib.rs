//! Syllabus Schema
//!
//! Runtime validation for hand-authored course-page data files.
//!
//! This library provides:
//! - Shape declarations for every record kind
//! - A validator that reports every violation in a record
//! - Advisory checks for authoring conventions
//! - Loading of JSON, TOML and TypeScript data files
//! - Batch reports and a watch mode for the `syllabus-check` binary

pub mod check;
pub mod config;
pub mod report;
pub mod schema;
pub mod source;
pub mod validation;
pub mod watch;

// Re-exports for clean public API
pub use check::{CheckOptions, check_paths};
pub use config::Config;
pub use report::{OutputFormat, Report};
pub use schema::{FieldPath, Record, RecordKind, SENTINEL};
pub use source::{DataEntry, DataFile, load_file};
pub use validation::{SchemaViolation, ValidationResult, check_conventions, validate};
