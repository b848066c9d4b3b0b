//! Record Schema
//!
//! Shape declarations for every record kind plus the typed records they
//! describe.

pub mod kind;
pub mod path;
pub mod records;
pub mod shape;

pub use kind::RecordKind;
pub use path::{FieldPath, Segment};
pub use records::{Record, SENTINEL, is_sentinel};
pub use shape::{Field, FieldType};
