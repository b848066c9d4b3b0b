//! Typed Records
//!
//! Strongly typed views of the record kinds. A value only becomes a typed
//! record after it passes validation, so deserialization never has to guess
//! which field was wrong.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::kind::RecordKind;
use crate::validation::{SchemaViolation, validate};

/// Placeholder authors use when the syllabus does not state a value
pub const SENTINEL: &str = "not mentioned in the syllabus";

/// True when `text` is the sentinel, ignoring case and surrounding whitespace
pub fn is_sentinel(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case(SENTINEL)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInfo {
    pub course_basic_info: CourseBasicInfo,
    pub instructor_info: InstructorInfo,
    pub assessment_and_grading_policy: GradingPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseBasicInfo {
    pub course_title: String,
    pub school: String,
    pub course_code: String,
    pub credits: String,
    pub semester: String,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorInfo {
    pub instructor_name: String,
    pub title_position: String,
    pub office_address: String,
    pub office_hours: String,
    pub contact_info: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingPolicy {
    pub weightings: Weightings,
    pub assessment_methods: Vec<String>,
}

/// Grade weightings, usually percentages or the sentinel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weightings {
    pub assignments: String,
    pub quizzes: String,
    pub midterm: String,
    #[serde(rename = "final")]
    pub final_exam: String,
    pub projects: String,
    pub attendance: String,
}

/// Solver or reading pitch. Feature order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturePitch {
    pub title: String,
    pub description: String,
    pub core_features: Vec<CoreFeature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreFeature {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribePitch {
    pub title: String,
    pub description: String,
    /// Free-text block, conventionally one bullet per line
    pub core_features: String,
}

impl TranscribePitch {
    /// Bullet lines of the feature block with their markers stripped
    pub fn bullets(&self) -> Vec<&str> {
        self.core_features
            .lines()
            .map(str::trim)
            .filter_map(strip_bullet)
            .collect()
    }
}

pub(crate) fn strip_bullet(line: &str) -> Option<&str> {
    ["- ", "* ", "• "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherSyllabus {
    pub course_code: String,
    pub course_title: String,
    pub school: String,
    pub semester: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBundle {
    #[serde(rename = "courseInfo")]
    pub course_info: CourseInfo,
    #[serde(rename = "productUsingInCourse")]
    pub solver: FeaturePitch,
    #[serde(rename = "productUsingInCoursereading")]
    pub reading: FeaturePitch,
    #[serde(rename = "productUsingInCoursetranscribe")]
    pub transcribe: TranscribePitch,
    #[serde(rename = "FAQ")]
    pub faq: Vec<FaqEntry>,
}

/// A validated record of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Course(CourseInfo),
    SolverPitch(FeaturePitch),
    ReadingPitch(FeaturePitch),
    TranscribePitch(TranscribePitch),
    OtherSyllabus(OtherSyllabus),
    PageBundle(Box<PageBundle>),
}

/// Returned by [`Record::from_value`] when the value fails validation
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRecord {
    pub kind: RecordKind,
    pub violations: Vec<SchemaViolation>,
}

impl fmt::Display for InvalidRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} record has {} schema violation(s)",
            self.kind.type_name(),
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for InvalidRecord {}

impl Record {
    /// Validate `value` as `kind`, then convert it to a typed record
    pub fn from_value(kind: RecordKind, value: &Value) -> Result<Self> {
        let result = validate(kind, value);
        if !result.ok {
            return Err(InvalidRecord {
                kind,
                violations: result.violations,
            }
            .into());
        }

        let value = value.clone();
        let record = match kind {
            RecordKind::Course => Record::Course(serde_json::from_value(value)?),
            RecordKind::SolverPitch => Record::SolverPitch(serde_json::from_value(value)?),
            RecordKind::ReadingPitch => Record::ReadingPitch(serde_json::from_value(value)?),
            RecordKind::TranscribePitch => {
                Record::TranscribePitch(serde_json::from_value(value)?)
            }
            RecordKind::OtherSyllabus => Record::OtherSyllabus(serde_json::from_value(value)?),
            RecordKind::PageBundle => Record::PageBundle(Box::new(serde_json::from_value(value)?)),
        };
        Ok(record)
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Course(_) => RecordKind::Course,
            Record::SolverPitch(_) => RecordKind::SolverPitch,
            Record::ReadingPitch(_) => RecordKind::ReadingPitch,
            Record::TranscribePitch(_) => RecordKind::TranscribePitch,
            Record::OtherSyllabus(_) => RecordKind::OtherSyllabus,
            Record::PageBundle(_) => RecordKind::PageBundle,
        }
    }

    /// Serialize back to the data-file representation, fields in declared order
    pub fn to_value(&self) -> Result<Value> {
        let value = match self {
            Record::Course(r) => serde_json::to_value(r)?,
            Record::SolverPitch(r) | Record::ReadingPitch(r) => serde_json::to_value(r)?,
            Record::TranscribePitch(r) => serde_json::to_value(r)?,
            Record::OtherSyllabus(r) => serde_json::to_value(r)?,
            Record::PageBundle(r) => serde_json::to_value(r)?,
        };
        Ok(value)
    }
}
