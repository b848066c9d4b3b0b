//! Shape Declarations
//!
//! Static, declarative description of every record kind. The validator and the
//! convention checker both walk these tables; nothing here looks at data.

use super::path::FieldPath;

/// Semantic type of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Any string, including the empty string and the sentinel
    Text,
    /// A string with at least one non-whitespace character
    NonEmptyText,
    /// Ordered sequence whose elements all share one type
    List(&'static FieldType),
    /// Nested object with a fixed set of required fields
    Object(&'static [Field]),
}

/// A named, required field of an object shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
}

const fn field(name: &'static str, ty: FieldType) -> Field {
    Field { name, ty }
}

impl FieldType {
    /// Human-readable name of the expected type, used in violation messages
    pub fn expected(&self) -> &'static str {
        match self {
            FieldType::Text => "string",
            FieldType::NonEmptyText => "non-empty string",
            FieldType::List(_) => "array",
            FieldType::Object(_) => "object",
        }
    }

    /// Declared fields when this is an object shape
    pub fn fields(&self) -> Option<&'static [Field]> {
        match self {
            FieldType::Object(fields) => Some(*fields),
            _ => None,
        }
    }

    /// Every required field path reachable without entering a sequence.
    ///
    /// Paths are listed parent first, in declaration order.
    pub fn required_paths(&self) -> Vec<FieldPath> {
        let mut paths = Vec::new();
        collect_paths(self, &FieldPath::root(), &mut paths);
        paths
    }
}

fn collect_paths(ty: &FieldType, prefix: &FieldPath, out: &mut Vec<FieldPath>) {
    if let Some(fields) = ty.fields() {
        for f in fields {
            let path = prefix.key(f.name);
            out.push(path.clone());
            collect_paths(&f.ty, &path, out);
        }
    }
}

const TEXT: FieldType = FieldType::Text;

const COURSE_BASIC_INFO: &[Field] = &[
    field("courseTitle", TEXT),
    field("school", TEXT),
    field("courseCode", TEXT),
    field("credits", TEXT),
    field("semester", TEXT),
    field("department", TEXT),
];

const CONTACT_INFO: &[Field] = &[field("email", TEXT), field("phone", TEXT)];

const INSTRUCTOR_INFO: &[Field] = &[
    field("instructorName", TEXT),
    field("titlePosition", TEXT),
    field("officeAddress", TEXT),
    field("officeHours", TEXT),
    field("contactInfo", FieldType::Object(CONTACT_INFO)),
];

const WEIGHTINGS: &[Field] = &[
    field("assignments", TEXT),
    field("quizzes", TEXT),
    field("midterm", TEXT),
    field("final", TEXT),
    field("projects", TEXT),
    field("attendance", TEXT),
];

const GRADING_POLICY: &[Field] = &[
    field("weightings", FieldType::Object(WEIGHTINGS)),
    field("assessmentMethods", FieldType::List(&TEXT)),
];

pub const COURSE_INFO: &[Field] = &[
    field("courseBasicInfo", FieldType::Object(COURSE_BASIC_INFO)),
    field("instructorInfo", FieldType::Object(INSTRUCTOR_INFO)),
    field("assessmentAndGradingPolicy", FieldType::Object(GRADING_POLICY)),
];

const CORE_FEATURE_FIELDS: &[Field] = &[field("name", TEXT), field("description", TEXT)];

const CORE_FEATURE: FieldType = FieldType::Object(CORE_FEATURE_FIELDS);

/// Shared by the solver and reading pitches
pub const FEATURE_PITCH: &[Field] = &[
    field("title", TEXT),
    field("description", TEXT),
    field("coreFeatures", FieldType::List(&CORE_FEATURE)),
];

pub const TRANSCRIBE_PITCH: &[Field] = &[
    field("title", TEXT),
    field("description", TEXT),
    field("coreFeatures", FieldType::NonEmptyText),
];

pub const OTHER_SYLLABUS: &[Field] = &[
    field("courseCode", TEXT),
    field("courseTitle", TEXT),
    field("school", TEXT),
    field("semester", TEXT),
    field("link", TEXT),
];

const FAQ_ENTRY_FIELDS: &[Field] = &[field("question", TEXT), field("answer", TEXT)];

const FAQ_ENTRY: FieldType = FieldType::Object(FAQ_ENTRY_FIELDS);

pub const PAGE_BUNDLE: &[Field] = &[
    field("courseInfo", FieldType::Object(COURSE_INFO)),
    field("productUsingInCourse", FieldType::Object(FEATURE_PITCH)),
    field("productUsingInCoursereading", FieldType::Object(FEATURE_PITCH)),
    field("productUsingInCoursetranscribe", FieldType::Object(TRANSCRIBE_PITCH)),
    field("FAQ", FieldType::List(&FAQ_ENTRY)),
];
