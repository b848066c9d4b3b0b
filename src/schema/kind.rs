//! Record kinds and their shapes.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::shape::{
    COURSE_INFO, FEATURE_PITCH, Field, FieldType, OTHER_SYLLABUS, PAGE_BUNDLE, TRANSCRIBE_PITCH,
};

/// The fixed document shapes a data file may declare
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    /// Course metadata (`CourseInfo`)
    Course,
    /// Solver feature pitch (`Qsolver`)
    SolverPitch,
    /// Reading feature pitch (`Reading`)
    ReadingPitch,
    /// Transcribe pitch with a free-text feature block (`transcribe`)
    TranscribePitch,
    /// Link to a syllabus hosted elsewhere (`OtherSyllabus`)
    OtherSyllabus,
    /// One generated course page: course info, three pitches and an FAQ
    PageBundle,
}

const SOLVER_FEATURES: &[&str] = &[
    "Explain Deeper",
    "Explain Easier",
    "Check Answer",
    "Visualization",
];

const READING_FEATURES: &[&str] = &[
    "Multi-Document Support",
    "Language Selection",
    "Automated Summaries",
    "Outline Recognition",
];

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        RecordKind::Course,
        RecordKind::SolverPitch,
        RecordKind::ReadingPitch,
        RecordKind::TranscribePitch,
        RecordKind::OtherSyllabus,
        RecordKind::PageBundle,
    ];

    /// CLI / config name
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Course => "course",
            RecordKind::SolverPitch => "solver-pitch",
            RecordKind::ReadingPitch => "reading-pitch",
            RecordKind::TranscribePitch => "transcribe-pitch",
            RecordKind::OtherSyllabus => "other-syllabus",
            RecordKind::PageBundle => "page-bundle",
        }
    }

    /// Type name used to annotate the record in TypeScript data files
    pub fn type_name(&self) -> &'static str {
        match self {
            RecordKind::Course => "CourseInfo",
            RecordKind::SolverPitch => "Qsolver",
            RecordKind::ReadingPitch => "Reading",
            RecordKind::TranscribePitch => "transcribe",
            RecordKind::OtherSyllabus => "OtherSyllabus",
            RecordKind::PageBundle => "PageBundle",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == name)
    }

    /// Top-level fields of this kind
    pub fn fields(&self) -> &'static [Field] {
        match self {
            RecordKind::Course => COURSE_INFO,
            RecordKind::SolverPitch | RecordKind::ReadingPitch => FEATURE_PITCH,
            RecordKind::TranscribePitch => TRANSCRIBE_PITCH,
            RecordKind::OtherSyllabus => OTHER_SYLLABUS,
            RecordKind::PageBundle => PAGE_BUNDLE,
        }
    }

    pub fn shape(&self) -> FieldType {
        FieldType::Object(self.fields())
    }

    /// Conventional `coreFeatures` names, for the kinds that have them
    pub fn feature_vocabulary(&self) -> Option<&'static [&'static str]> {
        match self {
            RecordKind::SolverPitch => Some(SOLVER_FEATURES),
            RecordKind::ReadingPitch => Some(READING_FEATURES),
            _ => None,
        }
    }

    /// Kinds embedded in a page bundle, keyed by bundle field
    pub fn bundle_members() -> &'static [(&'static str, RecordKind)] {
        &[
            ("courseInfo", RecordKind::Course),
            ("productUsingInCourse", RecordKind::SolverPitch),
            ("productUsingInCoursereading", RecordKind::ReadingPitch),
            ("productUsingInCoursetranscribe", RecordKind::TranscribePitch),
        ]
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s) || kind.type_name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|k| k.name()).collect();
                format!(
                    "Unknown record kind '{}' (expected one of: {})",
                    s,
                    names.join(", ")
                )
            })
    }
}
