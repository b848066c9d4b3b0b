//! Well-formed records of every kind, shared by the integration tests.
#![allow(dead_code)]

use serde_json::{Value, json};
use syllabus_schema::{FieldPath, RecordKind, SENTINEL};
use syllabus_schema::schema::Segment;

pub fn course_info() -> Value {
    json!({
        "courseBasicInfo": {
            "courseTitle": "FOUNDATIONS IN THE HUMANITIES What is History?",
            "school": "NYU",
            "courseCode": "HIST-SHU-101",
            "credits": SENTINEL,
            "semester": "Fall 2023",
            "department": "Humanities and History"
        },
        "instructorInfo": {
            "instructorName": "Duane Corpis",
            "titlePosition": "Associate Professor of Humanities and History",
            "officeAddress": "W810",
            "officeHours": "Tuesdays, 11:00 am-1:00 pm or by appointment",
            "contactInfo": {
                "email": "duane.corpis@nyu.edu",
                "phone": SENTINEL
            }
        },
        "assessmentAndGradingPolicy": {
            "weightings": {
                "assignments": "30%",
                "quizzes": SENTINEL,
                "midterm": SENTINEL,
                "final": SENTINEL,
                "projects": SENTINEL,
                "attendance": "15%"
            },
            "assessmentMethods": [
                "5 writing activities",
                "in-class presentation",
                "overall course participation"
            ]
        }
    })
}

pub fn solver_pitch() -> Value {
    json!({
        "title": "How the Qsolver Can Enhance Your Course Study",
        "description": "Helps history students master complex concepts.",
        "coreFeatures": [
            {"name": "Explain Deeper", "description": "In-depth explanations of periodization."},
            {"name": "Explain Easier", "description": "Simplifies microhistory."},
            {"name": "Check Answer", "description": "Verifies interpretations."},
            {"name": "Visualization", "description": "Helps build timelines."}
        ]
    })
}

pub fn reading_pitch() -> Value {
    json!({
        "title": "How Reading Can Enhance Your Course Study",
        "description": "Improves reading comprehension for HIST-SHU-101.",
        "coreFeatures": [
            {"name": "Multi-Document Support", "description": "Synthesize several books."},
            {"name": "Language Selection", "description": "Read in other languages."},
            {"name": "Automated Summaries", "description": "Condense long readings."},
            {"name": "Outline Recognition", "description": "Navigate complex texts."}
        ]
    })
}

pub fn transcribe_pitch() -> Value {
    json!({
        "title": "What can you do using the transcriber for your course study?",
        "description": "Helps international students overcome language barriers.",
        "coreFeatures": "- Multilingual transcription of class recordings.\n- Detailed class outlines from each lecture."
    })
}

pub fn other_syllabus() -> Value {
    json!({
        "courseCode": "FRE-GY 6273",
        "courseTitle": "Valuation for Financial Engineering",
        "school": "NYU",
        "semester": "Spring 2025",
        "link": "https://example.edu/syllabi/fre-gy-6273"
    })
}

pub fn page_bundle() -> Value {
    json!({
        "courseInfo": course_info(),
        "productUsingInCourse": solver_pitch(),
        "productUsingInCoursereading": reading_pitch(),
        "productUsingInCoursetranscribe": transcribe_pitch(),
        "FAQ": [
            {"question": "What file formats do you support?", "answer": "MP3, WAV, MP4 and more."},
            {"question": "How accurate is the transcription?", "answer": "Typically above 95%."}
        ]
    })
}

pub fn sample(kind: RecordKind) -> Value {
    match kind {
        RecordKind::Course => course_info(),
        RecordKind::SolverPitch => solver_pitch(),
        RecordKind::ReadingPitch => reading_pitch(),
        RecordKind::TranscribePitch => transcribe_pitch(),
        RecordKind::OtherSyllabus => other_syllabus(),
        RecordKind::PageBundle => page_bundle(),
    }
}

/// Mutable access to the value at `path`
pub fn value_at<'a>(record: &'a mut Value, path: &FieldPath) -> Option<&'a mut Value> {
    let mut current = record;
    for segment in path.segments() {
        current = match segment {
            Segment::Key(name) => current.get_mut(name.as_str())?,
            Segment::Index(idx) => current.get_mut(*idx)?,
        };
    }
    Some(current)
}

/// Remove the field at `path`, returning whether it existed
pub fn remove_field(record: &mut Value, path: &FieldPath) -> bool {
    let segments = path.segments();
    let Some((Segment::Key(last), parent)) = segments.split_last() else {
        return false;
    };
    let parent_path = parent.iter().fold(FieldPath::root(), |p, s| match s {
        Segment::Key(name) => p.key(name),
        Segment::Index(idx) => p.index(*idx),
    });
    value_at(record, &parent_path)
        .and_then(Value::as_object_mut)
        .and_then(|map| map.shift_remove(last.as_str()))
        .is_some()
}
