//! Authoring convention checks.
//!
//! These never make a record invalid. They point at things a reviewer would
//! probably want to look at: feature names outside the usual vocabulary,
//! stray fields, transcribe blocks without bullets.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

use crate::schema::records::strip_bullet;
use crate::schema::{FieldPath, FieldType, RecordKind, SENTINEL, is_sentinel};

/// Severity of an advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Info => f.write_str("info"),
        }
    }
}

/// A note about an authoring convention
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub path: FieldPath,
    pub severity: Severity,
    pub message: String,
}

impl Advisory {
    fn warning(path: FieldPath, message: String) -> Self {
        Self {
            path,
            severity: Severity::Warning,
            message,
        }
    }

    fn info(path: FieldPath, message: String) -> Self {
        Self {
            path,
            severity: Severity::Info,
            message,
        }
    }
}

/// Check a record of `kind` against the authoring conventions
pub fn check_conventions(kind: RecordKind, record: &Value) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    check_undeclared(&kind.shape(), record, &FieldPath::root(), &mut advisories);
    check_kind(kind, record, &FieldPath::root(), &mut advisories);

    let sentinels = count_sentinels(record);
    if sentinels > 0 {
        advisories.push(Advisory::info(
            FieldPath::root(),
            format!("{} field(s) hold the placeholder \"{}\"", sentinels, SENTINEL),
        ));
    }

    advisories
}

fn check_undeclared(ty: &FieldType, value: &Value, path: &FieldPath, out: &mut Vec<Advisory>) {
    match (ty, value) {
        (FieldType::Object(fields), Value::Object(map)) => {
            for (key, child) in map {
                let child_path = path.key(key);
                if let Some(field) = fields.iter().find(|f| f.name == key.as_str()) {
                    check_undeclared(&field.ty, child, &child_path, out);
                    continue;
                }

                let near_miss = fields
                    .iter()
                    .find(|f| f.name.eq_ignore_ascii_case(key) && !map.contains_key(f.name));
                let message = match near_miss {
                    Some(field) => format!(
                        "undeclared field '{}' (did you mean '{}'?)",
                        child_path, field.name
                    ),
                    None => format!("undeclared field '{}'", child_path),
                };
                out.push(Advisory::warning(child_path, message));
            }
        }
        (FieldType::List(element), Value::Array(items)) => {
            for (idx, item) in items.iter().enumerate() {
                check_undeclared(element, item, &path.index(idx), out);
            }
        }
        _ => {}
    }
}

fn check_kind(kind: RecordKind, record: &Value, path: &FieldPath, out: &mut Vec<Advisory>) {
    // Shape problems are the validator's business
    let Value::Object(map) = record else {
        return;
    };

    match kind {
        RecordKind::SolverPitch | RecordKind::ReadingPitch => {
            check_feature_names(kind, map, path, out);
        }
        RecordKind::TranscribePitch => check_transcribe_block(map, path, out),
        RecordKind::PageBundle => {
            for (key, member) in RecordKind::bundle_members() {
                if let Some(value) = map.get(*key) {
                    check_kind(*member, value, &path.key(key), out);
                }
            }
        }
        RecordKind::Course | RecordKind::OtherSyllabus => {}
    }
}

fn check_feature_names(
    kind: RecordKind,
    map: &Map<String, Value>,
    path: &FieldPath,
    out: &mut Vec<Advisory>,
) {
    let Some(vocabulary) = kind.feature_vocabulary() else {
        return;
    };
    let Some(Value::Array(features)) = map.get("coreFeatures") else {
        return;
    };

    let mut seen = HashSet::new();
    for (idx, feature) in features.iter().enumerate() {
        let Some(name) = feature.get("name").and_then(Value::as_str) else {
            continue;
        };
        let name_path = path.key("coreFeatures").index(idx).key("name");

        if !vocabulary.contains(&name) {
            out.push(Advisory::warning(
                name_path.clone(),
                format!(
                    "feature name '{}' is not one of the usual {} features: {}",
                    name,
                    kind,
                    vocabulary.join(", ")
                ),
            ));
        }
        if !seen.insert(name) {
            out.push(Advisory::warning(
                name_path,
                format!("feature '{}' is listed more than once", name),
            ));
        }
    }
}

fn check_transcribe_block(map: &Map<String, Value>, path: &FieldPath, out: &mut Vec<Advisory>) {
    let Some(Value::String(block)) = map.get("coreFeatures") else {
        return;
    };
    if block.trim().is_empty() {
        return;
    }

    let bullets = block
        .lines()
        .filter(|line| strip_bullet(line.trim()).is_some())
        .count();
    if bullets == 0 {
        out.push(Advisory::info(
            path.key("coreFeatures"),
            "feature block has no bullet lines".to_string(),
        ));
    }
}

fn count_sentinels(value: &Value) -> usize {
    match value {
        Value::String(text) => usize::from(is_sentinel(text)),
        Value::Array(items) => items.iter().map(count_sentinels).sum(),
        Value::Object(map) => map.values().map(count_sentinels).sum(),
        _ => 0,
    }
}
