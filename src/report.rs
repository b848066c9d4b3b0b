//! Batch reports and their rendering.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::schema::RecordKind;
use crate::validation::{Advisory, SchemaViolation, Severity, ValidationResult};

/// How a report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Outcome for one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryReport {
    pub label: String,
    pub kind: Option<RecordKind>,
    /// Absent when the record could not be validated at all
    pub result: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<Advisory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EntryReport {
    pub fn violations(&self) -> &[SchemaViolation] {
        self.result
            .as_ref()
            .map(|r| r.violations.as_slice())
            .unwrap_or_default()
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none() && self.result.as_ref().is_some_and(|r| r.ok)
    }
}

/// Outcome for one data file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub entries: Vec<EntryReport>,
    /// Set when the file could not be read or parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Totals over a whole report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: usize,
    pub records: usize,
    pub invalid_records: usize,
    pub violations: usize,
    pub advisories: usize,
    pub errors: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub files: Vec<FileReport>,
    pub summary: Summary,
}

impl Report {
    pub fn new(files: Vec<FileReport>) -> Self {
        let mut summary = Summary {
            files: files.len(),
            ..Summary::default()
        };

        for file in &files {
            if file.error.is_some() {
                summary.errors += 1;
            }
            for entry in &file.entries {
                summary.records += 1;
                summary.violations += entry.violations().len();
                summary.advisories += entry.advisories.len();
                if entry.error.is_some() {
                    summary.errors += 1;
                }
                if !entry.is_valid() {
                    summary.invalid_records += 1;
                }
            }
        }

        Self { files, summary }
    }

    /// No violations and no load errors
    pub fn is_clean(&self) -> bool {
        self.summary.violations == 0 && self.summary.errors == 0
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for file in &self.files {
            let _ = writeln!(out, "{}", file.path.display());

            if let Some(error) = &file.error {
                let _ = writeln!(out, "  error: {}", error);
                continue;
            }
            if file.entries.is_empty() {
                let _ = writeln!(out, "  (no records)");
                continue;
            }

            for entry in &file.entries {
                render_entry(&mut out, entry);
            }
        }

        let s = &self.summary;
        let _ = writeln!(
            out,
            "\n{} file(s), {} record(s): {} invalid, {} violation(s), {} advisory note(s), {} error(s)",
            s.files, s.records, s.invalid_records, s.violations, s.advisories, s.errors
        );
        out
    }
}

fn render_entry(out: &mut String, entry: &EntryReport) {
    let label = if entry.label.is_empty() {
        "(document)"
    } else {
        entry.label.as_str()
    };
    let kind = entry
        .kind
        .map(|k| k.type_name().to_string())
        .unwrap_or_else(|| "?".to_string());
    let status = if let Some(error) = &entry.error {
        format!("error: {}", error)
    } else if entry.is_valid() {
        "ok".to_string()
    } else {
        format!("{} violation(s)", entry.violations().len())
    };
    let _ = writeln!(out, "  {} <{}>: {}", label, kind, status);

    for violation in entry.violations() {
        let _ = writeln!(out, "    - {}", violation);
    }
    for advisory in &entry.advisories {
        let marker = match advisory.severity {
            Severity::Warning => "!",
            Severity::Info => "i",
        };
        let _ = writeln!(out, "    {} {}: {}", marker, advisory.severity, advisory.message);
    }
}
