//! Batch checking of data files.

use std::path::{Path, PathBuf};

use crate::report::{EntryReport, FileReport, Report};
use crate::schema::RecordKind;
use crate::source::{self, DEFAULT_EXTENSIONS, DataEntry};
use crate::validation::{check_conventions, validate};

/// Options shared by every file in a batch
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOptions {
    /// Kind for records whose file does not declare one
    pub kind: Option<RecordKind>,
    /// Also run the convention checks
    pub conventions: bool,
    /// Extensions picked up when walking directories
    pub extensions: Vec<String>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            kind: None,
            conventions: false,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Check every data file under `paths`
pub fn check_paths(paths: &[PathBuf], options: &CheckOptions) -> Report {
    let files = source::collect_files(paths, &options.extensions);
    log::debug!("Checking {} data file(s)", files.len());

    Report::new(files.iter().map(|path| check_file(path, options)).collect())
}

/// Check one data file; load failures end up in the report, not in an error
pub fn check_file(path: &Path, options: &CheckOptions) -> FileReport {
    match source::load_file(path) {
        Ok(file) => FileReport {
            path: file.path,
            entries: file
                .entries
                .iter()
                .map(|entry| check_entry(entry, options))
                .collect(),
            error: None,
        },
        Err(e) => {
            log::warn!("{:#}", e);
            FileReport {
                path: path.to_path_buf(),
                entries: Vec::new(),
                error: Some(format!("{:#}", e)),
            }
        }
    }
}

/// Validate one entry, using the file's declared kind before the fallback
pub fn check_entry(entry: &DataEntry, options: &CheckOptions) -> EntryReport {
    let Some(kind) = entry.kind.or(options.kind) else {
        return EntryReport {
            label: entry.label.clone(),
            kind: None,
            result: None,
            advisories: Vec::new(),
            error: Some("record kind is not declared; pass --kind".to_string()),
        };
    };

    let result = validate(kind, &entry.value);
    let advisories = if options.conventions {
        check_conventions(kind, &entry.value)
    } else {
        Vec::new()
    };

    EntryReport {
        label: entry.label.clone(),
        kind: Some(kind),
        result: Some(result),
        advisories,
        error: None,
    }
}
