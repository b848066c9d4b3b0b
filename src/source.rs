//! Data file loading.
//!
//! Turns JSON, TOML and TypeScript data-literal files into candidate records.
//! Loading never validates; it only decides which kind each record claims to
//! be.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;
use serde_json::Value;

use crate::schema::RecordKind;

/// Extensions picked up when walking directories
pub const DEFAULT_EXTENSIONS: &[&str] = &["json", "toml", "ts", "tsx"];

/// Format of a data file, decided by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
    TypeScript,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(SourceFormat::Json),
            "toml" => Some(SourceFormat::Toml),
            "ts" | "tsx" => Some(SourceFormat::TypeScript),
            _ => None,
        }
    }
}

/// One candidate record found in a file
#[derive(Debug, Clone, PartialEq)]
pub struct DataEntry {
    /// Where the record sits in its file: a binding name, a batch index, or empty
    pub label: String,
    /// Kind the file declares for the record, if any
    pub kind: Option<RecordKind>,
    pub value: Value,
}

/// All candidate records of one file
#[derive(Debug, Clone)]
pub struct DataFile {
    pub path: PathBuf,
    pub entries: Vec<DataEntry>,
}

/// Read and split a data file into entries
pub fn load_file(path: &Path) -> Result<DataFile> {
    let format = SourceFormat::from_path(path)
        .ok_or_else(|| anyhow!("Unsupported data file type: {}", path.display()))?;

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;

    let entries = parse_content(&content, format)
        .with_context(|| format!("Failed to parse data file: {}", path.display()))?;

    log::debug!("Loaded {} record(s) from {}", entries.len(), path.display());

    Ok(DataFile {
        path: path.to_path_buf(),
        entries,
    })
}

/// Split file content into entries
pub fn parse_content(content: &str, format: SourceFormat) -> Result<Vec<DataEntry>> {
    match format {
        SourceFormat::Json => {
            let value: Value = serde_json::from_str(content).context("Invalid JSON")?;
            Ok(split_document(value))
        }
        SourceFormat::Toml => {
            let value: Value = toml::from_str(content).context("Invalid TOML")?;
            Ok(split_document(value))
        }
        SourceFormat::TypeScript => parse_typescript(content),
    }
}

/// A top-level array is an upload batch of page bundles; an object holding a
/// bundle key is one bundle; anything else is a bare record of unknown kind.
fn split_document(value: Value) -> Vec<DataEntry> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, value)| DataEntry {
                label: format!("[{}]", idx),
                kind: Some(RecordKind::PageBundle),
                value,
            })
            .collect(),
        value if looks_like_bundle(&value) => vec![DataEntry {
            label: String::new(),
            kind: Some(RecordKind::PageBundle),
            value,
        }],
        value => vec![DataEntry {
            label: String::new(),
            kind: None,
            value,
        }],
    }
}

fn looks_like_bundle(value: &Value) -> bool {
    let Value::Object(map) = value else {
        return false;
    };
    RecordKind::bundle_members()
        .iter()
        .any(|(key, _)| map.contains_key(*key))
        || map.contains_key("FAQ")
}

const EXPORT_PATTERN: &str =
    r"(?m)^\s*export\s+const\s+([A-Za-z_$][\w$]*)\s*(?::\s*([^=;()]+?))?\s*=\s*";

/// Split a type annotation into its element type name and whether it is a list
fn parse_annotation(annotation: &str) -> (&str, bool) {
    let annotation = annotation.trim();
    if let Some(element) = annotation.strip_suffix("[]") {
        return (element.trim(), true);
    }
    if let Some(element) = annotation
        .strip_prefix("Array<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return (element.trim(), true);
    }
    (annotation, false)
}

/// Extract `export const name: Type = <literal>;` bindings.
///
/// The literal must be JSON-compatible (quoted keys, no trailing commas),
/// which is how the data files are written. `Type[]` and `Array<Type>`
/// bindings yield one entry per element.
fn parse_typescript(content: &str) -> Result<Vec<DataEntry>> {
    let pattern = Regex::new(EXPORT_PATTERN).context("Invalid export pattern")?;
    let mut entries = Vec::new();

    for captures in pattern.captures_iter(content) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let binding = &captures[1];
        let (kind, is_array) = match captures.get(2).map(|m| parse_annotation(m.as_str())) {
            Some((name, is_array)) => match RecordKind::from_type_name(name) {
                Some(kind) => (Some(kind), is_array),
                None => {
                    log::warn!(
                        "Skipping binding '{}': type '{}' is not a record kind",
                        binding,
                        captures[2].trim()
                    );
                    continue;
                }
            },
            None => (None, false),
        };

        let value = read_literal(&content[whole.end()..])
            .with_context(|| format!("Binding '{}' is not a JSON-compatible literal", binding))?;

        if is_array {
            let Value::Array(items) = value else {
                bail!("Binding '{}' is declared as an array but is not one", binding);
            };
            entries.extend(items.into_iter().enumerate().map(|(idx, value)| DataEntry {
                label: format!("{}[{}]", binding, idx),
                kind,
                value,
            }));
        } else {
            entries.push(DataEntry {
                label: binding.to_string(),
                kind,
                value,
            });
        }
    }

    Ok(entries)
}

/// Parse exactly one JSON value from the start of `text`
fn read_literal(text: &str) -> Result<Value> {
    let mut stream = serde_json::Deserializer::from_str(text).into_iter::<Value>();
    match stream.next() {
        Some(value) => Ok(value?),
        None => bail!("Unexpected end of file"),
    }
}

/// Expand files and directories into a list of data files, each listed once.
///
/// Directory contents are sorted; inputs keep their command-line order.
pub fn collect_files(paths: &[PathBuf], extensions: &[String]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk_directory(path, extensions, &mut found);
        } else {
            // Explicit files are kept even when missing so the error is reported
            found.push(path.clone());
        }
    }

    let mut seen = HashSet::new();
    found
        .into_iter()
        .filter(|path| seen.insert(path.canonicalize().unwrap_or_else(|_| path.clone())))
        .collect()
}

fn walk_directory(dir: &Path, extensions: &[String], files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Failed to read directory {}: {}", dir.display(), e);
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
    paths.sort();

    for path in paths {
        if is_hidden(&path) {
            continue;
        }
        if path.is_dir() {
            walk_directory(&path, extensions, files);
        } else if has_extension(&path, extensions) {
            files.push(path);
        }
    }
}

/// Dotfiles and dot-directories, such as `.syllabus-check.toml` or `.git`
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
