//! Configuration management for syllabus-check.
//!
//! Handles:
//! - Command-line argument parsing
//! - User and project configuration files
//! - Merging them into one effective configuration

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::check::CheckOptions;
use crate::report::OutputFormat;
use crate::schema::RecordKind;
use crate::source::DEFAULT_EXTENSIONS;

/// Project configuration file name, searched upward from the working directory
pub const PROJECT_CONFIG_FILE: &str = ".syllabus-check.toml";

/// Command-line arguments for syllabus-check
#[derive(Debug, Default, Parser)]
#[command(name = "syllabus-check")]
#[command(about = "Validate course-page data files against the syllabus schema")]
#[command(version)]
pub struct Args {
    /// Data files or directories to check
    #[arg(help = "Data files or directories (default: current directory)")]
    pub paths: Vec<PathBuf>,

    /// Kind for records whose file does not declare one
    #[arg(long, value_enum, help = "Record kind for undeclared records")]
    pub kind: Option<RecordKind>,

    /// Output format
    #[arg(long, value_enum, help = "Report format (text, json)")]
    pub format: Option<OutputFormat>,

    /// Report authoring convention notes alongside violations
    #[arg(
        long,
        overrides_with = "no_conventions",
        help = "Also check authoring conventions"
    )]
    pub conventions: bool,

    /// Turn convention notes off even when a config file enables them
    #[arg(
        long,
        overrides_with = "conventions",
        help = "Skip authoring conventions"
    )]
    pub no_conventions: bool,

    /// Keep running and re-check when files change
    #[arg(long, help = "Watch the inputs and re-check on change")]
    pub watch: bool,

    /// Explicit configuration file
    #[arg(long, help = "Configuration file (overrides project and user files)")]
    pub config: Option<PathBuf>,

    /// Log level; `RUST_LOG` applies only when this is not given
    #[arg(long, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,
}

impl Args {
    /// Conventions setting from the command line, if one was given
    pub fn conventions_flag(&self) -> Option<bool> {
        if self.conventions {
            Some(true)
        } else if self.no_conventions {
            Some(false)
        } else {
            None
        }
    }

    /// Logger filter: `--log-level`, then `rust_log`, then `warn`
    pub fn log_filter(&self, rust_log: Option<&str>) -> String {
        self.log_level
            .as_deref()
            .or(rust_log.filter(|filter| !filter.trim().is_empty()))
            .unwrap_or("warn")
            .to_string()
    }
}

/// Settings that may come from a TOML configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub kind: Option<RecordKind>,
    pub format: Option<OutputFormat>,
    pub conventions: Option<bool>,
    pub extensions: Option<Vec<String>>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Fill unset values from a lower-priority layer
    fn or(self, lower: FileConfig) -> FileConfig {
        FileConfig {
            kind: self.kind.or(lower.kind),
            format: self.format.or(lower.format),
            conventions: self.conventions.or(lower.conventions),
            extensions: self.extensions.or(lower.extensions),
        }
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub paths: Vec<PathBuf>,
    pub kind: Option<RecordKind>,
    pub format: OutputFormat,
    pub conventions: bool,
    pub extensions: Vec<String>,
    pub watch: bool,
    /// Configuration files that contributed, highest priority first
    pub config_files: Vec<PathBuf>,
}

impl Config {
    /// Create configuration from explicit arguments, discovering config files
    pub fn from_args(args: Args) -> Result<Self> {
        let mut files = Vec::new();

        if let Some(path) = &args.config {
            files.push(path.clone());
        }

        let cwd = std::env::current_dir().context("Failed to read working directory")?;
        if let Some(project) = find_project_config(&cwd) {
            files.push(project);
        }

        if let Some(user) = user_config_path().filter(|p| p.is_file()) {
            files.push(user);
        }

        let mut layers = Vec::new();
        for path in &files {
            layers.push(FileConfig::load(path)?);
        }

        let mut config = Self::from_layers(args, layers);
        config.config_files = files;
        Ok(config)
    }

    /// Merge arguments over config layers ordered highest priority first
    pub fn from_layers(args: Args, layers: Vec<FileConfig>) -> Self {
        let file = layers
            .into_iter()
            .fold(FileConfig::default(), |merged, layer| merged.or(layer));

        let paths = if args.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            args.paths.clone()
        };

        Config {
            paths,
            kind: args.kind.or(file.kind),
            format: args.format.or(file.format).unwrap_or_default(),
            conventions: args
                .conventions_flag()
                .or(file.conventions)
                .unwrap_or(false),
            extensions: file
                .extensions
                .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()),
            watch: args.watch,
            config_files: Vec::new(),
        }
    }

    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            kind: self.kind,
            conventions: self.conventions,
            extensions: self.extensions.clone(),
        }
    }
}

/// `~/.config/syllabus-check/config.toml` (platform equivalent)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("syllabus-check").join("config.toml"))
}

/// Nearest project configuration file at or above `start`
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}
