//! Tests for configuration files feeding the effective configuration
use std::fs;

use syllabus_schema::config::{Args, Config, FileConfig, PROJECT_CONFIG_FILE, find_project_config};
use syllabus_schema::{OutputFormat, RecordKind};
use tempfile::TempDir;

#[test]
fn test_explicit_config_file() {
    let dir = TempDir::new().expect("create temp dir");
    let config_path = dir.path().join("check.toml");
    fs::write(
        &config_path,
        "kind = \"other-syllabus\"\nformat = \"json\"\nconventions = true\n",
    )
    .expect("write config");

    let args = Args {
        config: Some(config_path.clone()),
        ..Args::default()
    };
    let config = Config::from_args(args).expect("create config");

    assert_eq!(config.config_files.first(), Some(&config_path));
    assert_eq!(config.kind, Some(RecordKind::OtherSyllabus));
    assert_eq!(config.format, OutputFormat::Json);
    assert!(config.conventions);
    assert!(config.check_options().conventions);
}

#[test]
fn test_cli_overrides_config_file() {
    let dir = TempDir::new().expect("create temp dir");
    let config_path = dir.path().join("check.toml");
    fs::write(&config_path, "kind = \"course\"\n").expect("write config");

    let args = Args {
        config: Some(config_path),
        kind: Some(RecordKind::TranscribePitch),
        ..Args::default()
    };
    let config = Config::from_args(args).expect("create config");
    assert_eq!(config.kind, Some(RecordKind::TranscribePitch));
}

#[test]
fn test_bad_config_file_is_an_error() {
    let dir = TempDir::new().expect("create temp dir");
    let config_path = dir.path().join("check.toml");
    fs::write(&config_path, "kind = \"syllabus\"\n").expect("write config");

    let args = Args {
        config: Some(config_path),
        ..Args::default()
    };
    let err = Config::from_args(args).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}

#[test]
fn test_project_config_found_in_ancestor() {
    let dir = TempDir::new().expect("create temp dir");
    let nested = dir.path().join("Spring 2025").join("NYU");
    fs::create_dir_all(&nested).expect("create nested dirs");
    fs::write(dir.path().join(PROJECT_CONFIG_FILE), "extensions = [\"tsx\"]\n")
        .expect("write project config");

    let found = find_project_config(&nested).expect("project config");
    assert_eq!(found, dir.path().join(PROJECT_CONFIG_FILE));

    let file = FileConfig::load(&found).expect("load project config");
    assert_eq!(file.extensions, Some(vec!["tsx".to_string()]));
}
