//! Integration test for watch mode re-checking on file changes
mod common;

use std::path::{Path, PathBuf};
use std::time::Duration;

use syllabus_schema::config::{Args, Config};
use syllabus_schema::report::Summary;
use syllabus_schema::watch::watch;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::timeout;

#[tokio::test]
async fn test_rechecks_after_data_file_change() {
    let root = TempDir::new().expect("create temp dir");
    let data_path = root.path().join("bundle.json");
    tokio::fs::write(&data_path, "[]").await.expect("write initial file");

    let args = Args {
        paths: vec![PathBuf::from(root.path())],
        ..Args::default()
    };
    let config = Config::from_layers(args, Vec::new());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let watcher = watch(&config, move |report| {
        let _ = tx.send(report.summary);
    });

    let scenario = async {
        let first = rx.recv().await.expect("initial report");
        assert_eq!(first.records, 0);

        let batch = serde_json::json!([common::page_bundle(), {"FAQ": []}]);
        tokio::fs::write(&data_path, serde_json::to_string(&batch).unwrap())
            .await
            .expect("write changed file");

        // Keep reading until a report reflects the new content
        loop {
            let summary = rx.recv().await.expect("report after change");
            if summary.records == 2 {
                return summary;
            }
        }
    };

    tokio::select! {
        result = watcher => panic!("watcher stopped early: {:?}", result),
        summary = timeout(Duration::from_secs(10), scenario) => {
            let summary = summary.expect("change detected within timeout");
            assert_eq!(summary.invalid_records, 1);
        }
    }
}

/// Save the way editors do: write a sibling file, then rename it over the target
async fn rename_save(path: &Path, content: &str) {
    let staging = path.with_extension("json.tmp");
    tokio::fs::write(&staging, content)
        .await
        .expect("write staging file");
    tokio::fs::rename(&staging, path)
        .await
        .expect("rename over data file");
}

async fn next_with_records(
    rx: &mut mpsc::UnboundedReceiver<Summary>,
    records: usize,
) -> Summary {
    loop {
        let summary = rx.recv().await.expect("report after change");
        if summary.records == records {
            return summary;
        }
    }
}

#[tokio::test]
async fn test_single_file_survives_rename_saves() {
    let root = TempDir::new().expect("create temp dir");
    let data_path = root.path().join("bundle.json");
    tokio::fs::write(&data_path, "[]").await.expect("write initial file");

    let args = Args {
        paths: vec![data_path.clone()],
        ..Args::default()
    };
    let config = Config::from_layers(args, Vec::new());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let watcher = watch(&config, move |report| {
        let _ = tx.send(report.summary);
    });

    let scenario = async {
        let first = rx.recv().await.expect("initial report");
        assert_eq!(first.records, 0);

        let one = serde_json::json!([common::page_bundle()]);
        rename_save(&data_path, &one.to_string()).await;
        let after_first = next_with_records(&mut rx, 1).await;
        assert_eq!(after_first.invalid_records, 0);

        let two = serde_json::json!([common::page_bundle(), {"FAQ": []}]);
        rename_save(&data_path, &two.to_string()).await;
        next_with_records(&mut rx, 2).await
    };

    tokio::select! {
        result = watcher => panic!("watcher stopped early: {:?}", result),
        summary = timeout(Duration::from_secs(10), scenario) => {
            let summary = summary.expect("both saves detected within timeout");
            assert_eq!(summary.invalid_records, 1);
        }
    }
}
