//! Metadata store error-message, format-compatibility and atomic-write tests.

use assert_fs::prelude::*;
use gudoai_core::{
    metadata::{self, META_FILE_NAME},
    MetadataError, ProjectId, ProjectMetadata,
};
use predicates::prelude::predicate;
use rstest::rstest;
use std::fs;

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_metadata_mentions_path() {
    let project = assert_fs::TempDir::new().expect("tempdir");
    let err = metadata::load_at(project.path()).unwrap_err();
    assert!(matches!(err, MetadataError::NotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("metadata not found"));
    assert!(err.to_string().contains(META_FILE_NAME));
}

#[test]
fn load_missing_project_dir_is_not_found() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let err = metadata::load_at(&root.path().join("nope")).unwrap_err();
    assert!(matches!(err, MetadataError::NotFound { .. }), "got: {err}");
}

#[rstest]
#[case::truncated("{\"project_id\": \"abc\", \"version\": ")]
#[case::wrong_shape("[1, 2, 3]")]
#[case::version_not_a_number(
    r#"{"project_id":"a","version":"one","description":"d","last_api_sync_commit_hash":null,"api_registered":false}"#
)]
#[case::missing_project_id(
    r#"{"version":0,"description":"d","last_api_sync_commit_hash":null,"api_registered":false}"#
)]
fn load_malformed_returns_invalid_format(#[case] body: &str) {
    let project = assert_fs::TempDir::new().expect("tempdir");
    project.child(META_FILE_NAME).write_str(body).expect("write");

    let err = metadata::load_at(project.path()).unwrap_err();
    assert!(matches!(err, MetadataError::InvalidFormat { .. }), "got: {err}");
    assert!(err.to_string().contains("is not valid JSON"));
}

// ---------------------------------------------------------------------------
// 2. On-disk format
// ---------------------------------------------------------------------------

#[test]
fn loads_document_written_by_hand() {
    let project = assert_fs::TempDir::new().expect("tempdir");
    project
        .child(META_FILE_NAME)
        .write_str(
            r#"{
  "project_id": "7d3f1b0e-0000-4000-8000-000000000000",
  "version": 2,
  "description": "hand written",
  "last_api_sync_commit_hash": "abc123",
  "api_registered": true
}"#,
        )
        .expect("write");

    let meta = metadata::load_at(project.path()).expect("load");
    assert_eq!(meta.project_id, ProjectId::from("7d3f1b0e-0000-4000-8000-000000000000"));
    assert_eq!(meta.version, 2);
    assert_eq!(meta.last_api_sync_commit_hash.as_deref(), Some("abc123"));
    assert!(meta.api_registered);
}

#[test]
fn missing_registered_flag_defaults_to_false() {
    let project = assert_fs::TempDir::new().expect("tempdir");
    project
        .child(META_FILE_NAME)
        .write_str(r#"{"project_id":"p","version":0,"description":"d","last_api_sync_commit_hash":null}"#)
        .expect("write");

    let meta = metadata::load_at(project.path()).expect("load");
    assert!(!meta.api_registered);
}

#[test]
fn save_writes_every_field() {
    let project = assert_fs::TempDir::new().expect("tempdir");
    metadata::save_at(project.path(), &ProjectMetadata::new()).expect("save");

    let file = project.child(META_FILE_NAME);
    file.assert(predicate::path::exists());
    for key in [
        "\"project_id\"",
        "\"version\": 0",
        "\"description\"",
        "\"last_api_sync_commit_hash\": null",
        "\"api_registered\": false",
    ] {
        file.assert(predicate::str::contains(key));
    }
}

// ---------------------------------------------------------------------------
// 3. Atomic write safety
// ---------------------------------------------------------------------------

#[test]
fn stale_tmp_does_not_affect_load() {
    let project = assert_fs::TempDir::new().expect("tempdir");
    let meta = ProjectMetadata::new();
    metadata::save_at(project.path(), &meta).expect("save");

    // Simulate crash: .tmp written but process died before rename
    fs::write(project.path().join("gudoai_meta.json.tmp"), b"CRASH").expect("write tmp");

    let loaded = metadata::load_at(project.path()).expect("load");
    assert_eq!(loaded, meta);
}

#[test]
fn save_overwrites_previous_document() {
    let project = assert_fs::TempDir::new().expect("tempdir");
    let mut meta = ProjectMetadata::new();
    metadata::save_at(project.path(), &meta).expect("save v0");
    meta.update_description("second");
    metadata::save_at(project.path(), &meta).expect("save v1");

    let loaded = metadata::load_at(project.path()).expect("load");
    assert_eq!(loaded.version, 1);
    assert_eq!(loaded.description, "second");
}
