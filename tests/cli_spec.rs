//! CLI integration tests.
//!
//! These run the built `rescue-dash` binary against a temporary database.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::{json, Value};

fn run(db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rescue-dash"))
        .arg("--db")
        .arg(db)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run rescue-dash")
}

fn write_export(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("aac_shelter_outcomes.json");
    let docs = json!([
        {
            "_id": { "$oid": "64b0c1d2e3f4a5b6c7d8e9f0" },
            "rec_num": 1,
            "animal_id": "A700001",
            "animal_type": "Dog",
            "breed": "Newfoundland",
            "name": "Luna",
            "sex_upon_outcome": "Intact Female",
            "age_upon_outcome": "1 year",
            "age_upon_outcome_in_weeks": 52.0,
            "location_lat": 30.5,
            "location_long": -97.6
        },
        {
            "_id": { "$oid": "64b0c1d2e3f4a5b6c7d8e9f1" },
            "rec_num": 2,
            "animal_id": "A700002",
            "animal_type": "Dog",
            "breed": "Rottweiler",
            "name": "Max",
            "sex_upon_outcome": "Intact Male",
            "age_upon_outcome_in_weeks": 80.0
        },
        {
            "rec_num": 3,
            "animal_id": "A700003",
            "animal_type": "Cat",
            "breed": "Domestic Shorthair Mix",
            "name": "",
            "sex_upon_outcome": "Spayed Female",
            "age_upon_outcome_in_weeks": 8.0
        }
    ]);
    std::fs::write(&path, docs.to_string()).expect("Failed to write export");
    path
}

#[test]
fn import_then_query_by_selector() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db = dir.path().join("shelter.db");
    let export = write_export(dir.path());

    let output = run(&db, &["import", export.to_str().expect("utf-8 path")]);
    assert!(output.status.success(), "import failed: {:?}", output);

    let output = run(&db, &["query", "water"]);
    assert!(output.status.success());
    let records: Value = serde_json::from_slice(&output.stdout).expect("JSON output");
    let records = records.as_array().expect("array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Luna");
    assert!(records[0].get("id").is_none());
    assert!(records[0].get("_id").is_none());

    let output = run(&db, &["query", "reset"]);
    let records: Value = serde_json::from_slice(&output.stdout).expect("JSON output");
    assert_eq!(records.as_array().expect("array").len(), 3);
}

#[test]
fn unknown_selector_lists_everything() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db = dir.path().join("shelter.db");
    let export = write_export(dir.path());
    run(&db, &["import", export.to_str().expect("utf-8 path")]);

    let output = run(&db, &["query", "blizzard"]);
    assert!(output.status.success());
    let records: Value = serde_json::from_slice(&output.stdout).expect("JSON output");
    assert_eq!(records.as_array().expect("array").len(), 3);
}

#[test]
fn import_rejects_invalid_document_atomically() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db = dir.path().join("shelter.db");
    let export = dir.path().join("broken.json");
    std::fs::write(
        &export,
        json!([
            { "animal_type": "Dog", "breed": "Beagle", "sex_upon_outcome": "Intact Male",
              "age_upon_outcome_in_weeks": 30.0 },
            { "animal_type": "Dog", "sex_upon_outcome": "Intact Male" }
        ])
        .to_string(),
    )
    .expect("Failed to write export");

    let output = run(&db, &["import", export.to_str().expect("utf-8 path")]);
    assert!(!output.status.success());

    let output = run(&db, &["query"]);
    let records: Value = serde_json::from_slice(&output.stdout).expect("JSON output");
    assert!(records.as_array().expect("array").is_empty());
}
