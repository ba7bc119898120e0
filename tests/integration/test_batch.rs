use kg_normalizer::core::{
    build_transform, BatchRunner, ErrorCategory, FileOutcome, NormalizerConfig, PassKind,
};
use kg_normalizer::utils::discover_documents;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn runner(passes: &[PassKind]) -> BatchRunner {
    let config = NormalizerConfig::default();
    BatchRunner::new(
        passes
            .iter()
            .map(|pass| build_transform(*pass, &config).unwrap())
            .collect(),
    )
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn seed(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let broken = dir.join("Broken_KG.json");
    fs::write(&broken, "{\"domain\": \"Law\",").unwrap();

    let law = dir.join("Law_KG.json");
    fs::write(
        &law,
        r#"{
  "domain": "Law",
  "endpoints": {"cases": "https://example.com/law/cases"},
  "metadata": {"author": "kg-team"},
  "configuration": {"initData": "def cases = 1;\nreturn [cases: cases];"}
}"#,
    )
    .unwrap();

    let notes = dir.join("notes.json");
    fs::write(&notes, "{\"domain\": \"Notes\", \"endpoints\": {}}").unwrap();
    (broken, law, notes)
}

#[test]
fn test_invalid_file_is_skipped_and_valid_files_are_updated() {
    let temp_dir = TempDir::new().unwrap();
    let (broken, law, notes) = seed(temp_dir.path());

    let targets = discover_documents(temp_dir.path(), "_KG.json").unwrap();
    assert_eq!(targets, vec![broken.clone(), law.clone()]);

    let report = runner(&[PassKind::SecurityPolicy]).run(&targets);

    assert_eq!(report.outcome_of(&broken), Some(FileOutcome::Failed));
    assert_eq!(report.failed[0].category, ErrorCategory::ParseError);
    assert_eq!(report.outcome_of(&law), Some(FileOutcome::Updated));
    assert_eq!(report.to_string(), "2 file(s): 1 updated, 0 unchanged, 1 failed");

    assert_eq!(
        fs::read_to_string(&broken).unwrap(),
        "{\"domain\": \"Law\","
    );
    assert_eq!(
        fs::read_to_string(&notes).unwrap(),
        "{\"domain\": \"Notes\", \"endpoints\": {}}"
    );

    let secured = read_json(&law);
    assert_eq!(secured["metadata"]["author"], json!("kg-team"));
    assert_eq!(
        secured["endpoints"]["security"],
        json!("https://example.com/law/security")
    );
    assert!(secured["configuration"]["initData"]
        .as_str()
        .unwrap()
        .contains("return [cases: cases, security: securityConfig];"));
}

#[test]
fn test_second_run_reports_no_updates() {
    let temp_dir = TempDir::new().unwrap();
    let (_, law, _) = seed(temp_dir.path());
    let runner = runner(&[PassKind::SecurityPolicy]);

    let first = runner.run(std::slice::from_ref(&law));
    assert_eq!(first.updated, vec![law.clone()]);
    let after_first = fs::read_to_string(&law).unwrap();

    let second = runner.run(std::slice::from_ref(&law));
    assert_eq!(second.unchanged, vec![law.clone()]);
    assert_eq!(fs::read_to_string(&law).unwrap(), after_first);
}

#[test]
fn test_passes_compose_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Ethics_KG.json");
    fs::write(
        &path,
        r#"{
  "domain": "Ethics",
  "endpoints": {"api": "https://x"},
  "agents": [{"name": "Judge", "approvalCriteria": {"effectivenessThreshold": 0.8}}]
}"#,
    )
    .unwrap();

    let report = runner(&[
        PassKind::SecurityPolicy,
        PassKind::CriteriaNormalize,
        PassKind::Flatten,
    ])
    .run(std::slice::from_ref(&path));
    assert_eq!(report.updated.len(), 1);

    let doc = read_json(&path);
    assert!(doc.get("endpoints").is_none());
    assert_eq!(
        doc["endpoint_security"],
        json!("https://example.com/ethics/security")
    );
    assert_eq!(doc["agents"][0]["effectiveness_threshold"], json!(0.8));
    assert_eq!(doc["agents"][0]["ethics_guidelines"], json!(""));
    assert!(doc["security"].is_object());
}

#[test]
fn test_output_keeps_key_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Order_KG.json");
    fs::write(
        &path,
        r#"{"zeta": 1, "agents": [{"approvalCriteria": {"b": 1, "a": 2}}], "alpha": 2}"#,
    )
    .unwrap();

    runner(&[PassKind::CriteriaNormalize]).run(std::slice::from_ref(&path));

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\n  \"zeta\": 1,\n  \"agents\": [\n    {\n      \"approvalCriteria\": \"{\\\"b\\\": 1, \\\"a\\\": 2}\"\n    }\n  ],\n  \"alpha\": 2\n}"
    );
}

#[test]
fn test_large_numbers_survive_a_rewrite() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Ids_KG.json");
    fs::write(
        &path,
        r#"{"endpoints": {"a": "x"}, "id": 123456789012345678901234567890, "offset": -98765432109876543210, "ratio": 0.1000000000000000055511151231257827}"#,
    )
    .unwrap();

    let report = runner(&[PassKind::Flatten]).run(std::slice::from_ref(&path));
    assert_eq!(report.updated, vec![path.clone()]);

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\n  \"id\": 123456789012345678901234567890,\n  \"offset\": -98765432109876543210,\n  \"ratio\": 0.1000000000000000055511151231257827,\n  \"endpoint_a\": \"x\"\n}"
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_failed_write_keeps_prior_content_and_batch_continues() {
    use std::os::fd::AsRawFd;

    let temp_dir = TempDir::new().unwrap();
    let original = r#"{"domain": "Law", "endpoints": {"cases": "https://x"}}"#;
    let locked = temp_dir.path().join("Locked_KG.json");
    fs::write(&locked, original).unwrap();
    let open = fs::File::open(&locked).unwrap();
    // Readable through procfs, but no sibling temp file can be created there.
    let unwritable = PathBuf::from(format!("/proc/self/fd/{}", open.as_raw_fd()));

    let other = temp_dir.path().join("Open_KG.json");
    fs::write(&other, r#"{"domain": "Math", "endpoints": {"api": "https://y"}}"#).unwrap();

    let report = runner(&[PassKind::Flatten]).run(&[unwritable.clone(), other.clone()]);

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, unwritable);
    assert_eq!(report.failed[0].category, ErrorCategory::WriteError);
    assert_eq!(fs::read_to_string(&locked).unwrap(), original);

    assert_eq!(report.updated, vec![other.clone()]);
    assert_eq!(read_json(&other)["endpoint_api"], json!("https://y"));
    assert_eq!(report.to_string(), "2 file(s): 1 updated, 0 unchanged, 1 failed");
    drop(open);
}
