use insta::assert_debug_snapshot;
use kg_normalizer::core::config::{ConfigLoader, ConfigValidator};
use kg_normalizer::core::{build_transform, PassKind, PolicySettings};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

fn clear_kgnorm_env() {
    for v in &[
        "KGNORM_FILE_SUFFIX",
        "KGNORM_FLATTEN_DIR",
        "KGNORM_POLICY_DIR",
        "KGNORM_POLICY_URL_BASE",
        "KGNORM_POLICY_SECURITY_VERSION",
        "KGNORM_POLICY_AUDIT_DATE",
        "KGNORM_CRITERIA_DIR",
    ] {
        env::remove_var(v);
    }
}

/// Test integration of config loading with environment variables
#[test]
#[serial]
fn test_config_loading_integration() {
    clear_kgnorm_env();
    let temp_dir = TempDir::new().unwrap();
    let workspace_path = temp_dir.path();

    let config_content = r#"
[discovery]
suffix = "_graph.json"

[flatten]
directory = "build/graphs"

[policy]
directory = "resources"
url_base = "https://kg.example.org/"
security_version = "2.0"
last_security_audit = "2026-02-14"

[criteria]
directory = "resources"
"#;
    fs::write(workspace_path.join("kgnorm.toml"), config_content).unwrap();

    let config = ConfigLoader::load_from_workspace(workspace_path).unwrap();
    ConfigValidator::validate(&config).unwrap();

    assert_eq!(config.discovery.suffix, "_graph.json");
    assert_debug_snapshot!(config.policy, @r#"
PolicyConfig {
    directory: "resources",
    url_base: "https://kg.example.org/",
    security_version: "2.0",
    last_security_audit: "2026-02-14",
}
"#);

    let settings = PolicySettings::from_config(&config.policy).unwrap();
    assert_eq!(settings.url_base, "https://kg.example.org");
    assert!(build_transform(PassKind::SecurityPolicy, &config).is_ok());
}

#[test]
#[serial]
fn test_env_overrides_beat_file() {
    clear_kgnorm_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("kgnorm.toml"),
        "[policy]\nsecurity_version = \"2.0\"\n",
    )
    .unwrap();

    env::set_var("KGNORM_POLICY_SECURITY_VERSION", "3.1");
    env::set_var("KGNORM_POLICY_AUDIT_DATE", "2026-10-01");
    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
    clear_kgnorm_env();

    assert_eq!(config.policy.security_version, "3.1");
    assert_eq!(config.policy.last_security_audit, "2026-10-01");
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_kgnorm_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("kgnorm.toml"),
        "[policy]\nlast_security_audit = \"01/03/2025\"\n",
    )
    .unwrap();

    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
    let err = ConfigValidator::validate(&config).unwrap_err();
    assert_eq!(err.code, "KG-CONFIG-001");
    assert!(build_transform(PassKind::SecurityPolicy, &config).is_err());
    assert!(build_transform(PassKind::Flatten, &config).is_ok());
}

#[test]
#[serial]
fn test_explicit_file_path() {
    clear_kgnorm_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    fs::write(&path, "[criteria]\ndirectory = \"/srv/kg\"\n").unwrap();

    let config = ConfigLoader::load(&path).unwrap();
    assert_eq!(
        config.directory_for(PassKind::CriteriaNormalize),
        std::path::Path::new("/srv/kg")
    );
}
