use insta::assert_snapshot;
use kg_normalizer::core::{
    DocumentTransform, ErrorCategory, KgDocument, PolicySettings, SecurityPolicyTransform,
};
use kg_normalizer::utils::{JsonSerializer, Serializer};
use serde_json::{json, Value};

fn secure(value: Value) -> KgDocument {
    SecurityPolicyTransform::new(PolicySettings::default())
        .transform(KgDocument::try_from(value).unwrap())
        .unwrap()
}

fn render(value: &Value) -> String {
    String::from_utf8(JsonSerializer.serialize(value).unwrap()).unwrap()
}

#[test]
fn test_default_security_section() {
    let doc = secure(json!({"domain": "Physics"}));
    let security = doc.get("security").unwrap();
    assert_eq!(
        security["agent_security"]["rate_limiting"]["requests_per_minute"],
        json!(60)
    );
    assert_snapshot!(render(security), @r#"
{
  "input_validation": {
    "sanitization": true,
    "max_input_length": 10000,
    "allowed_characters": "^[a-zA-Z0-9\\s\\+\\-\\*\\/\\(\\)\\[\\]\\{\\}\\^\\=\\,\\.\\;]*$",
    "timeout_ms": 30000
  },
  "output_validation": {
    "verify_steps": true,
    "max_output_length": 50000,
    "result_validation": true
  },
  "agent_security": {
    "isolation_level": "high",
    "resource_limits": {
      "max_memory_mb": 1024,
      "max_cpu_time_ms": 60000,
      "max_disk_io_mb": 100
    },
    "rate_limiting": {
      "requests_per_minute": 60,
      "burst_limit": 10
    }
  }
}
"#);
}

#[test]
fn test_existing_security_is_untouched() {
    let existing = json!({"input_validation": {"max_input_length": 5}});
    let doc = secure(json!({"domain": "Physics", "security": existing.clone()}));
    assert_eq!(doc.get("security"), Some(&existing));
}

#[test]
fn test_finance_endpoints() {
    let doc = secure(json!({"domain": "Finance", "endpoints": {"api": "https://x"}}));
    let endpoints = doc.get("endpoints").unwrap();
    assert_eq!(endpoints["api"], json!("https://x"));
    assert_eq!(
        endpoints["security"],
        json!("https://example.com/finance/security")
    );
    assert_eq!(
        endpoints["validation"],
        json!("https://example.com/finance/validation")
    );
    assert_eq!(
        endpoints["monitoring"],
        json!("https://example.com/finance/monitoring")
    );
}

#[test]
fn test_configuration_monitoring_block() {
    let doc = secure(json!({
        "domain": "Ethics",
        "configuration": {"threads": 4}
    }));
    let configuration = doc.get("configuration").unwrap();
    assert_eq!(configuration["threads"], json!(4));
    assert!(configuration.get("blockchain").is_none());
    assert_snapshot!(render(&configuration["monitoring"]), @r#"
{
  "performance_metrics": true,
  "error_tracking": true,
  "security_alerts": true,
  "resource_usage": true,
  "endpoints": {
    "metrics": "https://example.com/ethics/metrics",
    "alerts": "https://example.com/ethics/alerts",
    "logs": "https://example.com/ethics/logs"
  }
}
"#);
}

#[test]
fn test_step_form_init_data_gets_fetch_step() {
    let doc = secure(json!({
        "domain": "Ethics",
        "configuration": {
            "initData": [
                {"step": "log", "message": "booting"},
                {"step": "return", "fields": {}}
            ]
        }
    }));
    assert_eq!(
        doc.get("configuration").unwrap()["initData"],
        json!([
            {"step": "log", "message": "booting"},
            {"step": "fetch", "binding": "securityConfig", "endpoint": "security"},
            {"step": "return", "fields": {"security": "securityConfig"}}
        ])
    );
}

#[test]
fn test_unknown_init_data_shape_is_left_alone() {
    let doc = secure(json!({
        "domain": "Ethics",
        "configuration": {"initData": {"script": "return [];"}}
    }));
    assert_eq!(
        doc.get("configuration").unwrap()["initData"],
        json!({"script": "return [];"})
    );
}

#[test]
fn test_missing_domain_only_matters_when_needed() {
    let doc = secure(json!({"scripts": {}}));
    assert!(doc.get("scripts").unwrap()["securityValidation"].is_string());

    let err = SecurityPolicyTransform::new(PolicySettings::default())
        .transform(KgDocument::try_from(json!({"configuration": {}})).unwrap())
        .unwrap_err();
    assert_eq!(err.category, ErrorCategory::MissingFieldError);
}

#[test]
fn test_non_object_section_is_rejected() {
    let err = SecurityPolicyTransform::new(PolicySettings::default())
        .transform(KgDocument::try_from(json!({"domain": "X", "metadata": "v1"})).unwrap())
        .unwrap_err();
    assert_eq!(err.category, ErrorCategory::ValidationError);
    assert_eq!(err.code, "KG-SHAPE-001");
}
