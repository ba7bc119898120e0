use crate::core::config::validation::AUDIT_DATE_FORMAT;
use crate::core::config::PolicyConfig;
use crate::core::document::KgDocument;
use crate::core::error::AppError;
use crate::core::transform::DocumentTransform;
use crate::core::types::{ErrorCategory, PassKind};
use chrono::NaiveDate;
use kg_types::{expect_object, InitData, ModelError};
use serde_json::{json, Map, Value};

const ALLOWED_INPUT_CHARACTERS: &str = r"^[a-zA-Z0-9\s\+\-\*\/\(\)\[\]\{\}\^\=\,\.\;]*$";

const SECURITY_VALIDATION_SCRIPT: &str = r"def validateOperation(input, context) {
                // Input validation
                if (!input.matches(configuration.security.input_validation.allowed_characters)) {
                    throw new SecurityException('Invalid input characters');
                }
                if (input.length() > configuration.security.input_validation.max_input_length) {
                    throw new SecurityException('Input too long');
                }
                // Resource monitoring
                def startTime = System.currentTimeMillis();
                def startMemory = Runtime.getRuntime().totalMemory();
                return [startTime: startTime, startMemory: startMemory];
            }";

const OPERATION_VERIFICATION_SCRIPT: &str = r"def verifyOperation(operation, context) {
                // Verify each step
                operation.steps.each { step ->
                    if (!validateStep(step)) {
                        throw new ValidationException('Invalid operation step: ' + step);
                    }
                }
                // Verify logical flow
                if (!verifyLogicalFlow(operation.steps)) {
                    throw new ValidationException('Invalid operation logic');
                }
                return true;
            }";

/// Values stamped into every document by the security policy pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicySettings {
    pub url_base: String,
    pub security_version: String,
    pub last_security_audit: NaiveDate,
}

impl PolicySettings {
    pub fn from_config(config: &PolicyConfig) -> Result<Self, AppError> {
        let last_security_audit =
            NaiveDate::parse_from_str(&config.last_security_audit, AUDIT_DATE_FORMAT).map_err(
                |err| {
                    AppError::config(format!(
                        "policy.last_security_audit must be a YYYY-MM-DD date: {err}"
                    ))
                },
            )?;
        Ok(PolicySettings {
            url_base: config.url_base.trim_end_matches('/').to_string(),
            security_version: config.security_version.clone(),
            last_security_audit,
        })
    }

    fn domain_url(&self, domain: &str, leaf: &str) -> Value {
        Value::String(format!("{}/{}/{}", self.url_base, domain, leaf))
    }
}

impl Default for PolicySettings {
    fn default() -> Self {
        PolicySettings {
            url_base: "https://example.com".to_string(),
            security_version: "1.0".to_string(),
            last_security_audit: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default(),
        }
    }
}

/// Merges the fixed security policy into a document's existing sections.
pub struct SecurityPolicyTransform {
    settings: PolicySettings,
}

impl SecurityPolicyTransform {
    pub fn new(settings: PolicySettings) -> Self {
        SecurityPolicyTransform { settings }
    }

    fn merge_configuration(
        &self,
        configuration: &mut Map<String, Value>,
        domain: &str,
    ) -> Result<(), AppError> {
        if let Some(blockchain) = configuration.get_mut("blockchain") {
            expect_object("configuration.blockchain", blockchain)?
                .insert("security".to_string(), blockchain_security());
        }

        configuration.insert(
            "monitoring".to_string(),
            json!({
                "performance_metrics": true,
                "error_tracking": true,
                "security_alerts": true,
                "resource_usage": true,
                "endpoints": {
                    "metrics": self.settings.domain_url(domain, "metrics"),
                    "alerts": self.settings.domain_url(domain, "alerts"),
                    "logs": self.settings.domain_url(domain, "logs")
                }
            }),
        );
        configuration.insert(
            "validation".to_string(),
            json!({
                "operation_verification": true,
                "input_sanitization": true,
                "output_validation": true,
                "resource_monitoring": true
            }),
        );

        if let Some(init_value) = configuration.get_mut("initData") {
            match InitData::from_value(init_value) {
                Some(mut init) => {
                    if init.inject_security_fetch() {
                        *init_value = init.into_value().map_err(|err| {
                            AppError::new(
                                ErrorCategory::InternalError,
                                format!("failed to encode initData: {err}"),
                            )
                        })?;
                    }
                }
                None => tracing::debug!("configuration.initData has no known shape; left as is"),
            }
        }
        Ok(())
    }
}

impl DocumentTransform for SecurityPolicyTransform {
    fn kind(&self) -> PassKind {
        PassKind::SecurityPolicy
    }

    fn transform(&self, doc: KgDocument) -> Result<KgDocument, AppError> {
        let mut doc = doc;
        // Only the endpoints and configuration sections need the domain.
        let domain: Result<String, ModelError> = doc.domain().map(str::to_lowercase);

        if !doc.contains_key("security") {
            doc.insert("security", security_section());
        }

        if let Some(endpoints) = doc.section_mut("endpoints")? {
            let domain = domain.clone()?;
            for leaf in ["security", "validation", "monitoring"] {
                endpoints.insert(leaf.to_string(), self.settings.domain_url(&domain, leaf));
            }
        }

        if let Some(scripts) = doc.section_mut("scripts")? {
            scripts.insert(
                "securityValidation".to_string(),
                Value::String(SECURITY_VALIDATION_SCRIPT.to_string()),
            );
            scripts.insert(
                "operationVerification".to_string(),
                Value::String(OPERATION_VERIFICATION_SCRIPT.to_string()),
            );
        }

        if let Some(metadata) = doc.section_mut("metadata")? {
            metadata.insert(
                "security_version".to_string(),
                Value::String(self.settings.security_version.clone()),
            );
            metadata.insert(
                "last_security_audit".to_string(),
                Value::String(
                    self.settings
                        .last_security_audit
                        .format(AUDIT_DATE_FORMAT)
                        .to_string(),
                ),
            );
            metadata.insert(
                "compliance".to_string(),
                json!({"gdpr": true, "ccpa": true, "hipaa": true}),
            );
        }

        if let Some(configuration) = doc.section_mut("configuration")? {
            let domain = domain?;
            self.merge_configuration(configuration, &domain)?;
        }

        Ok(doc)
    }
}

fn security_section() -> Value {
    json!({
        "input_validation": {
            "sanitization": true,
            "max_input_length": 10000,
            "allowed_characters": ALLOWED_INPUT_CHARACTERS,
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
    })
}

fn blockchain_security() -> Value {
    json!({
        "smart_contract_verification": true,
        "transaction_validation": true,
        "key_rotation_interval_hours": 24,
        "audit_trail": true
    })
}
