#![allow(clippy::result_large_err)]

use super::{NormalizerConfig, CONFIG_FILE_NAME};
use crate::core::error::AppError;
use std::env;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from workspace root (workspace/kgnorm.toml)
    /// Environment variables override config file values
    pub fn load_from_workspace(workspace_path: &Path) -> Result<NormalizerConfig, AppError> {
        Self::load(&workspace_path.join(CONFIG_FILE_NAME))
    }

    /// Load config from an explicit file, falling back to defaults when it is absent
    pub fn load(path: &Path) -> Result<NormalizerConfig, AppError> {
        let mut config = Self::load_from_file(path)?.unwrap_or_default();
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<NormalizerConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: NormalizerConfig = toml::from_str(&content).map_err(|e| {
            AppError::config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Some(config))
    }

    /// Environment variables take precedence over config file values
    fn apply_env_overrides(config: &mut NormalizerConfig) {
        if let Ok(suffix) = env::var("KGNORM_FILE_SUFFIX") {
            config.discovery.suffix = suffix;
        }

        if let Ok(directory) = env::var("KGNORM_FLATTEN_DIR") {
            config.flatten.directory = PathBuf::from(directory);
        }

        if let Ok(directory) = env::var("KGNORM_POLICY_DIR") {
            config.policy.directory = PathBuf::from(directory);
        }

        if let Ok(url_base) = env::var("KGNORM_POLICY_URL_BASE") {
            config.policy.url_base = url_base;
        }

        if let Ok(version) = env::var("KGNORM_POLICY_SECURITY_VERSION") {
            config.policy.security_version = version;
        }

        if let Ok(audit_date) = env::var("KGNORM_POLICY_AUDIT_DATE") {
            config.policy.last_security_audit = audit_date;
        }

        if let Ok(directory) = env::var("KGNORM_CRITERIA_DIR") {
            config.criteria.directory = PathBuf::from(directory);
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "KGNORM_FILE_SUFFIX - Override the KG document file suffix (default: _KG.json)",
            "KGNORM_FLATTEN_DIR - Override the flatten pass directory (default: safeAI-plugin/target/classes)",
            "KGNORM_POLICY_DIR - Override the security policy pass directory (default: safeAI-plugin/src/main/resources)",
            "KGNORM_POLICY_URL_BASE - Override the base of generated security URLs (default: https://example.com)",
            "KGNORM_POLICY_SECURITY_VERSION - Override metadata.security_version (default: 1.0)",
            "KGNORM_POLICY_AUDIT_DATE - Override metadata.last_security_audit (default: 2025-03-01)",
            "KGNORM_CRITERIA_DIR - Override the criteria normalization directory (default: safeAI-plugin/src/main/resources)",
        ]
    }
}
