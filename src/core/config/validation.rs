#![allow(clippy::result_large_err)]

use super::NormalizerConfig;
use crate::core::error::AppError;
use chrono::NaiveDate;
use url::Url;

pub const AUDIT_DATE_FORMAT: &str = "%Y-%m-%d";

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &NormalizerConfig) -> Result<(), AppError> {
        if config.discovery.suffix.trim().is_empty() {
            return Err(AppError::config("discovery.suffix cannot be empty"));
        }

        for (name, directory) in [
            ("flatten.directory", &config.flatten.directory),
            ("policy.directory", &config.policy.directory),
            ("criteria.directory", &config.criteria.directory),
        ] {
            if directory.as_os_str().is_empty() {
                return Err(AppError::config(format!("{name} cannot be empty")));
            }
        }

        let url_base = Url::parse(&config.policy.url_base)
            .map_err(|err| AppError::config(format!("invalid policy.url_base: {err}")))?;
        if !matches!(url_base.scheme(), "http" | "https") {
            return Err(AppError::config(
                "policy.url_base must use the http or https scheme",
            ));
        }

        if config.policy.security_version.trim().is_empty() {
            return Err(AppError::config("policy.security_version cannot be empty"));
        }

        NaiveDate::parse_from_str(&config.policy.last_security_audit, AUDIT_DATE_FORMAT)
            .map_err(|err| {
                AppError::config(format!(
                    "policy.last_security_audit must be a YYYY-MM-DD date: {err}"
                ))
            })?;

        Ok(())
    }
}
