pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;

use crate::core::types::PassKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the workspace root.
pub const CONFIG_FILE_NAME: &str = "kgnorm.toml";

/// Normalizer configuration loaded from kgnorm.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NormalizerConfig {
    /// Which files in a pass directory are treated as KG documents
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Flatten pass configuration
    #[serde(default)]
    pub flatten: FlattenConfig,

    /// Security policy pass configuration
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Criteria normalization pass configuration
    #[serde(default)]
    pub criteria: CriteriaConfig,
}

impl NormalizerConfig {
    /// Configured directory of `pass`, as written in the config file.
    pub fn directory_for(&self, pass: PassKind) -> &Path {
        match pass {
            PassKind::Flatten => &self.flatten.directory,
            PassKind::SecurityPolicy => &self.policy.directory,
            PassKind::CriteriaNormalize => &self.criteria.directory,
        }
    }
}

/// Discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// File name suffix of KG documents
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

/// Flatten pass configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlattenConfig {
    /// Directory holding the documents, relative to the workspace
    #[serde(default = "default_flatten_directory")]
    pub directory: PathBuf,
}

/// Security policy pass configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_resources_directory")]
    pub directory: PathBuf,

    /// Base of every URL written into endpoints and monitoring blocks
    #[serde(default = "default_url_base")]
    pub url_base: String,

    #[serde(default = "default_security_version")]
    pub security_version: String,

    /// Date stamped into metadata.last_security_audit (YYYY-MM-DD)
    #[serde(default = "default_last_security_audit")]
    pub last_security_audit: String,
}

/// Criteria normalization pass configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaConfig {
    #[serde(default = "default_resources_directory")]
    pub directory: PathBuf,
}

fn default_suffix() -> String {
    "_KG.json".to_string()
}

fn default_flatten_directory() -> PathBuf {
    PathBuf::from("safeAI-plugin/target/classes")
}

fn default_resources_directory() -> PathBuf {
    PathBuf::from("safeAI-plugin/src/main/resources")
}

fn default_url_base() -> String {
    "https://example.com".to_string()
}

fn default_security_version() -> String {
    "1.0".to_string()
}

fn default_last_security_audit() -> String {
    "2025-03-01".to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            suffix: default_suffix(),
        }
    }
}

impl Default for FlattenConfig {
    fn default() -> Self {
        FlattenConfig {
            directory: default_flatten_directory(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            directory: default_resources_directory(),
            url_base: default_url_base(),
            security_version: default_security_version(),
            last_security_audit: default_last_security_audit(),
        }
    }
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        CriteriaConfig {
            directory: default_resources_directory(),
        }
    }
}

/// Resolve a configured directory against the workspace root.
pub fn resolve_directory(workspace_root: &Path, directory: &Path) -> PathBuf {
    if directory.is_absolute() {
        directory.to_path_buf()
    } else {
        workspace_root.join(directory)
    }
}
