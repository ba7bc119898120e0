pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod transform;
pub mod types;

pub use batch::{BatchReport, BatchRunner, FailedFile};
pub use config::{ConfigLoader, ConfigValidator, NormalizerConfig};
pub use document::KgDocument;
pub use error::{AppError, ErrorSeverity};
pub use transform::{
    apply_pipeline, build_transform, CriteriaNormalizeTransform, DocumentTransform,
    FlattenTransform, PolicySettings, SecurityPolicyTransform,
};
pub use types::*;
