#![allow(clippy::result_large_err)] // Transforms return AppError for structured per-file diagnostics.

use crate::core::config::NormalizerConfig;
use crate::core::document::KgDocument;
use crate::core::error::AppError;
use crate::core::types::PassKind;

mod criteria;
mod flatten;
mod policy;

pub use criteria::{normalize_criteria, CriteriaNormalizeTransform};
pub use flatten::{flatten_agent, flatten_map, FlattenTransform};
pub use policy::{PolicySettings, SecurityPolicyTransform};

/// Pure transform from one KG document to its rewritten form.
pub trait DocumentTransform {
    fn kind(&self) -> PassKind;
    fn transform(&self, doc: KgDocument) -> Result<KgDocument, AppError>;
}

/// Run `transforms` in order, stopping at the first failure.
pub fn apply_pipeline(
    doc: KgDocument,
    transforms: &[Box<dyn DocumentTransform>],
) -> Result<KgDocument, AppError> {
    let mut current = doc;
    for transform in transforms {
        current = transform.transform(current).map_err(|mut err| {
            err.add_context("pass", &transform.kind().to_string());
            err
        })?;
    }
    Ok(current)
}

/// Build the transform for `pass` from the loaded configuration.
pub fn build_transform(
    pass: PassKind,
    config: &NormalizerConfig,
) -> Result<Box<dyn DocumentTransform>, AppError> {
    let transform: Box<dyn DocumentTransform> = match pass {
        PassKind::Flatten => Box::new(FlattenTransform),
        PassKind::SecurityPolicy => Box::new(SecurityPolicyTransform::new(
            PolicySettings::from_config(&config.policy)?,
        )),
        PassKind::CriteriaNormalize => Box::new(CriteriaNormalizeTransform),
    };
    Ok(transform)
}
