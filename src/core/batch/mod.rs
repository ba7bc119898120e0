#![allow(clippy::result_large_err)] // AppError contains rich context; boxing would discard diagnostics needed for reporting.

use crate::core::document::KgDocument;
use crate::core::error::AppError;
use crate::core::transform::{apply_pipeline, DocumentTransform};
use crate::core::types::{ErrorCategory, ErrorSeverity, FileOutcome};
use crate::utils::serialization::{FileSerializer, FileUtils, JsonSerializer};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Applies an ordered list of transforms to each file of an explicit target list.
///
/// Files are independent: a failure is recorded and the batch moves on.
pub struct BatchRunner {
    transforms: Vec<Box<dyn DocumentTransform>>,
    serializer: JsonSerializer,
    files: FileUtils,
}

/// A file the batch could not process.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedFile {
    pub path: PathBuf,
    pub category: ErrorCategory,
    pub message: String,
}

/// Per-file outcomes of one batch run, in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub updated: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.updated.len() + self.unchanged.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn outcome_of(&self, path: &Path) -> Option<FileOutcome> {
        if self.updated.iter().any(|p| p == path) {
            Some(FileOutcome::Updated)
        } else if self.unchanged.iter().any(|p| p == path) {
            Some(FileOutcome::Unchanged)
        } else if self.failed.iter().any(|f| f.path == path) {
            Some(FileOutcome::Failed)
        } else {
            None
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s): {} updated, {} unchanged, {} failed",
            self.total(),
            self.updated.len(),
            self.unchanged.len(),
            self.failed.len()
        )
    }
}

impl BatchRunner {
    pub fn new(transforms: Vec<Box<dyn DocumentTransform>>) -> Self {
        BatchRunner {
            transforms,
            serializer: JsonSerializer,
            files: FileUtils,
        }
    }

    pub fn with_transform(mut self, transform: Box<dyn DocumentTransform>) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Process every target in order and report what happened to each.
    pub fn run(&self, targets: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::default();

        for path in targets {
            tracing::info!("Processing {}...", path.display());
            match self.process_file(path) {
                Ok(FileOutcome::Updated) => {
                    tracing::info!("Fixed {}", path.display());
                    report.updated.push(path.clone());
                }
                Ok(_) => {
                    tracing::info!("No update needed for {}", path.display());
                    report.unchanged.push(path.clone());
                }
                Err(err) => {
                    match err.severity() {
                        ErrorSeverity::Warning => tracing::warn!(
                            code = %err.code,
                            "Error processing {}: {}",
                            path.display(),
                            err.message
                        ),
                        ErrorSeverity::Error => tracing::error!(
                            code = %err.code,
                            "Error processing {}: {}",
                            path.display(),
                            err.message
                        ),
                    }
                    report.failed.push(FailedFile {
                        path: path.clone(),
                        category: err.category,
                        message: err.message,
                    });
                }
            }
        }

        tracing::info!("{}", report);
        report
    }

    /// Load, transform and, when anything changed, rewrite one document.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome, AppError> {
        let raw: Value = self.files.load_from_file(path, &self.serializer)?;
        let original = KgDocument::try_from(raw).map_err(|e| e.with_path(path))?;

        let transformed =
            apply_pipeline(original.clone(), &self.transforms).map_err(|e| e.with_path(path))?;
        if transformed == original {
            return Ok(FileOutcome::Unchanged);
        }

        self.files
            .save_to_file(path, &transformed, &self.serializer)?;
        Ok(FileOutcome::Updated)
    }
}
