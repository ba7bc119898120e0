#![allow(clippy::result_large_err)]

use crate::core::error::{AppError, CODE_WRITE};
use crate::core::types::ErrorCategory;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// List the regular files directly inside `directory` whose names end with `suffix`,
/// sorted by path. Subdirectories are not searched.
pub fn discover_documents(directory: &Path, suffix: &str) -> Result<Vec<PathBuf>, AppError> {
    let entries = fs::read_dir(directory).map_err(|e| AppError::from(e).with_path(directory))?;

    let mut documents = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| AppError::from(e).with_path(directory))?.path();
        let matches_suffix = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix));
        if matches_suffix && path.is_file() {
            documents.push(path);
        }
    }

    documents.sort();
    Ok(documents)
}

/// Replace `path` with `content` through a sibling temp file, so a failed write
/// never leaves a truncated document behind.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), AppError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| write_error(path, e))?;
    temp.write_all(content).map_err(|e| write_error(path, e))?;
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| write_error(path, e))?;
    }
    temp.persist(path).map_err(|e| write_error(path, e.error))?;
    Ok(())
}

fn write_error(path: &Path, source: std::io::Error) -> AppError {
    AppError::with_source(
        ErrorCategory::WriteError,
        format!("failed to write {}: {}", path.display(), source),
        Box::new(source),
    )
    .with_code(CODE_WRITE)
    .with_path(path)
}
