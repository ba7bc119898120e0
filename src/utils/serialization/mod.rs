#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use crate::utils::files::write_atomic;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::Path;

pub trait Serializer {
    fn serialize<T: Serialize>(&self, data: &T) -> Result<Vec<u8>, AppError>;
    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, AppError>;
}

/// Two-space indented JSON, UTF-8, no trailing newline.
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize<T: Serialize>(&self, data: &T) -> Result<Vec<u8>, AppError> {
        serde_json::to_vec_pretty(data).map_err(|e| {
            AppError::with_source(
                ErrorCategory::WriteError,
                format!("failed to encode JSON: {}", e),
                Box::new(e),
            )
            .with_code(crate::core::error::CODE_WRITE)
        })
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, AppError> {
        serde_json::from_slice(data).map_err(|e| AppError::parse(format!("invalid JSON: {}", e)))
    }
}

pub trait FileSerializer {
    fn save_to_file<T, S: Serializer>(
        &self,
        path: &Path,
        data: &T,
        serializer: &S,
    ) -> Result<(), AppError>
    where
        T: Serialize;
    fn load_from_file<T, S: Serializer>(&self, path: &Path, serializer: &S) -> Result<T, AppError>
    where
        T: DeserializeOwned;
}

pub struct FileUtils;

impl FileSerializer for FileUtils {
    fn save_to_file<T, S: Serializer>(
        &self,
        path: &Path,
        data: &T,
        serializer: &S,
    ) -> Result<(), AppError>
    where
        T: Serialize,
    {
        let content = serializer.serialize(data)?;
        write_atomic(path, &content)
    }

    fn load_from_file<T, S: Serializer>(&self, path: &Path, serializer: &S) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let content = fs::read(path).map_err(|e| AppError::from(e).with_path(path))?;
        serializer
            .deserialize(&content)
            .map_err(|e| e.with_path(path))
    }
}
