pub use crate::core::types::{ErrorCategory, ErrorSeverity};
use chrono::{DateTime, Utc};
use kg_types::ModelError;
use std::collections::HashMap;
use std::path::Path;

pub const CODE_PARSE: &str = "KG-PARSE-001";
pub const CODE_MISSING_FIELD: &str = "KG-FIELD-001";
pub const CODE_SHAPE: &str = "KG-SHAPE-001";
pub const CODE_IO: &str = "KG-IO-001";
pub const CODE_WRITE: &str = "KG-WRITE-001";
pub const CODE_CONFIG: &str = "KG-CONFIG-001";

#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    pub context: HashMap<String, String>,
    pub occurred_at: DateTime<Utc>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        let severity = match category {
            ErrorCategory::ParseError
            | ErrorCategory::MissingFieldError
            | ErrorCategory::ValidationError => ErrorSeverity::Warning,
            ErrorCategory::IoError
            | ErrorCategory::WriteError
            | ErrorCategory::InternalError => ErrorSeverity::Error,
        };
        AppError {
            category,
            severity,
            code: format!("ERR-{}", uuid::Uuid::new_v4()),
            message: message.into(),
            context: HashMap::new(),
            occurred_at: Utc::now(),
            source: None,
        }
    }

    pub fn with_source<T: Into<String>>(
        category: ErrorCategory,
        message: T,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        let mut error = AppError::new(category, message);
        error.source = Some(anyhow::anyhow!(source));
        error
    }

    pub fn with_code<T: Into<String>>(mut self, code: T) -> Self {
        self.code = code.into();
        self
    }

    /// Record the document the error belongs to.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.context
            .insert("path".to_string(), path.display().to_string());
        self
    }

    pub fn add_context(&mut self, key: &str, value: &str) {
        self.context.insert(key.to_string(), value.to_string());
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    pub fn parse<T: Into<String>>(message: T) -> Self {
        AppError::new(ErrorCategory::ParseError, message).with_code(CODE_PARSE)
    }

    pub fn write<T: Into<String>>(message: T) -> Self {
        AppError::new(ErrorCategory::WriteError, message).with_code(CODE_WRITE)
    }

    pub fn config<T: Into<String>>(message: T) -> Self {
        AppError::new(ErrorCategory::ValidationError, message).with_code(CODE_CONFIG)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)?;
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        if e.is_missing_field() {
            AppError::new(ErrorCategory::MissingFieldError, e.to_string())
                .with_code(CODE_MISSING_FIELD)
        } else {
            AppError::new(ErrorCategory::ValidationError, e.to_string()).with_code(CODE_SHAPE)
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        let message = e.to_string();
        let mut error = AppError::new(ErrorCategory::IoError, message).with_code(CODE_IO);
        error.source = Some(anyhow::anyhow!(e));
        error
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        let mut error =
            AppError::new(ErrorCategory::InternalError, e.to_string()).with_code("ANYHOW_ERROR");
        error.source = Some(e);
        error
    }
}
