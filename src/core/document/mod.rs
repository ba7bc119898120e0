#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use kg_types::{expect_object, ModelError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A knowledge-graph document: an ordered JSON object loaded in full.
///
/// Key order is preserved through every transform so rewritten files diff cleanly
/// against their previous versions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgDocument {
    fields: Map<String, Value>,
}

impl KgDocument {
    pub fn new(fields: Map<String, Value>) -> Self {
        KgDocument { fields }
    }

    /// Parse document text. The root must be a JSON object.
    pub fn parse(text: &str) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| AppError::parse(format!("invalid JSON: {}", e)))?;
        Self::try_from(value)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Insert or overwrite; an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    /// Remove a key without disturbing the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// Take a value out, leaving `null` in its slot so the key keeps its position.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.fields.get_mut(key).map(std::mem::take)
    }

    /// Mutable access to a top-level section that must be an object, if present.
    pub fn section_mut(&mut self, key: &str) -> Result<Option<&mut Map<String, Value>>, ModelError> {
        match self.fields.get_mut(key) {
            Some(value) => expect_object(key, value).map(Some),
            None => Ok(None),
        }
    }

    /// The document's `domain`, as used in generated URLs.
    pub fn domain(&self) -> Result<&str, ModelError> {
        match self.fields.get("domain") {
            Some(Value::String(domain)) => Ok(domain),
            Some(_) => Err(ModelError::UnexpectedShape {
                key: "domain".to_string(),
                expected: "a string",
            }),
            None => Err(ModelError::MissingDomain),
        }
    }
}

impl TryFrom<Value> for KgDocument {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(KgDocument { fields }),
            other => Err(AppError::parse(format!(
                "document root must be an object, found {}",
                json_type_name(&other)
            ))),
        }
    }
}

impl From<KgDocument> for Value {
    fn from(document: KgDocument) -> Self {
        Value::Object(document.fields)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
