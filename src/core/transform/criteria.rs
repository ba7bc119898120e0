use crate::core::document::KgDocument;
use crate::core::error::AppError;
use crate::core::transform::DocumentTransform;
use crate::core::types::PassKind;
use kg_types::{ApprovalCriteria, APPROVAL_CRITERIA_KEY};
use serde_json::{Map, Value};

/// Re-encodes every object-valued `approvalCriteria`, at any depth, as a compact string.
pub struct CriteriaNormalizeTransform;

impl DocumentTransform for CriteriaNormalizeTransform {
    fn kind(&self) -> PassKind {
        PassKind::CriteriaNormalize
    }

    fn transform(&self, doc: KgDocument) -> Result<KgDocument, AppError> {
        Ok(KgDocument::new(normalize_map(doc.as_map())))
    }
}

/// Return a copy of `value` with every object `approvalCriteria` encoded as a string.
pub fn normalize_criteria(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(normalize_map(map)),
        Value::Array(items) => Value::Array(items.iter().map(normalize_criteria).collect()),
        scalar => scalar.clone(),
    }
}

fn normalize_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| {
            let normalized = if key == APPROVAL_CRITERIA_KEY {
                match ApprovalCriteria::classify(value.clone()) {
                    Ok(criteria) => Value::String(criteria.into_encoded()),
                    Err(other) => normalize_criteria(&other),
                }
            } else {
                normalize_criteria(value)
            };
            (key.clone(), normalized)
        })
        .collect()
}
