//! Typed views over the sections of a knowledge-graph document.
//!
//! The documents themselves stay ordered JSON maps; these types are decoded at the
//! point of use so that transforms can match on explicit shapes instead of probing
//! raw values repeatedly.

pub mod criteria;
pub mod error;
pub mod example;
pub mod init_data;

pub use criteria::{ApprovalCriteria, CriteriaFields, APPROVAL_CRITERIA_KEY};
pub use error::ModelError;
pub use example::{ExampleSection, NormalizedExample};
pub use init_data::{InitData, InitStep, SECURITY_CONFIG_BINDING};

use serde_json::{Map, Value};

/// Borrow `value` as a mapping, reporting `key` when it has another shape.
pub fn expect_object<'a>(
    key: &str,
    value: &'a mut Value,
) -> Result<&'a mut Map<String, Value>, ModelError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ModelError::UnexpectedShape {
            key: key.to_string(),
            expected: "an object",
        }),
    }
}
