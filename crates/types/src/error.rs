//! Errors raised while decoding document sections.

/// A section did not have the shape its transform relies on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// An example entry lacks a field that has no default.
    #[error("{section}[{index}] is missing required field `{field}`")]
    MissingField {
        section: &'static str,
        index: usize,
        field: &'static str,
    },

    /// The document has no `domain`, but a merge step needs it.
    #[error("document has no `domain` field")]
    MissingDomain,

    /// A recognized key holds a value of the wrong JSON type.
    #[error("`{key}` must be {expected}")]
    UnexpectedShape { key: String, expected: &'static str },
}

impl ModelError {
    /// Returns `true` for absent-field errors as opposed to wrong-shape errors.
    pub fn is_missing_field(&self) -> bool {
        matches!(
            self,
            ModelError::MissingField { .. } | ModelError::MissingDomain
        )
    }
}
