use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    ParseError,
    MissingFieldError,
    ValidationError,
    IoError,
    WriteError,
    InternalError,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// How a batch should report a failure.
///
/// `Warning` marks a document whose content was rejected; `Error` marks a failure
/// of the environment (filesystem, serialization, internal state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Warning,
}

/// The transformation passes a batch can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    Flatten,
    SecurityPolicy,
    CriteriaNormalize,
}

impl std::fmt::Display for PassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassKind::Flatten => write!(f, "flatten"),
            PassKind::SecurityPolicy => write!(f, "security-policy"),
            PassKind::CriteriaNormalize => write!(f, "criteria-normalize"),
        }
    }
}

/// What happened to one file in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileOutcome {
    Updated,
    Unchanged,
    Failed,
}
