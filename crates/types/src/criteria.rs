use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::{Map, Value};
use std::io;

/// Agent field whose value is stored either as an object or as encoded JSON.
pub const APPROVAL_CRITERIA_KEY: &str = "approvalCriteria";

const THRESHOLD_KEY: &str = "effectivenessThreshold";
const GUIDELINES_KEY: &str = "ethicsGuidelines";
const DEFAULT_THRESHOLD: &str = "0.95";

/// The two on-disk representations of `approvalCriteria`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApprovalCriteria {
    /// Embedded JSON object.
    Parsed(Map<String, Value>),
    /// String holding (possibly malformed) JSON.
    Unparsed(String),
}

/// Flat replacement fields derived from decoded criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaFields {
    pub effectiveness_threshold: Value,
    pub ethics_guidelines: Value,
}

impl ApprovalCriteria {
    /// Classify a raw field value. Values that are neither objects nor strings are
    /// handed back unchanged.
    pub fn classify(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(ApprovalCriteria::Parsed(map)),
            Value::String(raw) => Ok(ApprovalCriteria::Unparsed(raw)),
            other => Err(other),
        }
    }

    /// Decode an encoded string into its object. Returns `None` when the string is
    /// not JSON or does not hold an object.
    pub fn decode(raw: &str) -> Option<Map<String, Value>> {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Canonical string form: objects are encoded, strings are kept as they are.
    pub fn into_encoded(self) -> String {
        match self {
            ApprovalCriteria::Parsed(map) => encode_compact(&Value::Object(map)),
            ApprovalCriteria::Unparsed(raw) => raw,
        }
    }
}

impl CriteriaFields {
    pub fn from_decoded(criteria: &Map<String, Value>) -> Self {
        CriteriaFields {
            effectiveness_threshold: criteria
                .get(THRESHOLD_KEY)
                .cloned()
                .unwrap_or_else(|| Value::String(DEFAULT_THRESHOLD.to_string())),
            ethics_guidelines: criteria
                .get(GUIDELINES_KEY)
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
        }
    }
}

/// Single-line JSON with `", "` and `": "` separators and non-ASCII text escaped
/// as `\uXXXX`.
pub fn encode_compact(value: &Value) -> String {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    value
        .serialize(&mut serializer)
        .expect("serializing a Value into memory cannot fail");
    String::from_utf8(out).expect("escaped JSON output is ASCII")
}

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..index])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}
