use crate::error::ModelError;
use serde::Serialize;
use serde_json::{Map, Value};

/// The three list-of-example sections a document may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleSection {
    Training,
    Evaluation,
    FinalExam,
}

impl ExampleSection {
    pub const ALL: [ExampleSection; 3] = [
        ExampleSection::Training,
        ExampleSection::Evaluation,
        ExampleSection::FinalExam,
    ];

    /// camelCase key used before flattening.
    pub fn source_key(self) -> &'static str {
        match self {
            ExampleSection::Training => "trainingExamples",
            ExampleSection::Evaluation => "evaluationExamples",
            ExampleSection::FinalExam => "finalExamExamples",
        }
    }

    /// snake_case key used after flattening.
    pub fn target_key(self) -> &'static str {
        match self {
            ExampleSection::Training => "training_examples",
            ExampleSection::Evaluation => "evaluation_examples",
            ExampleSection::FinalExam => "final_exam_examples",
        }
    }

    /// Decode every entry of the section, failing on the first malformed one.
    pub fn normalize(self, raw: &Value) -> Result<Vec<NormalizedExample>, ModelError> {
        let Value::Array(entries) = raw else {
            return Err(ModelError::UnexpectedShape {
                key: self.source_key().to_string(),
                expected: "an array of examples",
            });
        };
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| NormalizedExample::from_raw(self, index, entry))
            .collect()
    }
}

/// An example in its canonical `{input, expected_output, description}` shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedExample {
    pub input: Value,
    pub expected_output: Value,
    pub description: Value,
}

impl NormalizedExample {
    pub fn from_raw(
        section: ExampleSection,
        index: usize,
        raw: &Value,
    ) -> Result<Self, ModelError> {
        let Value::Object(fields) = raw else {
            return Err(ModelError::UnexpectedShape {
                key: format!("{}[{}]", section.source_key(), index),
                expected: "an object",
            });
        };
        let required = |field: &'static str| {
            fields
                .get(field)
                .cloned()
                .ok_or(ModelError::MissingField {
                    section: section.source_key(),
                    index,
                    field,
                })
        };

        Ok(NormalizedExample {
            input: required("input")?,
            expected_output: required("expectedOutput")?,
            description: fields
                .get("description")
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
        })
    }
}

impl From<NormalizedExample> for Value {
    fn from(example: NormalizedExample) -> Self {
        let mut map = Map::new();
        map.insert("input".to_string(), example.input);
        map.insert("expected_output".to_string(), example.expected_output);
        map.insert("description".to_string(), example.description);
        Value::Object(map)
    }
}
