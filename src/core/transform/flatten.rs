use crate::core::document::KgDocument;
use crate::core::error::AppError;
use crate::core::transform::DocumentTransform;
use crate::core::types::PassKind;
use kg_types::{
    ApprovalCriteria, CriteriaFields, ExampleSection, ModelError, APPROVAL_CRITERIA_KEY,
};
use serde_json::{Map, Value};

const ENDPOINTS_KEY: &str = "endpoints";
const ENDPOINT_PREFIX: &str = "endpoint_";
const AGENTS_KEY: &str = "agents";
const SEPARATOR: char = '_';

/// Rewrites nested sections into flat, snake_case keyed fields.
pub struct FlattenTransform;

impl DocumentTransform for FlattenTransform {
    fn kind(&self) -> PassKind {
        PassKind::Flatten
    }

    fn transform(&self, doc: KgDocument) -> Result<KgDocument, AppError> {
        let mut doc = doc;
        flatten_endpoints(&mut doc)?;
        for section in ExampleSection::ALL {
            normalize_example_section(&mut doc, section)?;
        }
        flatten_agents(&mut doc)?;
        Ok(doc)
    }
}

/// Recursively flatten nested objects, joining keys with `_`.
///
/// Arrays and scalars are leaves; an empty nested object contributes no keys.
pub fn flatten_map(map: Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();
    flatten_into(&mut flat, None, map);
    flat
}

/// Rebuild one agent with nested objects flattened and string criteria decoded.
pub fn flatten_agent(agent: Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();
    for (key, value) in agent {
        if key != APPROVAL_CRITERIA_KEY {
            match value {
                Value::Object(nested) => flatten_into(&mut flat, Some(&key), nested),
                other => {
                    flat.insert(key, other);
                }
            }
            continue;
        }

        match ApprovalCriteria::classify(value) {
            Ok(ApprovalCriteria::Unparsed(raw)) => match ApprovalCriteria::decode(&raw) {
                Some(criteria) => {
                    let fields = CriteriaFields::from_decoded(&criteria);
                    flat.insert(
                        "effectiveness_threshold".to_string(),
                        fields.effectiveness_threshold,
                    );
                    flat.insert("ethics_guidelines".to_string(), fields.ethics_guidelines);
                }
                None => {
                    tracing::debug!("keeping undecodable {} verbatim", APPROVAL_CRITERIA_KEY);
                    flat.insert(key, Value::String(raw));
                }
            },
            Ok(ApprovalCriteria::Parsed(criteria)) => flatten_into(&mut flat, Some(&key), criteria),
            Err(other) => {
                flat.insert(key, other);
            }
        }
    }
    flat
}

fn flatten_into(flat: &mut Map<String, Value>, prefix: Option<&str>, map: Map<String, Value>) {
    for (key, value) in map {
        let path = match prefix {
            Some(prefix) => format!("{prefix}{SEPARATOR}{key}"),
            None => key,
        };
        match value {
            Value::Object(nested) => flatten_into(flat, Some(&path), nested),
            leaf => {
                flat.insert(path, leaf);
            }
        }
    }
}

fn flatten_endpoints(doc: &mut KgDocument) -> Result<(), ModelError> {
    let Some(endpoints) = doc.remove(ENDPOINTS_KEY) else {
        return Ok(());
    };
    let Value::Object(endpoints) = endpoints else {
        return Err(ModelError::UnexpectedShape {
            key: ENDPOINTS_KEY.to_string(),
            expected: "an object",
        });
    };
    for (name, url) in endpoints {
        doc.insert(format!("{ENDPOINT_PREFIX}{name}"), url);
    }
    Ok(())
}

fn normalize_example_section(
    doc: &mut KgDocument,
    section: ExampleSection,
) -> Result<(), ModelError> {
    let Some(raw) = doc.get(section.source_key()) else {
        return Ok(());
    };
    let examples = section.normalize(raw)?;
    doc.insert(
        section.target_key(),
        Value::Array(examples.into_iter().map(Value::from).collect()),
    );
    doc.remove(section.source_key());
    Ok(())
}

fn flatten_agents(doc: &mut KgDocument) -> Result<(), ModelError> {
    let Some(agents) = doc.take(AGENTS_KEY) else {
        return Ok(());
    };
    let Value::Array(agents) = agents else {
        return Err(ModelError::UnexpectedShape {
            key: AGENTS_KEY.to_string(),
            expected: "an array of agents",
        });
    };
    let flattened = agents
        .into_iter()
        .enumerate()
        .map(|(index, agent)| match agent {
            Value::Object(fields) => Ok(Value::Object(flatten_agent(fields))),
            _ => Err(ModelError::UnexpectedShape {
                key: format!("{AGENTS_KEY}[{index}]"),
                expected: "an object",
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    doc.insert(AGENTS_KEY, Value::Array(flattened));
    Ok(())
}
