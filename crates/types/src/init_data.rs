//! `configuration.initData`: the bootstrap routine a KG runs when it is loaded.
//!
//! Older documents carry it as a Groovy-like script string, newer ones as an ordered
//! list of typed steps. Both forms can receive the security-config fetch; the step
//! form is edited structurally, the script form by a single textual patch around the
//! first `return [ ... ];` expression.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name the security configuration is bound to inside `initData`.
pub const SECURITY_CONFIG_BINDING: &str = "securityConfig";

const SECURITY_ENDPOINT: &str = "security";
const RETURN_OPEN: &str = "return [";
const RETURN_CLOSE: &str = "];";
const FETCH_MARKER: &str = "def securityConfig =";
const FETCH_LINES: &str = "def securityConfig = scripts.fetchDataScript(configuration.endpoints.security);\n\
println ', Security=' + (securityConfig != null);\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitData {
    Script(String),
    Steps(Vec<InitStep>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum InitStep {
    /// Bind the payload served by one of `configuration.endpoints`.
    Fetch { binding: String, endpoint: String },
    Log { message: String },
    /// Return named bindings to the caller.
    Return { fields: Map<String, Value> },
}

impl InitData {
    /// Decode a raw `initData` value.
    ///
    /// Step lists are only accepted when re-encoding them reproduces the input, so a
    /// list carrying fields this model does not know about is never rewritten.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(script) => Some(InitData::Script(script.clone())),
            Value::Array(_) => {
                let steps: Vec<InitStep> = serde_json::from_value(value.clone()).ok()?;
                let round_trip = serde_json::to_value(&steps).ok()?;
                (round_trip == *value).then_some(InitData::Steps(steps))
            }
            _ => None,
        }
    }

    pub fn into_value(self) -> Result<Value, serde_json::Error> {
        match self {
            InitData::Script(script) => Ok(Value::String(script)),
            InitData::Steps(steps) => serde_json::to_value(steps),
        }
    }

    /// Make the security configuration available to the first `return`.
    ///
    /// Returns `false` when there is no return to attach to or the fetch is
    /// already present.
    pub fn inject_security_fetch(&mut self) -> bool {
        match self {
            InitData::Script(script) => match patch_script(script) {
                Some(patched) => {
                    *script = patched;
                    true
                }
                None => false,
            },
            InitData::Steps(steps) => inject_fetch_step(steps),
        }
    }
}

fn patch_script(script: &str) -> Option<String> {
    if script.contains(FETCH_MARKER) {
        return None;
    }
    let open = script.find(RETURN_OPEN)?;
    let body_start = open + RETURN_OPEN.len();
    let close = body_start + script[body_start..].find(RETURN_CLOSE)?;

    let field = if script[body_start..close].trim().is_empty() {
        format!("{SECURITY_ENDPOINT}: {SECURITY_CONFIG_BINDING}")
    } else {
        format!(", {SECURITY_ENDPOINT}: {SECURITY_CONFIG_BINDING}")
    };

    let mut patched = String::with_capacity(script.len() + FETCH_LINES.len() + field.len());
    patched.push_str(&script[..open]);
    patched.push_str(FETCH_LINES);
    patched.push_str(&script[open..close]);
    patched.push_str(&field);
    patched.push_str(&script[close..]);
    Some(patched)
}

fn inject_fetch_step(steps: &mut Vec<InitStep>) -> bool {
    let already_fetched = steps.iter().any(|step| {
        matches!(step, InitStep::Fetch { binding, .. } if binding == SECURITY_CONFIG_BINDING)
    });
    if already_fetched {
        return false;
    }
    let Some(position) = steps
        .iter()
        .position(|step| matches!(step, InitStep::Return { .. }))
    else {
        return false;
    };

    steps.insert(
        position,
        InitStep::Fetch {
            binding: SECURITY_CONFIG_BINDING.to_string(),
            endpoint: SECURITY_ENDPOINT.to_string(),
        },
    );
    if let InitStep::Return { fields } = &mut steps[position + 1] {
        fields.insert(
            SECURITY_ENDPOINT.to_string(),
            Value::String(SECURITY_CONFIG_BINDING.to_string()),
        );
    }
    true
}
