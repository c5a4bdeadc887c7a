use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TypeError;

/// A key addressing a value within a collection.
///
/// Text keys are used verbatim. Structured keys are JSON objects that get
/// canonicalized and hashed before use, so two objects with the same content
/// address the same entry regardless of field insertion order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Text(String),
    Structured(Map<String, Value>),
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Map<String, Value>> for Key {
    fn from(m: Map<String, Value>) -> Self {
        Self::Structured(m)
    }
}

impl TryFrom<Value> for Key {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Self::Text(s)),
            Value::Object(m) => Ok(Self::Structured(m)),
            other => Err(TypeError::UnsupportedKeyType(kind_name(&other).into())),
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
