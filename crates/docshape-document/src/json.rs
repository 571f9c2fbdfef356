//! Conversions between documents and `serde_json` values

use crate::{ConversionError, Document, Value};
use serde_json::{Map, Number};

impl Document {
    /// Convert into a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.iter()
                .map(|(key, value)| (key.to_string(), value.to_json()))
                .collect::<Map<_, _>>(),
        )
    }
}

impl Value {
    /// Convert into a JSON value
    ///
    /// Non-finite doubles have no JSON form and become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Int32(n) => serde_json::Value::from(*n),
            Value::Int64(n) => serde_json::Value::from(*n),
            Value::Double(d) => Number::from_f64(*d)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Document(doc) => doc.to_json(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => number_to_value(&n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Document(object_to_document(map)),
        }
    }
}

impl TryFrom<serde_json::Value> for Document {
    type Error = ConversionError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Object(map) => Ok(object_to_document(map)),
            other => Err(ConversionError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }
}

fn object_to_document(map: Map<String, serde_json::Value>) -> Document {
    map.into_iter()
        .map(|(key, value)| (key, Value::from(value)))
        .collect()
}

fn number_to_value(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => i32::try_from(i).map_or(Value::Int64(i), Value::Int32),
        // Floats and unsigned integers past i64::MAX
        None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
