//
// Copyright 2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! The crate's own in-memory tree and its ops.

use crate::error::CodecError;
use crate::ops::{DynamicOps, MapView, Opaque};
use serde::{Deserialize, Serialize};

/// A format-neutral tree node.
///
/// Unlike JSON, map keys may be any node and an [`Opaque`] snapshot is a
/// first-class variant, so opaque payloads are stored as-is instead of being
/// re-parsed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    /// No value.
    #[default]
    Empty,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered list.
    List(Vec<Value>),
    /// Ordered key/value pairs.
    Map(Vec<(Value, Value)>),
    /// An uninterpreted sub-tree snapshot.
    Opaque(Opaque),
}

impl Value {
    /// Returns the name of this node's shape, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Opaque(_) => "opaque",
        }
    }

    /// Returns the string payload, if this is a string node.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Converts this tree into JSON.
    ///
    /// Non-string map keys are written as their JSON text, opaque snapshots are
    /// parsed back into JSON, and non-finite floats are rejected.
    pub fn to_json(&self) -> Result<serde_json::Value, CodecError> {
        use serde_json::Value as Json;

        Ok(match self {
            Self::Empty => Json::Null,
            Self::Bool(value) => Json::Bool(*value),
            Self::Int(value) => Json::from(*value),
            Self::Float(value) => serde_json::Number::from_f64(*value)
                .map(Json::Number)
                .ok_or_else(|| CodecError::new(format!("cannot represent {value} in JSON")))?,
            Self::String(value) => Json::String(value.clone()),
            Self::List(elements) => Json::Array(
                elements
                    .iter()
                    .map(Value::to_json)
                    .collect::<Result<_, _>>()?,
            ),
            Self::Map(entries) => {
                let mut object = serde_json::Map::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = match key {
                        Self::String(key) => key.clone(),
                        other => other.to_json()?.to_string(),
                    };
                    object.insert(key, value.to_json()?);
                }
                Json::Object(object)
            }
            Self::Opaque(blob) => blob.to_json()?,
        })
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::Empty,
            Json::Bool(value) => Self::Bool(value),
            Json::Number(number) => match number.as_i64() {
                Some(value) => Self::Int(value),
                None => Self::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(value) => Self::String(value),
            Json::Array(elements) => Self::List(elements.into_iter().map(Value::from).collect()),
            Json::Object(object) => Self::Map(
                object
                    .into_iter()
                    .map(|(key, value)| (Self::String(key), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// [`DynamicOps`] over [`Value`] trees.
///
/// # Examples
///
/// ```rust
/// use dynacodec::ops::{DynamicOps, Opaque, Value, ValueOps};
///
/// let ops = ValueOps;
/// let blob = Opaque::from_slice(br#"{"lock":"key"}"#).unwrap();
/// let node = ops.create_opaque(&blob).unwrap();
/// assert!(matches!(node, Value::Opaque(_)));
/// assert_eq!(ops.get_opaque(&node).unwrap(), blob);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueOps;

impl DynamicOps for ValueOps {
    type Node = Value;

    fn name(&self) -> &'static str {
        "value"
    }

    fn empty(&self) -> Value {
        Value::Empty
    }

    fn create_string(&self, value: &str) -> Value {
        Value::String(value.to_string())
    }

    fn create_int(&self, value: i64) -> Value {
        Value::Int(value)
    }

    fn create_float(&self, value: f64) -> Value {
        Value::Float(value)
    }

    fn create_bool(&self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn create_list(&self, elements: Vec<Value>) -> Value {
        Value::List(elements)
    }

    fn create_map(&self, entries: Vec<(Value, Value)>) -> Value {
        Value::Map(MapView::from_entries(entries).into_entries())
    }

    fn create_opaque(&self, blob: &Opaque) -> Result<Value, CodecError> {
        Ok(Value::Opaque(blob.clone()))
    }

    fn get_string_value(&self, input: &Value) -> Result<String, CodecError> {
        match input {
            Value::String(value) => Ok(value.clone()),
            other => Err(CodecError::expected("string", other)),
        }
    }

    fn get_int(&self, input: &Value) -> Result<i64, CodecError> {
        match input {
            Value::Int(value) => Ok(*value),
            other => Err(CodecError::expected("int", other)),
        }
    }

    fn get_float(&self, input: &Value) -> Result<f64, CodecError> {
        match input {
            Value::Float(value) => Ok(*value),
            Value::Int(value) => Ok(*value as f64),
            other => Err(CodecError::expected("number", other)),
        }
    }

    fn get_bool(&self, input: &Value) -> Result<bool, CodecError> {
        match input {
            Value::Bool(value) => Ok(*value),
            other => Err(CodecError::expected("bool", other)),
        }
    }

    fn get_list(&self, input: &Value) -> Result<Vec<Value>, CodecError> {
        match input {
            Value::List(elements) => Ok(elements.clone()),
            other => Err(CodecError::expected("list", other)),
        }
    }

    fn get_map(&self, input: &Value) -> Result<MapView<Value>, CodecError> {
        match input {
            Value::Map(entries) => Ok(MapView::from_entries(entries.clone())),
            other => Err(CodecError::expected("map", other)),
        }
    }

    fn get_opaque(&self, input: &Value) -> Result<Opaque, CodecError> {
        match input {
            Value::Opaque(blob) => Ok(blob.clone()),
            other => Opaque::from_json(&other.to_json()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_conversion_round_trip() {
        let json = json!({"id": "minecraft:stone", "pos": [1, 2, 3], "lit": true, "f": 0.5});
        let value = Value::from(json.clone());
        assert_eq!(value.to_json().unwrap(), json);
    }

    #[test]
    fn test_non_string_keys_become_json_text() {
        let value = Value::Map(vec![(Value::Int(7), Value::Bool(true))]);
        assert_eq!(value.to_json().unwrap(), json!({"7": true}));
    }

    #[test]
    fn test_nan_is_rejected() {
        assert!(Value::Float(f64::NAN).to_json().is_err());
    }

    #[test]
    fn test_get_float_accepts_int() {
        let ops = ValueOps;
        assert_eq!(ops.get_float(&Value::Int(3)).unwrap(), 3.0);
        assert!(ops.get_int(&Value::Float(3.0)).is_err());
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        let ops = ValueOps;
        let error = ops.get_map(&Value::from("not a map")).unwrap_err();
        assert!(error.message().starts_with("expected map"));
    }

    #[test]
    fn test_opaque_from_structured_node() {
        let ops = ValueOps;
        let node = Value::Map(vec![(Value::from("a"), Value::Int(1))]);
        let blob = ops.get_opaque(&node).unwrap();
        assert_eq!(blob.as_bytes(), br#"{"a":1}"#);
    }
}
