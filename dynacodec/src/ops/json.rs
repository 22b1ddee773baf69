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

//! [`DynamicOps`] over [`serde_json::Value`] trees.

use crate::error::CodecError;
use crate::ops::{DynamicOps, MapView, Opaque};
use serde_json::Value;

/// JSON tree operations.
///
/// `JsonOps` is the reference representation. Map keys must be strings in
/// JSON, so non-string keys passed to [`create_map`](DynamicOps::create_map)
/// are written as their JSON text. Non-finite floats become `null`.
///
/// # Examples
///
/// ```rust
/// use dynacodec::ops::{DynamicOps, JsonOps};
/// use serde_json::json;
///
/// let ops = JsonOps;
/// let node = ops.create_map(vec![
///     (ops.create_string("type"), ops.create_string("integrity")),
///     (ops.create_string("integrity"), ops.create_float(0.5)),
/// ]);
/// assert_eq!(node, json!({"type": "integrity", "integrity": 0.5}));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonOps;

fn key_text(key: Value) -> String {
    match key {
        Value::String(key) => key,
        other => other.to_string(),
    }
}

impl DynamicOps for JsonOps {
    type Node = Value;

    fn name(&self) -> &'static str {
        "json"
    }

    fn empty(&self) -> Value {
        Value::Null
    }

    fn create_string(&self, value: &str) -> Value {
        Value::String(value.to_string())
    }

    fn create_int(&self, value: i64) -> Value {
        Value::from(value)
    }

    fn create_float(&self, value: f64) -> Value {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }

    fn create_bool(&self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn create_list(&self, elements: Vec<Value>) -> Value {
        Value::Array(elements)
    }

    fn create_map(&self, entries: Vec<(Value, Value)>) -> Value {
        let mut object = serde_json::Map::with_capacity(entries.len());
        for (key, value) in entries {
            object.insert(key_text(key), value);
        }
        Value::Object(object)
    }

    fn create_opaque(&self, blob: &Opaque) -> Result<Value, CodecError> {
        blob.to_json()
    }

    fn get_string_value(&self, input: &Value) -> Result<String, CodecError> {
        input
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CodecError::expected("string", input))
    }

    fn get_int(&self, input: &Value) -> Result<i64, CodecError> {
        input
            .as_i64()
            .ok_or_else(|| CodecError::expected("int", input))
    }

    fn get_float(&self, input: &Value) -> Result<f64, CodecError> {
        input
            .as_f64()
            .ok_or_else(|| CodecError::expected("number", input))
    }

    fn get_bool(&self, input: &Value) -> Result<bool, CodecError> {
        input
            .as_bool()
            .ok_or_else(|| CodecError::expected("bool", input))
    }

    fn get_list(&self, input: &Value) -> Result<Vec<Value>, CodecError> {
        input
            .as_array()
            .cloned()
            .ok_or_else(|| CodecError::expected("list", input))
    }

    fn get_map(&self, input: &Value) -> Result<MapView<Value>, CodecError> {
        let object = input
            .as_object()
            .ok_or_else(|| CodecError::expected("map", input))?;
        Ok(object
            .iter()
            .map(|(key, value)| (Value::String(key.clone()), value.clone()))
            .collect())
    }

    fn get_opaque(&self, input: &Value) -> Result<Opaque, CodecError> {
        Opaque::from_json(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers() {
        let ops = JsonOps;
        assert_eq!(ops.get_int(&ops.create_int(-4)).unwrap(), -4);
        assert_eq!(ops.get_float(&json!(2)).unwrap(), 2.0);
        assert!(ops.get_int(&json!(2.5)).is_err());
        assert_eq!(ops.create_float(f64::INFINITY), Value::Null);
    }

    #[test]
    fn test_map_keeps_order() {
        let ops = JsonOps;
        let node = json!({"z": 1, "a": 2, "m": 3});
        let keys: Vec<String> = ops
            .get_map(&node)
            .unwrap()
            .into_iter()
            .map(|(key, _)| ops.get_string_value(&key).unwrap())
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_create_map_stringifies_keys() {
        let ops = JsonOps;
        let node = ops.create_map(vec![(json!(1), json!("one"))]);
        assert_eq!(node, json!({"1": "one"}));
    }

    #[test]
    fn test_require_missing_key() {
        let ops = JsonOps;
        let map = ops.get_map(&json!({"a": 1})).unwrap();
        let error = ops.require(&map, "b").unwrap_err();
        assert_eq!(error.message(), "missing required key 'b'");
    }

    #[test]
    fn test_opaque_round_trip_is_byte_identical() {
        let ops = JsonOps;
        let node = json!({"Items": [{"Slot": 0, "id": "minecraft:apple", "Count": 3}], "Lock": ""});
        let blob = ops.get_opaque(&node).unwrap();
        let again = ops.get_opaque(&ops.create_opaque(&blob).unwrap()).unwrap();
        assert_eq!(blob.as_bytes(), again.as_bytes());
    }
}
