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

//! JSON documents.

use crate::document::DocumentFormat;
use crate::error::CodecError;
use crate::ops::Value;

/// JSON document format.
///
/// Output is compact unless pretty printing is enabled. Object keys keep the
/// order in which they were written.
///
/// # Examples
///
/// ```rust
/// use dynacodec::document::{DocumentFormat, JsonDocument};
/// use dynacodec::ops::Value;
///
/// let format = JsonDocument::new().with_pretty_print();
/// let value = format.read(br#"{"id": "minecraft:stone"}"#).unwrap();
/// assert_eq!(
///     value,
///     Value::Map(vec![(Value::from("id"), Value::from("minecraft:stone"))])
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct JsonDocument {
    pretty: bool,
}

impl JsonDocument {
    /// Creates a format producing compact JSON.
    #[must_use]
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Produces indented JSON.
    #[must_use]
    pub fn with_pretty_print(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Produces compact JSON. This is the default.
    #[must_use]
    pub fn with_compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Returns true if output is indented.
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl DocumentFormat for JsonDocument {
    fn read(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        let json: serde_json::Value = serde_json::from_slice(bytes)?;
        Ok(Value::from(json))
    }

    fn write(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        let json = value.to_json()?;
        if self.pretty {
            serde_json::to_vec_pretty(&json).map_err(Into::into)
        } else {
            serde_json::to_vec(&json).map_err(Into::into)
        }
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::Opaque;

    #[test]
    fn test_json_round_trip() {
        let format = JsonDocument::new();
        let bytes = br#"{"size":[1,2,3],"name":"hut","open":true}"#;
        let value = format.read(bytes).unwrap();
        assert_eq!(format.write(&value).unwrap(), bytes.to_vec());
    }

    #[test]
    fn test_json_inlines_opaque() {
        let blob = Opaque::from_slice(br#"{"Lock":"key"}"#).unwrap();
        let value = Value::Map(vec![(Value::from("nbt"), Value::Opaque(blob))]);
        let bytes = JsonDocument::new().write(&value).unwrap();
        assert_eq!(bytes, br#"{"nbt":{"Lock":"key"}}"#.to_vec());
    }

    #[test]
    fn test_json_pretty() {
        let format = JsonDocument::new().with_pretty_print();
        assert!(format.is_pretty());
        let bytes = format.write(&Value::Map(vec![(Value::from("a"), Value::Int(1))])).unwrap();
        assert!(String::from_utf8(bytes).unwrap().contains('\n'));
        assert!(!format.with_compact().is_pretty());
    }

    #[test]
    fn test_json_rejects_malformed() {
        let error = JsonDocument::new().read(b"{not json").unwrap_err();
        assert!(error.to_string().starts_with("Codec error: JSON document error"));
    }
}
