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

//! Postcard documents.

use crate::document::DocumentFormat;
use crate::error::CodecError;
use crate::ops::Value;

/// Compact binary document format based on postcard.
///
/// Unlike [`JsonDocument`](crate::document::JsonDocument) this keeps every
/// [`Value`] variant as-is, so a tree read back is identical to the one
/// written.
#[derive(Clone, Debug, Default)]
pub struct PostcardDocument;

impl PostcardDocument {
    /// Creates the format.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentFormat for PostcardDocument {
    fn read(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        postcard::from_bytes(bytes).map_err(Into::into)
    }

    fn write(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        postcard::to_allocvec(value).map_err(Into::into)
    }

    fn name(&self) -> &'static str {
        "postcard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::Opaque;

    #[test]
    fn test_postcard_keeps_value_model() {
        let blob = Opaque::from_slice(br#"{"Lock":"key"}"#).unwrap();
        let value = Value::Map(vec![
            (Value::Int(3), Value::Float(0.25)),
            (Value::from("nbt"), Value::Opaque(blob)),
            (Value::from("none"), Value::Empty),
        ]);
        let format = PostcardDocument::new();
        let bytes = format.write(&value).unwrap();
        assert_eq!(format.read(&bytes).unwrap(), value);
    }

    #[test]
    fn test_postcard_rejects_truncated() {
        let format = PostcardDocument::new();
        let bytes = format.write(&Value::from("structure")).unwrap();
        assert!(format.read(&bytes[..bytes.len() - 1]).is_err());
    }
}
