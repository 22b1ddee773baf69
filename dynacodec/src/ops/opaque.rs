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

//! Opaque sub-tree snapshots.

use crate::error::CodecError;
use serde::{Deserialize, Serialize};

/// A byte-exact snapshot of a sub-tree that codecs carry without interpreting.
///
/// The snapshot holds the canonical JSON text of the sub-tree. Every
/// [`DynamicOps`](crate::ops::DynamicOps) implementation can capture a node as
/// an `Opaque` and materialize one again, so a payload read through one format
/// can be written back through another.
///
/// # Examples
///
/// ```rust
/// use dynacodec::ops::Opaque;
///
/// let blob = Opaque::from_slice(br#"{"Items":[]}"#).unwrap();
/// assert_eq!(blob.as_bytes(), br#"{"Items":[]}"#);
///
/// let spaced = Opaque::from_slice(b"{ \"Items\" : [ ] }").unwrap();
/// assert_eq!(spaced, blob);
/// assert!(Opaque::from_slice(b"{not json").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Opaque {
    bytes: Vec<u8>,
}

impl Opaque {
    /// Wraps existing JSON text, normalized to canonical compact form.
    ///
    /// Key order is kept; insignificant whitespace is dropped, so the result
    /// equals the snapshot of the same sub-tree taken through any format.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| CodecError::with_source("opaque payload is not valid JSON", e))?;
        Self::from_json(&value)
    }

    /// Snapshots a JSON value.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, CodecError> {
        Ok(Self {
            bytes: serde_json::to_vec(value)?,
        })
    }

    /// Parses the snapshot back into a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value, CodecError> {
        Ok(serde_json::from_slice(&self.bytes)?)
    }

    /// Returns the raw snapshot bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the snapshot length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the snapshot has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_snapshot_is_stable() {
        let value = json!({"b": 1, "a": [1.5, "x"], "nested": {"z": null}});
        let first = Opaque::from_json(&value).unwrap();
        let second = Opaque::from_json(&first.to_json().unwrap()).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_from_slice_normalizes_whitespace() {
        let blob = Opaque::from_slice(b"{ \"b\" : 1, \"a\" : [ 2 ] }").unwrap();
        assert_eq!(blob.as_bytes(), br#"{"b":1,"a":[2]}"#);
        assert_eq!(blob.len(), 15);
    }

    #[test]
    fn test_from_slice_matches_json_snapshot() {
        let spaced = Opaque::from_slice(b"{ \"Lock\" : \"key\" }").unwrap();
        let snapshot = Opaque::from_json(&json!({"Lock": "key"})).unwrap();
        assert_eq!(spaced, snapshot);
    }
}
