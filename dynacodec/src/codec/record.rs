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

//! Map-shaped values.
//!
//! Most domain values encode as a map of named fields. [`RecordCodec`] lets a
//! type describe just its fields: [`MapBuilder`] gathers them on encode and
//! [`MapReader`] looks them up by literal key on decode. Wrapping a record
//! codec in [`Record`] turns it into an ordinary [`Codec`].
//!
//! # Examples
//!
//! ```rust
//! use dynacodec::codec::{Codec, MapBuilder, MapReader, Record, RecordCodec};
//! use dynacodec::codec::primitives::{IntCodec, StringCodec};
//! use dynacodec::ops::{DynamicOps, JsonOps};
//! use dynacodec::CodecError;
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct Sign {
//!     text: String,
//!     glow: i32,
//! }
//!
//! struct SignFields;
//!
//! impl RecordCodec<Sign> for SignFields {
//!     fn encode_fields<O: DynamicOps>(
//!         &self,
//!         value: &Sign,
//!         out: &mut MapBuilder<'_, O>,
//!     ) -> Result<(), CodecError> {
//!         out.field("text", &StringCodec, &value.text)?;
//!         out.field("glow", &IntCodec, &value.glow)?;
//!         Ok(())
//!     }
//!
//!     fn decode_fields<O: DynamicOps>(&self, input: &MapReader<'_, O>) -> Result<Sign, CodecError> {
//!         Ok(Sign {
//!             text: input.required("text", &StringCodec)?,
//!             glow: input.optional_or("glow", &IntCodec, 0)?,
//!         })
//!     }
//! }
//!
//! let codec = Record::new(SignFields);
//! let sign = codec.decode(&JsonOps, &json!({"text": "hi"})).unwrap();
//! assert_eq!(sign, Sign { text: "hi".into(), glow: 0 });
//! assert_eq!(codec.encode(&JsonOps, &sign).unwrap(), json!({"text": "hi", "glow": 0}));
//! ```

use crate::codec::Codec;
use crate::error::CodecError;
use crate::ops::{DynamicOps, MapView};
use std::fmt;
use std::marker::PhantomData;

/// Gathers the fields of a map node being encoded.
///
/// Inserting a key that is already present replaces its value in place.
pub struct MapBuilder<'a, O: DynamicOps> {
    ops: &'a O,
    entries: MapView<O::Node>,
}

impl<'a, O: DynamicOps> MapBuilder<'a, O> {
    /// Starts an empty map.
    pub fn new(ops: &'a O) -> Self {
        Self {
            ops,
            entries: MapView::new(),
        }
    }

    /// Returns the ops this builder encodes with.
    pub fn ops(&self) -> &'a O {
        self.ops
    }

    /// Inserts an already-encoded node under `key`.
    pub fn insert(&mut self, key: &str, value: O::Node) -> &mut Self {
        self.entries.insert(self.ops.create_string(key), value);
        self
    }

    /// Inserts a node under an already-encoded key.
    pub fn insert_node(&mut self, key: O::Node, value: O::Node) -> &mut Self {
        self.entries.insert(key, value);
        self
    }

    /// Encodes `value` with `codec` and inserts it under `key`.
    pub fn field<T, C: Codec<T>>(
        &mut self,
        key: &str,
        codec: &C,
        value: &T,
    ) -> Result<&mut Self, CodecError> {
        let node = codec
            .encode(self.ops, value)
            .map_err(|e| e.context(format!("failed to encode '{key}'")))?;
        Ok(self.insert(key, node))
    }

    /// Like [`field`](Self::field), but writes nothing for `None`.
    pub fn optional_field<T, C: Codec<T>>(
        &mut self,
        key: &str,
        codec: &C,
        value: Option<&T>,
    ) -> Result<&mut Self, CodecError> {
        match value {
            Some(value) => self.field(key, codec, value),
            None => Ok(self),
        }
    }

    /// Returns true if `key` has been written.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&self.ops.create_string(key))
    }

    /// Returns the number of fields written so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no field has been written.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the builder, returning the gathered entries.
    pub fn into_view(self) -> MapView<O::Node> {
        self.entries
    }

    /// Consumes the builder, producing the map node.
    pub fn build(self) -> O::Node {
        self.ops.create_map(self.entries.into_entries())
    }
}

impl<O: DynamicOps> fmt::Debug for MapBuilder<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapBuilder")
            .field("ops", &self.ops.name())
            .field("entries", &self.entries)
            .finish()
    }
}

/// Reads the fields of a map node being decoded.
pub struct MapReader<'a, O: DynamicOps> {
    ops: &'a O,
    entries: MapView<O::Node>,
}

impl<'a, O: DynamicOps> MapReader<'a, O> {
    /// Reads `input` as a map; fails if it is not map-shaped.
    pub fn new(ops: &'a O, input: &O::Node) -> Result<Self, CodecError> {
        Ok(Self::from_view(ops, ops.get_map(input)?))
    }

    /// Wraps entries that were already read.
    pub fn from_view(ops: &'a O, entries: MapView<O::Node>) -> Self {
        Self { ops, entries }
    }

    /// Returns the ops this reader decodes with.
    pub fn ops(&self) -> &'a O {
        self.ops
    }

    /// Returns the raw entries.
    pub fn view(&self) -> &MapView<O::Node> {
        &self.entries
    }

    /// Returns the node stored under `key`.
    pub fn get(&self, key: &str) -> Option<&O::Node> {
        self.ops.lookup(&self.entries, key)
    }

    /// Returns true if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Decodes the value under `key`, failing if it is absent.
    pub fn required<T, C: Codec<T>>(&self, key: &str, codec: &C) -> Result<T, CodecError> {
        let node = self.ops.require(&self.entries, key)?;
        codec
            .decode(self.ops, node)
            .map_err(|e| e.context(format!("invalid value for '{key}'")))
    }

    /// Decodes the value under `key`; absent or empty nodes yield `None`.
    pub fn optional<T, C: Codec<T>>(&self, key: &str, codec: &C) -> Result<Option<T>, CodecError> {
        match self.get(key) {
            Some(node) if !self.ops.is_empty(node) => codec
                .decode(self.ops, node)
                .map(Some)
                .map_err(|e| e.context(format!("invalid value for '{key}'"))),
            _ => Ok(None),
        }
    }

    /// Like [`optional`](Self::optional), substituting `default` when absent.
    pub fn optional_or<T, C: Codec<T>>(
        &self,
        key: &str,
        codec: &C,
        default: T,
    ) -> Result<T, CodecError> {
        Ok(self.optional(key, codec)?.unwrap_or(default))
    }
}

impl<O: DynamicOps> fmt::Debug for MapReader<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapReader")
            .field("ops", &self.ops.name())
            .field("entries", &self.entries)
            .finish()
    }
}

/// Encodes a value as the named fields of a map node.
pub trait RecordCodec<T>: Send + Sync {
    /// Writes the fields of `value`.
    fn encode_fields<O: DynamicOps>(
        &self,
        value: &T,
        out: &mut MapBuilder<'_, O>,
    ) -> Result<(), CodecError>;

    /// Reads a value from the fields of a map.
    fn decode_fields<O: DynamicOps>(&self, input: &MapReader<'_, O>) -> Result<T, CodecError>;
}

/// Adapts a [`RecordCodec`] into a [`Codec`].
pub struct Record<C, T> {
    fields: C,
    _marker: PhantomData<fn() -> T>,
}

impl<C: RecordCodec<T>, T> Record<C, T> {
    /// Wraps a record codec.
    pub fn new(fields: C) -> Self {
        Self {
            fields,
            _marker: PhantomData,
        }
    }

    /// Returns the wrapped record codec.
    pub fn fields(&self) -> &C {
        &self.fields
    }
}

impl<C: RecordCodec<T>, T> Codec<T> for Record<C, T> {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &T) -> Result<O::Node, CodecError> {
        let mut out = MapBuilder::new(ops);
        self.fields.encode_fields(value, &mut out)?;
        Ok(out.build())
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<T, CodecError> {
        let reader = MapReader::new(ops, input)?;
        self.fields.decode_fields(&reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::primitives::{IntCodec, StringCodec};
    use crate::ops::{JsonOps, Value, ValueOps};
    use serde_json::json;

    #[test]
    fn test_builder_replaces_existing_key() {
        let ops = JsonOps;
        let mut out = MapBuilder::new(&ops);
        out.insert("type", json!("a"));
        out.insert("extra", json!(1));
        out.insert("type", json!("b"));
        assert_eq!(out.len(), 2);
        assert_eq!(out.build(), json!({"type": "b", "extra": 1}));
    }

    #[test]
    fn test_reader_required_missing() {
        let ops = JsonOps;
        let reader = MapReader::new(&ops, &json!({"a": 1})).unwrap();
        let error = reader.required("b", &IntCodec).unwrap_err();
        assert_eq!(error.message(), "missing required key 'b'");
    }

    #[test]
    fn test_reader_wraps_child_failure_with_key() {
        let ops = JsonOps;
        let reader = MapReader::new(&ops, &json!({"a": "x"})).unwrap();
        let error = reader.required("a", &IntCodec).unwrap_err();
        assert_eq!(error.message(), "invalid value for 'a'");
        assert!(error.mentions("expected int"));
    }

    #[test]
    fn test_reader_optional_treats_empty_as_absent() {
        let ops = ValueOps;
        let input = Value::Map(vec![(Value::from("name"), Value::Empty)]);
        let reader = MapReader::new(&ops, &input).unwrap();
        assert_eq!(reader.optional("name", &StringCodec).unwrap(), None);
        assert_eq!(reader.optional_or("missing", &IntCodec, 7).unwrap(), 7);
    }

    #[test]
    fn test_reader_rejects_non_map() {
        let ops = JsonOps;
        assert!(MapReader::new(&ops, &json!([1, 2])).is_err());
    }

    #[test]
    fn test_optional_field_skips_none() {
        let ops = JsonOps;
        let mut out = MapBuilder::new(&ops);
        out.optional_field("a", &IntCodec, None).unwrap();
        out.optional_field("b", &IntCodec, Some(&2)).unwrap();
        assert!(!out.contains("a"));
        assert!(out.contains("b"));
    }
}
