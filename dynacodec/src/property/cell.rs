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

//! The [`Property`] cell.

use crate::codec::{BoxedCodec, Codec};
use crate::error::CodecError;
use crate::ops::{DynamicOps, ErasedNode, ErasedOpsRef};
use std::fmt;

/// A mutable value bound to the codec that serializes it.
///
/// The default is captured at construction and never changes. Decoding
/// replaces the current value only when the codec succeeds; a failed decode
/// leaves the previous value in place.
///
/// # Examples
///
/// ```rust
/// use dynacodec::codec::primitives::IntCodec;
/// use dynacodec::ops::JsonOps;
/// use dynacodec::property::Property;
/// use serde_json::json;
///
/// let mut level = Property::new(IntCodec, 0);
/// level.set(5);
///
/// assert!(level.decode(&JsonOps, &json!("not a number")).is_err());
/// assert_eq!(*level.get(), 5);
/// assert_eq!(*level.get_default(), 0);
/// ```
pub struct Property<T> {
    value: T,
    default: T,
    codec: BoxedCodec<T>,
}

impl<T: Clone + 'static> Property<T> {
    /// Creates a property holding a clone of `default`.
    pub fn new<C: Codec<T> + 'static>(codec: C, default: T) -> Self {
        Self::with_codec(BoxedCodec::new(codec), default)
    }

    /// Creates a property from an already erased codec.
    pub fn with_codec(codec: BoxedCodec<T>, default: T) -> Self {
        Self {
            value: default.clone(),
            default,
            codec,
        }
    }

    /// Restores the default value.
    pub fn reset(&mut self) {
        self.value = self.default.clone();
    }
}

impl<T> Property<T> {
    /// Returns the current value.
    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Returns the current value mutably.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Returns the value captured at construction.
    #[must_use]
    pub fn get_default(&self) -> &T {
        &self.default
    }

    /// Replaces the current value, returning the old one.
    pub fn set(&mut self, value: T) -> T {
        std::mem::replace(&mut self.value, value)
    }

    /// Returns true if the current value equals the default.
    #[must_use]
    pub fn is_default(&self) -> bool
    where
        T: PartialEq,
    {
        self.value == self.default
    }

    /// Returns the codec bound to this property.
    #[must_use]
    pub fn codec(&self) -> &BoxedCodec<T> {
        &self.codec
    }

    /// Encodes the current value.
    pub fn encode<O: DynamicOps>(&self, ops: &O) -> Result<O::Node, CodecError> {
        self.codec.encode(ops, &self.value)
    }

    /// Decodes `input` and, on success, makes it the current value.
    pub fn decode<O: DynamicOps>(&mut self, ops: &O, input: &O::Node) -> Result<(), CodecError> {
        self.value = self.codec.decode(ops, input)?;
        Ok(())
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            default: self.default.clone(),
            codec: self.codec.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Property<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.default == other.default
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.value)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// Object-safe view of a [`Property`], used by property holders.
pub trait DynProperty: Send + Sync {
    /// Encodes the current value through erased ops.
    fn encode_erased(&self, ops: &ErasedOpsRef<'_>) -> Result<ErasedNode, CodecError>;

    /// Decodes into the current value through erased ops.
    fn decode_erased(&mut self, ops: &ErasedOpsRef<'_>, input: &ErasedNode)
    -> Result<(), CodecError>;

    /// Restores the default value.
    fn reset_to_default(&mut self);
}

impl<T: Clone + Send + Sync + 'static> DynProperty for Property<T> {
    fn encode_erased(&self, ops: &ErasedOpsRef<'_>) -> Result<ErasedNode, CodecError> {
        self.encode(ops)
    }

    fn decode_erased(
        &mut self,
        ops: &ErasedOpsRef<'_>,
        input: &ErasedNode,
    ) -> Result<(), CodecError> {
        self.decode(ops, input)
    }

    fn reset_to_default(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::primitives::{BoolCodec, StringCodec};
    use crate::ops::{JsonOps, Value, ValueOps};
    use serde_json::json;

    #[test]
    fn test_decode_failure_retains_value() {
        let mut name = Property::new(StringCodec, "d0".to_string());
        name.set("d1".to_string());
        assert!(name.decode(&JsonOps, &json!({"bad": true})).is_err());
        assert_eq!(name.get(), "d1");
        assert_eq!(name.get_default(), "d0");
    }

    #[test]
    fn test_decode_success_replaces_value_not_default() {
        let mut lit = Property::new(BoolCodec, false);
        lit.decode(&ValueOps, &Value::Bool(true)).unwrap();
        assert!(*lit.get());
        assert!(!*lit.get_default());
        assert!(!lit.is_default());
    }

    #[test]
    fn test_encode_uses_current_value() {
        let mut name = Property::new(StringCodec, String::new());
        name.set("chest".into());
        assert_eq!(name.encode(&JsonOps).unwrap(), json!("chest"));
    }

    #[test]
    fn test_set_returns_previous_and_reset_restores_default() {
        let mut name = Property::new(StringCodec, "a".to_string());
        assert_eq!(name.set("b".into()), "a");
        name.reset();
        assert!(name.is_default());
    }

    #[test]
    fn test_dyn_property_round_trip() {
        let mut source = Property::new(StringCodec, String::new());
        source.set("barrel".into());
        let ops = ErasedOpsRef::new(&JsonOps);
        let node = source.encode_erased(&ops).unwrap();

        let mut target = Property::new(StringCodec, String::new());
        target.decode_erased(&ops, &node).unwrap();
        assert_eq!(target.get(), "barrel");

        target.reset_to_default();
        assert!(target.is_default());
    }
}
