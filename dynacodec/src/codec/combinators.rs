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

//! Codec combinators.

use crate::codec::{BoxedCodec, Codec};
use crate::error::CodecError;
use crate::ops::DynamicOps;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// See [`Codec::xmap`].
pub struct XMap<C, T, F, G> {
    inner: C,
    to: F,
    from: G,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T, F, G> XMap<C, T, F, G> {
    pub(crate) fn new(inner: C, to: F, from: G) -> Self {
        Self {
            inner,
            to,
            from,
            _marker: PhantomData,
        }
    }
}

impl<C, T, U, F, G> Codec<U> for XMap<C, T, F, G>
where
    C: Codec<T>,
    F: Fn(T) -> Result<U, CodecError> + Send + Sync,
    G: Fn(&U) -> Result<T, CodecError> + Send + Sync,
{
    fn encode<O: DynamicOps>(&self, ops: &O, value: &U) -> Result<O::Node, CodecError> {
        let inner = (self.from)(value)?;
        self.inner.encode(ops, &inner)
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<U, CodecError> {
        (self.to)(self.inner.decode(ops, input)?)
    }
}

/// See [`Codec::list`].
pub struct ListCodec<C, T> {
    element: C,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T> ListCodec<C, T> {
    pub(crate) fn new(element: C) -> Self {
        Self {
            element,
            _marker: PhantomData,
        }
    }
}

impl<C: Clone, T> Clone for ListCodec<C, T> {
    fn clone(&self) -> Self {
        Self::new(self.element.clone())
    }
}

impl<C: fmt::Debug, T> fmt::Debug for ListCodec<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListCodec")
            .field("element", &self.element)
            .finish()
    }
}

impl<C: Codec<T>, T> Codec<Vec<T>> for ListCodec<C, T> {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &Vec<T>) -> Result<O::Node, CodecError> {
        let elements = value
            .iter()
            .enumerate()
            .map(|(index, element)| {
                self.element
                    .encode(ops, element)
                    .map_err(|e| e.context(format!("failed to encode element {index}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ops.create_list(elements))
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<Vec<T>, CodecError> {
        ops.get_list(input)?
            .iter()
            .enumerate()
            .map(|(index, element)| {
                self.element
                    .decode(ops, element)
                    .map_err(|e| e.context(format!("invalid element {index}")))
            })
            .collect()
    }
}

/// See [`Codec::optional`].
pub struct OptionalCodec<C, T> {
    inner: C,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T> OptionalCodec<C, T> {
    pub(crate) fn new(inner: C) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<C: Codec<T>, T> Codec<Option<T>> for OptionalCodec<C, T> {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &Option<T>) -> Result<O::Node, CodecError> {
        match value {
            Some(value) => self.inner.encode(ops, value),
            None => Ok(ops.empty()),
        }
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<Option<T>, CodecError> {
        if ops.is_empty(input) {
            return Ok(None);
        }
        self.inner.decode(ops, input).map(Some)
    }
}

/// See [`Codec::or_else`].
pub struct OrElse<C, T> {
    inner: C,
    default: T,
}

impl<C, T> OrElse<C, T> {
    pub(crate) fn new(inner: C, default: T) -> Self {
        Self { inner, default }
    }
}

impl<C: Codec<T>, T: Clone + Send + Sync> Codec<T> for OrElse<C, T> {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &T) -> Result<O::Node, CodecError> {
        self.inner.encode(ops, value)
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<T, CodecError> {
        Ok(self
            .inner
            .decode(ops, input)
            .unwrap_or_else(|_| self.default.clone()))
    }
}

/// See [`Codec::fallback`].
pub struct Fallback<A, B, T> {
    primary: A,
    secondary: B,
    _marker: PhantomData<fn() -> T>,
}

impl<A, B, T> Fallback<A, B, T> {
    pub(crate) fn new(primary: A, secondary: B) -> Self {
        Self {
            primary,
            secondary,
            _marker: PhantomData,
        }
    }
}

impl<A: Codec<T>, B: Codec<T>, T> Codec<T> for Fallback<A, B, T> {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &T) -> Result<O::Node, CodecError> {
        self.primary
            .encode(ops, value)
            .or_else(|_| self.secondary.encode(ops, value))
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<T, CodecError> {
        self.primary
            .decode(ops, input)
            .or_else(|_| self.secondary.decode(ops, input))
    }
}

/// Tries alternative codecs in order; the first that succeeds wins.
///
/// # Examples
///
/// ```rust
/// use dynacodec::codec::{Codec, one_of};
/// use dynacodec::codec::primitives::{IntCodec, ParseCodec};
/// use dynacodec::ops::{JsonOps};
/// use serde_json::json;
///
/// let lenient = one_of(vec![IntCodec.boxed(), ParseCodec::<i32>::new().boxed()]);
/// assert_eq!(lenient.decode(&JsonOps, &json!(7)).unwrap(), 7);
/// assert_eq!(lenient.decode(&JsonOps, &json!("7")).unwrap(), 7);
/// ```
pub struct OneOf<T> {
    alternatives: Vec<BoxedCodec<T>>,
}

/// Builds a [`OneOf`] codec.
#[must_use]
pub fn one_of<T>(alternatives: Vec<BoxedCodec<T>>) -> OneOf<T> {
    OneOf { alternatives }
}

impl<T> OneOf<T> {
    fn exhausted(&self, last: Option<CodecError>) -> CodecError {
        let message = format!("none of {} alternatives matched", self.alternatives.len());
        match last {
            Some(error) => error.context(message),
            None => CodecError::new(message),
        }
    }
}

impl<T> Codec<T> for OneOf<T> {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &T) -> Result<O::Node, CodecError> {
        let mut last = None;
        for codec in &self.alternatives {
            match codec.encode(ops, value) {
                Ok(node) => return Ok(node),
                Err(error) => last = Some(error),
            }
        }
        Err(self.exhausted(last))
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<T, CodecError> {
        let mut last = None;
        for codec in &self.alternatives {
            match codec.decode(ops, input) {
                Ok(value) => return Ok(value),
                Err(error) => last = Some(error),
            }
        }
        Err(self.exhausted(last))
    }
}

/// A codec for `BTreeMap<K, V>` encoded as a map node.
pub struct MapOfCodec<KC, VC, K, V> {
    keys: KC,
    values: VC,
    _marker: PhantomData<fn() -> (K, V)>,
}

/// Builds a [`MapOfCodec`] from key and value codecs.
///
/// # Examples
///
/// ```rust
/// use dynacodec::codec::{Codec, map_of};
/// use dynacodec::codec::primitives::{IntCodec, StringCodec};
/// use dynacodec::ops::JsonOps;
/// use serde_json::json;
/// use std::collections::BTreeMap;
///
/// let codec = map_of(StringCodec, IntCodec);
/// let value = BTreeMap::from([("age".to_string(), 3)]);
/// assert_eq!(codec.encode(&JsonOps, &value).unwrap(), json!({"age": 3}));
/// ```
#[must_use]
pub fn map_of<KC, VC, K, V>(keys: KC, values: VC) -> MapOfCodec<KC, VC, K, V>
where
    KC: Codec<K>,
    VC: Codec<V>,
{
    MapOfCodec {
        keys,
        values,
        _marker: PhantomData,
    }
}

impl<KC, VC, K, V> Codec<BTreeMap<K, V>> for MapOfCodec<KC, VC, K, V>
where
    KC: Codec<K>,
    VC: Codec<V>,
    K: Ord,
{
    fn encode<O: DynamicOps>(
        &self,
        ops: &O,
        value: &BTreeMap<K, V>,
    ) -> Result<O::Node, CodecError> {
        let entries = value
            .iter()
            .map(|(key, value)| Ok((self.keys.encode(ops, key)?, self.values.encode(ops, value)?)))
            .collect::<Result<Vec<_>, CodecError>>()?;
        Ok(ops.create_map(entries))
    }

    fn decode<O: DynamicOps>(
        &self,
        ops: &O,
        input: &O::Node,
    ) -> Result<BTreeMap<K, V>, CodecError> {
        ops.get_map(input)?
            .iter()
            .map(|(key, value)| Ok((self.keys.decode(ops, key)?, self.values.decode(ops, value)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::primitives::{BoolCodec, IntCodec, StringCodec};
    use crate::ops::{JsonOps, Value, ValueOps};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Material(String);

    #[test]
    fn test_xmap_round_trip_and_failure() {
        let codec = StringCodec.xmap(
            |name: String| {
                if name.is_empty() {
                    Err(CodecError::new("empty material"))
                } else {
                    Ok(Material(name))
                }
            },
            |material: &Material| Ok(material.0.clone()),
        );
        let node = codec.encode(&JsonOps, &Material("stone".into())).unwrap();
        assert_eq!(codec.decode(&JsonOps, &node).unwrap(), Material("stone".into()));
        assert!(codec.decode(&JsonOps, &json!("")).is_err());
    }

    #[test]
    fn test_list_reports_failing_index() {
        let error = IntCodec.list().decode(&JsonOps, &json!([1, "two", 3])).unwrap_err();
        assert_eq!(error.message(), "invalid element 1");
    }

    #[test]
    fn test_optional_uses_empty_node() {
        let codec = BoolCodec.optional();
        assert_eq!(codec.encode(&ValueOps, &None).unwrap(), Value::Empty);
        assert_eq!(codec.decode(&ValueOps, &Value::Empty).unwrap(), None);
        assert_eq!(codec.decode(&ValueOps, &Value::Bool(true)).unwrap(), Some(true));
        assert!(codec.decode(&ValueOps, &Value::Int(1)).is_err());
    }

    #[test]
    fn test_or_else_substitutes_default() {
        let codec = IntCodec.or_else(-1);
        assert_eq!(codec.decode(&JsonOps, &json!("x")).unwrap(), -1);
        assert_eq!(codec.decode(&JsonOps, &json!(5)).unwrap(), 5);
    }

    #[test]
    fn test_fallback_tries_secondary() {
        let codec = IntCodec.fallback(StringCodec.xmap(
            |s: String| s.parse::<i32>().map_err(|e| CodecError::with_source("bad int", e)),
            |n: &i32| Ok(n.to_string()),
        ));
        assert_eq!(codec.decode(&JsonOps, &json!("12")).unwrap(), 12);
        assert_eq!(codec.encode(&JsonOps, &12).unwrap(), json!(12));
    }

    #[test]
    fn test_one_of_exhausted() {
        let codec = one_of(vec![
            IntCodec.boxed(),
            BoolCodec
                .xmap(|b: bool| Ok(i32::from(b)), |n: &i32| Ok(*n != 0))
                .boxed(),
        ]);
        assert_eq!(codec.decode(&JsonOps, &json!(true)).unwrap(), 1);
        let error = codec.decode(&JsonOps, &json!("x")).unwrap_err();
        assert_eq!(error.message(), "none of 2 alternatives matched");
    }

    #[test]
    fn test_map_of_round_trip() {
        let codec = map_of(StringCodec, IntCodec);
        let value = BTreeMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);
        let node = codec.encode(&ValueOps, &value).unwrap();
        assert_eq!(codec.decode(&ValueOps, &node).unwrap(), value);
    }
}
