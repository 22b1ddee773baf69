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

//! The [`Codec`] trait and its type-erased form.

use crate::codec::{Fallback, ListCodec, OptionalCodec, OrElse, XMap};
use crate::error::CodecError;
use crate::ops::{DynamicOps, ErasedNode, ErasedOpsRef};
use std::fmt;
use std::sync::Arc;

/// A bidirectional transcoder between `T` and tree nodes.
///
/// Failures are returned as [`CodecError`]s; a codec never panics on malformed
/// input.
///
/// # Examples
///
/// ```rust
/// use dynacodec::{Codec, CodecError};
/// use dynacodec::ops::{DynamicOps, ValueOps, Value};
///
/// struct Celsius;
///
/// impl Codec<f64> for Celsius {
///     fn encode<O: DynamicOps>(&self, ops: &O, value: &f64) -> Result<O::Node, CodecError> {
///         Ok(ops.create_float(*value))
///     }
///
///     fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<f64, CodecError> {
///         let value = ops.get_float(input)?;
///         if value < -273.15 {
///             return Err(CodecError::new(format!("{value} is below absolute zero")));
///         }
///         Ok(value)
///     }
/// }
///
/// assert_eq!(Celsius.decode(&ValueOps, &Value::Float(21.5)).unwrap(), 21.5);
/// assert!(Celsius.decode(&ValueOps, &Value::Float(-300.0)).is_err());
/// ```
pub trait Codec<T>: Send + Sync {
    /// Encodes `value` into a node of `ops`.
    fn encode<O: DynamicOps>(&self, ops: &O, value: &T) -> Result<O::Node, CodecError>;

    /// Decodes a node of `ops` into a value.
    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<T, CodecError>;

    /// Maps this codec onto another type with fallible conversions both ways.
    fn xmap<U, F, G>(self, to: F, from: G) -> XMap<Self, T, F, G>
    where
        Self: Sized,
        F: Fn(T) -> Result<U, CodecError> + Send + Sync,
        G: Fn(&U) -> Result<T, CodecError> + Send + Sync,
    {
        XMap::new(self, to, from)
    }

    /// A codec for `Vec<T>` encoded as a list node.
    fn list(self) -> ListCodec<Self, T>
    where
        Self: Sized,
    {
        ListCodec::new(self)
    }

    /// A codec for `Option<T>`, with `None` encoded as the empty node.
    fn optional(self) -> OptionalCodec<Self, T>
    where
        Self: Sized,
    {
        OptionalCodec::new(self)
    }

    /// Decodes to `default` whenever this codec fails to decode.
    fn or_else(self, default: T) -> OrElse<Self, T>
    where
        Self: Sized,
        T: Clone + Send + Sync,
    {
        OrElse::new(self, default)
    }

    /// Tries `other` whenever this codec fails, in both directions.
    fn fallback<C: Codec<T>>(self, other: C) -> Fallback<Self, C, T>
    where
        Self: Sized,
    {
        Fallback::new(self, other)
    }

    /// Erases this codec into a cloneable handle.
    fn boxed(self) -> BoxedCodec<T>
    where
        Self: Sized + 'static,
        T: 'static,
    {
        BoxedCodec::new(self)
    }
}

/// Object-safe form of [`Codec`], implemented for every codec.
pub trait DynCodec<T>: Send + Sync {
    /// Encodes through erased ops.
    fn encode_erased(&self, ops: &ErasedOpsRef<'_>, value: &T) -> Result<ErasedNode, CodecError>;

    /// Decodes through erased ops.
    fn decode_erased(&self, ops: &ErasedOpsRef<'_>, input: &ErasedNode) -> Result<T, CodecError>;
}

impl<T, C: Codec<T>> DynCodec<T> for C {
    fn encode_erased(&self, ops: &ErasedOpsRef<'_>, value: &T) -> Result<ErasedNode, CodecError> {
        self.encode(ops, value)
    }

    fn decode_erased(&self, ops: &ErasedOpsRef<'_>, input: &ErasedNode) -> Result<T, CodecError> {
        self.decode(ops, input)
    }
}

/// A shared, type-erased codec.
pub struct BoxedCodec<T> {
    inner: Arc<dyn DynCodec<T>>,
}

impl<T> BoxedCodec<T> {
    /// Erases a codec.
    pub fn new<C: Codec<T> + 'static>(codec: C) -> Self
    where
        T: 'static,
    {
        Self {
            inner: Arc::new(codec),
        }
    }
}

impl<T> Clone for BoxedCodec<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for BoxedCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedCodec")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Codec<T> for BoxedCodec<T> {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &T) -> Result<O::Node, CodecError> {
        let erased = ErasedOpsRef::new(ops);
        self.inner.encode_erased(&erased, value)?.downcast()
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<T, CodecError> {
        let erased = ErasedOpsRef::new(ops);
        self.inner
            .decode_erased(&erased, &ErasedNode::new(input.clone()))
    }
}
