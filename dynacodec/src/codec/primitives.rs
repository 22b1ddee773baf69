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

//! Codecs for base types.
//!
//! Each codec is a unit struct, so it can be named directly wherever a codec is
//! expected:
//!
//! ```rust
//! use dynacodec::codec::Codec;
//! use dynacodec::codec::primitives::{FloatCodec, StringCodec};
//! use dynacodec::ops::ValueOps;
//!
//! let node = FloatCodec.encode(&ValueOps, &0.25).unwrap();
//! assert_eq!(FloatCodec.decode(&ValueOps, &node).unwrap(), 0.25);
//! assert!(StringCodec.decode(&ValueOps, &node).is_err());
//! ```

use crate::codec::Codec;
use crate::error::CodecError;
use crate::ops::{DynamicOps, Opaque};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// `String` as a string node.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec<String> for StringCodec {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &String) -> Result<O::Node, CodecError> {
        Ok(ops.create_string(value))
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<String, CodecError> {
        ops.get_string_value(input)
    }
}

/// `i32` as an integer node; wider values fail to decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntCodec;

impl Codec<i32> for IntCodec {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &i32) -> Result<O::Node, CodecError> {
        Ok(ops.create_int(i64::from(*value)))
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<i32, CodecError> {
        let value = ops.get_int(input)?;
        i32::try_from(value)
            .map_err(|e| CodecError::with_source(format!("{value} does not fit in i32"), e))
    }
}

/// `i64` as an integer node.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongCodec;

impl Codec<i64> for LongCodec {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &i64) -> Result<O::Node, CodecError> {
        Ok(ops.create_int(*value))
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<i64, CodecError> {
        ops.get_int(input)
    }
}

/// `f32` as a float node.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatCodec;

impl Codec<f32> for FloatCodec {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &f32) -> Result<O::Node, CodecError> {
        Ok(ops.create_float(f64::from(*value)))
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<f32, CodecError> {
        Ok(ops.get_float(input)? as f32)
    }
}

/// `f64` as a float node.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleCodec;

impl Codec<f64> for DoubleCodec {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &f64) -> Result<O::Node, CodecError> {
        Ok(ops.create_float(*value))
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<f64, CodecError> {
        ops.get_float(input)
    }
}

/// `bool` as a boolean node.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl Codec<bool> for BoolCodec {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &bool) -> Result<O::Node, CodecError> {
        Ok(ops.create_bool(*value))
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<bool, CodecError> {
        ops.get_bool(input)
    }
}

/// Any sub-tree, carried as an uninterpreted [`Opaque`] snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCodec;

impl Codec<Opaque> for PassthroughCodec {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &Opaque) -> Result<O::Node, CodecError> {
        ops.create_opaque(value)
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<Opaque, CodecError> {
        ops.get_opaque(input)
    }
}

/// Any `T` with a textual form, as a string node.
///
/// Useful for enumerations: implement [`FromStr`] and [`Display`](fmt::Display)
/// and the codec follows.
pub struct ParseCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> ParseCodec<T> {
    /// Creates the codec.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for ParseCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Codec<T> for ParseCodec<T>
where
    T: FromStr + fmt::Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    fn encode<O: DynamicOps>(&self, ops: &O, value: &T) -> Result<O::Node, CodecError> {
        Ok(ops.create_string(&value.to_string()))
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<T, CodecError> {
        let text = ops.get_string_value(input)?;
        text.parse()
            .map_err(|e| CodecError::with_source(format!("cannot parse '{text}'"), e))
    }
}
