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

//! Discriminator dispatch over an open set of subtypes.
//!
//! A single logical slot, such as "a structure processor", may hold any of an
//! open set of concrete types. Each concrete type registers a [`RecordCodec`]
//! under a string id in a [`TypeRegistry`]. The [`DispatchCodec`] then:
//!
//! - **decodes** by reading the discriminator key (`"type"` by default) from
//!   the map, looking up the registered codec and delegating the whole map to
//!   it. An id that is not registered is always a hard failure.
//! - **encodes** by asking the value for its concrete type through [`AsAny`],
//!   reverse-looking-up the id it was registered under, delegating the fields
//!   to that codec and then writing the discriminator into the same map.
//!
//! Because both directions go through the same registry, encode can never pick
//! a different codec than decode would pick for the same id.
//!
//! # Examples
//!
//! ```rust
//! use dynacodec::codec::{Codec, MapBuilder, MapReader, RecordCodec};
//! use dynacodec::codec::primitives::IntCodec;
//! use dynacodec::dispatch::{AsAny, DispatchCodec, TypeRegistry};
//! use dynacodec::ops::{DynamicOps, JsonOps};
//! use dynacodec::CodecError;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! trait Shape: AsAny + Send + Sync {
//!     fn area(&self) -> i32;
//! }
//!
//! struct Square(i32);
//!
//! impl Shape for Square {
//!     fn area(&self) -> i32 {
//!         self.0 * self.0
//!     }
//! }
//!
//! struct SquareFields;
//!
//! impl RecordCodec<Square> for SquareFields {
//!     fn encode_fields<O: DynamicOps>(&self, value: &Square, out: &mut MapBuilder<'_, O>) -> Result<(), CodecError> {
//!         out.field("side", &IntCodec, &value.0)?;
//!         Ok(())
//!     }
//!
//!     fn decode_fields<O: DynamicOps>(&self, input: &MapReader<'_, O>) -> Result<Square, CodecError> {
//!         Ok(Square(input.required("side", &IntCodec)?))
//!     }
//! }
//!
//! let mut registry: TypeRegistry<dyn Shape> = TypeRegistry::new("shape");
//! registry
//!     .register("square", SquareFields, |square: Square| Box::new(square) as Box<dyn Shape>)
//!     .unwrap();
//!
//! let codec = DispatchCodec::new(Arc::new(registry), "type");
//! let shape = codec.decode(&JsonOps, &json!({"type": "square", "side": 3})).unwrap();
//! assert_eq!(shape.area(), 9);
//! assert_eq!(codec.encode(&JsonOps, &shape).unwrap(), json!({"side": 3, "type": "square"}));
//! ```
//!
//! [`RecordCodec`]: crate::codec::RecordCodec

mod codec;
mod registry;

pub use codec::DispatchCodec;
pub use registry::TypeRegistry;

use std::any::Any;

/// Exposes a value's concrete type for dispatch.
///
/// Implemented for every sized `'static` type. Make it a supertrait of a
/// dispatched trait so trait objects can report their concrete type.
pub trait AsAny: Any {
    /// Returns `self` as [`Any`].
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
