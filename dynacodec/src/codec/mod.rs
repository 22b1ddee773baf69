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

//! Codecs: bidirectional, typed transcoders between values and tree nodes.
//!
//! A [`Codec<T>`] converts a `T` into a node of any [`DynamicOps`] and back.
//! Every codec obeys the round-trip law: decoding the result of encoding a
//! value yields an equal value.
//!
//! # Building blocks
//!
//! - [`primitives`]: codecs for strings, numbers, booleans and opaque blobs
//! - Combinators on [`Codec`]: [`xmap`](Codec::xmap), [`list`](Codec::list),
//!   [`optional`](Codec::optional), [`or_else`](Codec::or_else),
//!   [`fallback`](Codec::fallback), [`boxed`](Codec::boxed), plus
//!   [`one_of`] and [`map_of`]
//! - [`RecordCodec`] with [`MapBuilder`] and [`MapReader`] for map-shaped values
//!
//! # Examples
//!
//! ```rust
//! use dynacodec::codec::{Codec, primitives::StringCodec};
//! use dynacodec::ops::JsonOps;
//! use serde_json::json;
//!
//! let codec = StringCodec.list();
//! let names = vec!["stone".to_string(), "dirt".to_string()];
//! let node = codec.encode(&JsonOps, &names).unwrap();
//! assert_eq!(node, json!(["stone", "dirt"]));
//! assert_eq!(codec.decode(&JsonOps, &node).unwrap(), names);
//! ```
//!
//! [`DynamicOps`]: crate::ops::DynamicOps

mod combinators;
pub mod primitives;
mod record;
mod traits;

pub use combinators::{
    Fallback, ListCodec, MapOfCodec, OneOf, OptionalCodec, OrElse, XMap, map_of, one_of,
};
pub use record::{MapBuilder, MapReader, Record, RecordCodec};
pub use traits::{BoxedCodec, Codec, DynCodec};
