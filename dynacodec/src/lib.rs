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

#![doc = include_str!("../../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

//! # dynacodec - format-agnostic structured codecs
//!
//! dynacodec separates *what* is serialized from *which tree format* it is
//! serialized into:
//!
//! - **[`ops`]**: [`DynamicOps`](ops::DynamicOps) builds and inspects one tree
//!   representation (`serde_json::Value`, or the crate's own [`Value`](ops::Value)).
//! - **[`codec`]**: the [`Codec`] contract, primitive codecs, combinators and
//!   record helpers for map-shaped values.
//! - **[`dispatch`]**: discriminator dispatch over an open set of subtypes.
//! - **[`adapter`]**: ordered adapter chains where the first candidate that
//!   applies and succeeds wins.
//! - **[`property`]**: bound properties that carry their own codec.
//! - **[`block`]** and **[`structure`]**: the block model, the `BlockInfo`
//!   codec, structure processors and templates built on the above.
//! - **[`document`]**: byte formats for whole documents.
//! - **[`context`]**: the [`CodecContext`] owning every registry.
//!
//! ## Error Handling
//!
//! Every codec fails with a [`CodecError`]: a message plus an optional cause.
//! Composite codecs wrap child failures with the key or element that failed,
//! so the rendered error reads from the outermost slot inwards. Strict
//! registration failures are reported as [`RegistryError`].
//!
//! Adapter chains are the exception: a failing candidate is logged and the next
//! one is tried, and a key no candidate can handle is simply left out.
//!
//! ## Logging
//!
//! With the default `observability` feature, registries and dispatchers emit
//! `tracing` events: `warn` when a registration replaces an existing entry or a
//! loader skips a document, `debug` when an adapter candidate fails, and
//! `trace` on dispatch.
//!
//! ## Safety
//!
//! dynacodec is written in 100% safe Rust with `#![deny(unsafe_code)]`.

extern crate self as dynacodec;

pub mod adapter;
pub mod block;
pub mod codec;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod ops;
pub mod property;
pub mod structure;

// Re-export procedural macros when the derive feature is enabled
#[cfg(feature = "derive")]
pub use dynacodec_macros::PropertyHolder;

pub use adapter::{Adapter, AdapterChain, AdapterList};
pub use codec::{BoxedCodec, Codec};
pub use config::{CodecConfig, DuplicatePolicy};
pub use context::{CodecContext, CodecContextBuilder};
pub use dispatch::{DispatchCodec, TypeRegistry};
pub use error::{CodecError, RegistryError};
pub use ops::{DynamicOps, JsonOps, Value, ValueOps};
pub use property::Property;
