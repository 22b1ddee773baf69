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

//! The discriminator dispatch codec.

use crate::codec::{Codec, MapBuilder, MapReader};
use crate::dispatch::{AsAny, TypeRegistry};
use crate::error::CodecError;
use crate::ops::{DynamicOps, ErasedOpsRef, erase_map};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "observability")]
use tracing::trace;

/// A [`Codec`] for `Box<T>` that dispatches on a discriminator key.
///
/// Subtype codecs see the whole map, discriminator included, and write their
/// fields into the same map the discriminator is then added to. A codec that
/// writes the discriminator key itself is overridden by the registered id.
pub struct DispatchCodec<T: ?Sized> {
    registry: Arc<TypeRegistry<T>>,
    key: String,
}

impl<T: ?Sized + AsAny> DispatchCodec<T> {
    /// Creates a codec reading and writing the discriminator under `key`.
    pub fn new(registry: Arc<TypeRegistry<T>>, key: impl Into<String>) -> Self {
        Self {
            registry,
            key: key.into(),
        }
    }

    /// Returns the discriminator key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the backing registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<TypeRegistry<T>> {
        &self.registry
    }
}

impl<T: ?Sized> Clone for DispatchCodec<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            key: self.key.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for DispatchCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchCodec")
            .field("key", &self.key)
            .field("registry", &self.registry)
            .finish()
    }
}

impl<T: ?Sized + AsAny> Codec<Box<T>> for DispatchCodec<T> {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &Box<T>) -> Result<O::Node, CodecError> {
        let value: &T = value;
        let id = self.registry.id_of(value).ok_or_else(|| {
            CodecError::new(format!(
                "value was never registered in the {} registry",
                self.registry.name()
            ))
        })?;
        let codec = self
            .registry
            .codec(id)
            .ok_or_else(|| CodecError::new(format!("unknown {}: {id}", self.key)))?;

        #[cfg(feature = "observability")]
        trace!(registry = self.registry.name(), id, "Encoding subtype");

        let erased = ErasedOpsRef::new(ops);
        let mut out = MapBuilder::new(&erased);
        codec
            .encode_fields(value, &mut out)
            .map_err(|e| e.context(format!("failed to encode {} '{id}'", self.registry.name())))?;
        out.insert(&self.key, erased.create_string(id));
        ErasedOpsRef::finish_map(ops, out.into_view())
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<Box<T>, CodecError> {
        let map = ops.get_map(input).map_err(|e| {
            e.context(format!("expected map for {}", self.registry.name()))
        })?;
        let id = match ops.lookup(&map, &self.key) {
            Some(node) => ops
                .get_string_value(node)
                .map_err(|e| e.context(format!("invalid value for '{}'", self.key)))?,
            None => {
                return Err(CodecError::new(format!(
                    "missing '{}' in {}",
                    self.key,
                    self.registry.name()
                )));
            }
        };
        let codec = self
            .registry
            .codec(&id)
            .ok_or_else(|| CodecError::new(format!("unknown {}: {id}", self.key)))?;

        #[cfg(feature = "observability")]
        trace!(registry = self.registry.name(), id = %id, "Decoding subtype");

        let erased = ErasedOpsRef::new(ops);
        let reader = MapReader::from_view(&erased, erase_map(map));
        codec
            .decode(&reader)
            .map_err(|e| e.context(format!("failed to decode {} '{id}'", self.registry.name())))
    }
}
