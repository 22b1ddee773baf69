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

//! Registry of subtype codecs keyed by discriminator id.

use crate::codec::{MapBuilder, MapReader, RecordCodec};
use crate::config::DuplicatePolicy;
use crate::dispatch::AsAny;
use crate::error::{CodecError, RegistryError};
use crate::ops::ErasedOpsRef;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

#[cfg(feature = "observability")]
use tracing::warn;

/// A registered subtype codec, erased over both ops and concrete type.
pub(crate) trait SubtypeCodec<T: ?Sized>: Send + Sync {
    fn encode_fields(
        &self,
        value: &T,
        out: &mut MapBuilder<'_, ErasedOpsRef<'_>>,
    ) -> Result<(), CodecError>;

    fn decode(&self, input: &MapReader<'_, ErasedOpsRef<'_>>) -> Result<Box<T>, CodecError>;
}

struct Typed<S, C, F> {
    codec: C,
    upcast: F,
    _marker: PhantomData<fn() -> S>,
}

impl<T, S, C, F> SubtypeCodec<T> for Typed<S, C, F>
where
    T: ?Sized + AsAny,
    S: 'static,
    C: RecordCodec<S>,
    F: Fn(S) -> Box<T> + Send + Sync,
{
    fn encode_fields(
        &self,
        value: &T,
        out: &mut MapBuilder<'_, ErasedOpsRef<'_>>,
    ) -> Result<(), CodecError> {
        let concrete = value.as_any().downcast_ref::<S>().ok_or_else(|| {
            CodecError::new(format!(
                "value is not a {}",
                std::any::type_name::<S>()
            ))
        })?;
        self.codec.encode_fields(concrete, out)
    }

    fn decode(&self, input: &MapReader<'_, ErasedOpsRef<'_>>) -> Result<Box<T>, CodecError> {
        self.codec.decode_fields(input).map(&self.upcast)
    }
}

struct Entry<T: ?Sized> {
    type_id: TypeId,
    codec: Arc<dyn SubtypeCodec<T>>,
}

impl<T: ?Sized> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            type_id: self.type_id,
            codec: Arc::clone(&self.codec),
        }
    }
}

/// Maps discriminator ids to subtype codecs, and concrete types back to ids.
///
/// `T` is usually a trait object such as `dyn StructureProcessor`. Entries are
/// added during startup and never removed; once shared behind an [`Arc`] the
/// registry is read-only.
///
/// # Duplicate ids
///
/// With [`DuplicatePolicy::Replace`] (the default) a second registration under
/// an existing id replaces the first and logs a warning. With
/// [`DuplicatePolicy::Reject`] it fails with [`RegistryError::DuplicateKey`].
/// [`try_register`](Self::try_register) always rejects.
pub struct TypeRegistry<T: ?Sized> {
    name: &'static str,
    policy: DuplicatePolicy,
    by_id: HashMap<String, Entry<T>>,
    by_type: HashMap<TypeId, String>,
}

impl<T: ?Sized + AsAny> TypeRegistry<T> {
    /// Creates an empty registry; `name` appears in errors and logs.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self::with_policy(name, DuplicatePolicy::default())
    }

    /// Creates an empty registry with an explicit duplicate policy.
    #[must_use]
    pub fn with_policy(name: &'static str, policy: DuplicatePolicy) -> Self {
        Self {
            name,
            policy,
            by_id: HashMap::new(),
            by_type: HashMap::new(),
        }
    }

    /// Returns the registry name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the duplicate policy.
    #[must_use]
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Registers the codec for subtype `S` under `id`.
    ///
    /// `upcast` turns a decoded `S` into the registry's value type, typically
    /// `|value| Box::new(value) as Box<dyn Trait>`.
    pub fn register<S, C, F>(
        &mut self,
        id: impl Into<String>,
        codec: C,
        upcast: F,
    ) -> Result<(), RegistryError>
    where
        T: 'static,
        S: 'static,
        C: RecordCodec<S> + 'static,
        F: Fn(S) -> Box<T> + Send + Sync + 'static,
    {
        let policy = self.policy;
        self.insert(id.into(), codec, upcast, policy)
    }

    /// Like [`register`](Self::register), but always rejects duplicate ids.
    pub fn try_register<S, C, F>(
        &mut self,
        id: impl Into<String>,
        codec: C,
        upcast: F,
    ) -> Result<(), RegistryError>
    where
        T: 'static,
        S: 'static,
        C: RecordCodec<S> + 'static,
        F: Fn(S) -> Box<T> + Send + Sync + 'static,
    {
        self.insert(id.into(), codec, upcast, DuplicatePolicy::Reject)
    }

    fn insert<S, C, F>(
        &mut self,
        id: String,
        codec: C,
        upcast: F,
        policy: DuplicatePolicy,
    ) -> Result<(), RegistryError>
    where
        T: 'static,
        S: 'static,
        C: RecordCodec<S> + 'static,
        F: Fn(S) -> Box<T> + Send + Sync + 'static,
    {
        if self.by_id.contains_key(&id) && policy == DuplicatePolicy::Reject {
            return Err(RegistryError::DuplicateKey {
                registry: self.name,
                key: id,
            });
        }

        let type_id = TypeId::of::<S>();
        let entry = Entry {
            type_id,
            codec: Arc::new(Typed {
                codec,
                upcast,
                _marker: PhantomData::<fn() -> S>,
            }),
        };

        if let Some(previous) = self.by_id.insert(id.clone(), entry) {
            #[cfg(feature = "observability")]
            warn!(registry = self.name, id = %id, "Replacing registered subtype codec");
            if self.by_type.get(&previous.type_id) == Some(&id) {
                self.by_type.remove(&previous.type_id);
            }
        }
        self.by_type.insert(type_id, id);
        Ok(())
    }

    /// Returns true if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Returns the id the concrete type of `value` is registered under.
    #[must_use]
    pub fn id_of(&self, value: &T) -> Option<&str> {
        let type_id = Any::type_id(value.as_any());
        self.by_type.get(&type_id).map(String::as_str)
    }

    /// Returns every registered id, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.by_id.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the number of registered ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub(crate) fn codec(&self, id: &str) -> Option<&Arc<dyn SubtypeCodec<T>>> {
        self.by_id.get(id).map(|entry| &entry.codec)
    }
}

impl<T: ?Sized> Clone for TypeRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            policy: self.policy,
            by_id: self.by_id.clone(),
            by_type: self.by_type.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for TypeRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.by_id.keys().collect();
        ids.sort_unstable();
        f.debug_struct("TypeRegistry")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("ids", &ids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::primitives::StringCodec;
    use crate::ops::DynamicOps;

    trait Named: AsAny + Send + Sync {
        fn name(&self) -> &str;
    }

    #[derive(Debug, PartialEq)]
    struct Alpha(String);

    #[derive(Debug, PartialEq)]
    struct Beta(String);

    impl Named for Alpha {
        fn name(&self) -> &str {
            &self.0
        }
    }

    impl Named for Beta {
        fn name(&self) -> &str {
            &self.0
        }
    }

    struct AlphaFields;
    struct BetaFields;

    impl RecordCodec<Alpha> for AlphaFields {
        fn encode_fields<O: DynamicOps>(
            &self,
            value: &Alpha,
            out: &mut MapBuilder<'_, O>,
        ) -> Result<(), CodecError> {
            out.field("name", &StringCodec, &value.0)?;
            Ok(())
        }

        fn decode_fields<O: DynamicOps>(&self, input: &MapReader<'_, O>) -> Result<Alpha, CodecError> {
            Ok(Alpha(input.required("name", &StringCodec)?))
        }
    }

    impl RecordCodec<Beta> for BetaFields {
        fn encode_fields<O: DynamicOps>(
            &self,
            value: &Beta,
            out: &mut MapBuilder<'_, O>,
        ) -> Result<(), CodecError> {
            out.field("label", &StringCodec, &value.0)?;
            Ok(())
        }

        fn decode_fields<O: DynamicOps>(&self, input: &MapReader<'_, O>) -> Result<Beta, CodecError> {
            Ok(Beta(input.required("label", &StringCodec)?))
        }
    }

    fn upcast_alpha(value: Alpha) -> Box<dyn Named> {
        Box::new(value)
    }

    fn upcast_beta(value: Beta) -> Box<dyn Named> {
        Box::new(value)
    }

    #[test]
    fn test_reverse_lookup() {
        let mut registry: TypeRegistry<dyn Named> = TypeRegistry::new("named");
        registry.register("alpha", AlphaFields, upcast_alpha).unwrap();
        registry.register("beta", BetaFields, upcast_beta).unwrap();

        let alpha: Box<dyn Named> = Box::new(Alpha("a".into()));
        let beta: Box<dyn Named> = Box::new(Beta("b".into()));
        assert_eq!(registry.id_of(alpha.as_ref()), Some("alpha"));
        assert_eq!(registry.id_of(beta.as_ref()), Some("beta"));
        assert_eq!(registry.ids(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_unregistered_type_has_no_id() {
        let mut registry: TypeRegistry<dyn Named> = TypeRegistry::new("named");
        registry.register("alpha", AlphaFields, upcast_alpha).unwrap();
        let beta: Box<dyn Named> = Box::new(Beta("b".into()));
        assert_eq!(registry.id_of(beta.as_ref()), None);
    }

    #[test]
    fn test_replace_moves_reverse_mapping() {
        let mut registry: TypeRegistry<dyn Named> = TypeRegistry::new("named");
        registry.register("shared", AlphaFields, upcast_alpha).unwrap();
        registry.register("shared", BetaFields, upcast_beta).unwrap();

        let alpha: Box<dyn Named> = Box::new(Alpha("a".into()));
        let beta: Box<dyn Named> = Box::new(Beta("b".into()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.id_of(alpha.as_ref()), None);
        assert_eq!(registry.id_of(beta.as_ref()), Some("shared"));
    }

    #[test]
    fn test_reject_policy() {
        let mut registry: TypeRegistry<dyn Named> =
            TypeRegistry::with_policy("named", DuplicatePolicy::Reject);
        registry.register("alpha", AlphaFields, upcast_alpha).unwrap();
        let error = registry.register("alpha", BetaFields, upcast_beta).unwrap_err();
        assert_eq!(
            error,
            RegistryError::DuplicateKey {
                registry: "named",
                key: "alpha".into()
            }
        );
        let beta: Box<dyn Named> = Box::new(Beta("b".into()));
        assert_eq!(registry.id_of(beta.as_ref()), None);
    }

    #[test]
    fn test_try_register_ignores_replace_policy() {
        let mut registry: TypeRegistry<dyn Named> = TypeRegistry::new("named");
        registry.try_register("alpha", AlphaFields, upcast_alpha).unwrap();
        assert!(registry.try_register("alpha", AlphaFields, upcast_alpha).is_err());
        assert!(registry.contains("alpha"));
    }

    #[test]
    fn test_name_method_is_trait_dispatch() {
        let value: Box<dyn Named> = Box::new(Alpha("x".into()));
        assert_eq!(value.name(), "x");
    }
}
