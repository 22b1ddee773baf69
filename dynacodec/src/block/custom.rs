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

//! Custom blocks and the open registry of custom block types.

use crate::codec::{MapBuilder, MapReader};
use crate::config::DuplicatePolicy;
use crate::dispatch::AsAny;
use crate::error::{CodecError, RegistryError};
use crate::ops::{ErasedOpsRef, ValueOps};
use crate::property::{PropertyHolder, load_properties, save_properties};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "observability")]
use tracing::warn;

/// Key under which the default serializer writes entity properties.
pub const PROPERTIES_KEY: &str = "properties";

/// Mutable state attached to a placed custom block.
pub trait BlockEntity: PropertyHolder + AsAny + fmt::Debug + Send + Sync {
    /// Clones this entity behind a new box.
    fn clone_entity(&self) -> Box<dyn BlockEntity>;
}

/// A placed custom block: its registry id and optional entity state.
#[derive(Debug)]
pub struct CustomBlock {
    /// Namespaced id of the block's type.
    pub id: String,
    /// Entity state, if the type has any.
    pub entity: Option<Box<dyn BlockEntity>>,
}

impl CustomBlock {
    /// Creates a custom block without entity state.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity: None,
        }
    }

    /// Attaches entity state.
    #[must_use]
    pub fn with_entity(mut self, entity: Box<dyn BlockEntity>) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Returns the entity downcast to `E`.
    #[must_use]
    pub fn entity<E: BlockEntity>(&self) -> Option<&E> {
        self.entity
            .as_deref()
            .and_then(|entity| entity.as_any().downcast_ref::<E>())
    }
}

impl Clone for CustomBlock {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            entity: self.entity.as_ref().map(|entity| entity.clone_entity()),
        }
    }
}

// Entities compare by their saved properties.
impl PartialEq for CustomBlock {
    fn eq(&self, other: &Self) -> bool {
        if self.id != other.id {
            return false;
        }
        match (self.entity.as_deref(), other.entity.as_deref()) {
            (None, None) => true,
            (Some(left), Some(right)) => {
                match (save_properties(&ValueOps, left), save_properties(&ValueOps, right)) {
                    (Ok(left), Ok(right)) => left == right,
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

/// A registered kind of custom block.
///
/// The type creates fresh blocks and contributes its own keys to the block's
/// map. By default the entity's properties are written under
/// [`PROPERTIES_KEY`].
pub trait CustomBlockType: Send + Sync {
    /// Returns the namespaced id this type is registered under.
    fn id(&self) -> &str;

    /// Creates a block of this type in its default state.
    fn create(&self) -> CustomBlock;

    /// Writes this type's keys for `block`.
    fn encode_extra(
        &self,
        block: &CustomBlock,
        out: &mut MapBuilder<'_, ErasedOpsRef<'_>>,
    ) -> Result<(), CodecError> {
        if let Some(entity) = block.entity.as_deref() {
            let node = save_properties(out.ops(), entity)?;
            out.insert(PROPERTIES_KEY, node);
        }
        Ok(())
    }

    /// Reads this type's keys into a freshly created `block`.
    fn decode_extra(
        &self,
        block: &mut CustomBlock,
        input: &MapReader<'_, ErasedOpsRef<'_>>,
    ) -> Result<(), CodecError> {
        if let (Some(entity), Some(node)) = (block.entity.as_deref_mut(), input.get(PROPERTIES_KEY)) {
            load_properties(input.ops(), node, entity)
                .map_err(|e| e.context(format!("invalid {PROPERTIES_KEY} for {}", block.id)))?;
        }
        Ok(())
    }
}

type EntityFactory = dyn Fn() -> Box<dyn BlockEntity> + Send + Sync;

/// A custom block type built from an id and an optional entity factory.
pub struct SimpleBlockType {
    id: String,
    entity: Option<Box<EntityFactory>>,
}

impl SimpleBlockType {
    /// Creates a type whose blocks carry no entity state.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity: None,
        }
    }

    /// Creates a type whose blocks get an entity from `factory`.
    pub fn with_entity<F>(id: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn BlockEntity> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            entity: Some(Box::new(factory)),
        }
    }
}

impl CustomBlockType for SimpleBlockType {
    fn id(&self) -> &str {
        &self.id
    }

    fn create(&self) -> CustomBlock {
        CustomBlock {
            id: self.id.clone(),
            entity: self.entity.as_ref().map(|factory| factory()),
        }
    }
}

impl fmt::Debug for SimpleBlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleBlockType")
            .field("id", &self.id)
            .field("entity", &self.entity.is_some())
            .finish()
    }
}

/// Open registry of custom block types keyed by id.
#[derive(Clone, Default)]
pub struct CustomBlockRegistry {
    policy: DuplicatePolicy,
    types: HashMap<String, Arc<dyn CustomBlockType>>,
}

impl CustomBlockRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with an explicit duplicate policy.
    #[must_use]
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            types: HashMap::new(),
        }
    }

    /// Registers a block type under its own id.
    pub fn register<B: CustomBlockType + 'static>(&mut self, block_type: B) -> Result<(), RegistryError> {
        self.register_shared(Arc::new(block_type))
    }

    /// Registers an already shared block type.
    pub fn register_shared(&mut self, block_type: Arc<dyn CustomBlockType>) -> Result<(), RegistryError> {
        let id = block_type.id().to_string();
        if self.types.contains_key(&id) {
            if self.policy == DuplicatePolicy::Reject {
                return Err(RegistryError::DuplicateKey {
                    registry: "custom block",
                    key: id,
                });
            }
            #[cfg(feature = "observability")]
            warn!(id = %id, "Replacing custom block type");
        }
        self.types.insert(id, block_type);
        Ok(())
    }

    /// Returns the type registered under `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<dyn CustomBlockType>> {
        self.types.get(id)
    }

    /// Returns true if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    /// Creates a default block of the type registered under `id`.
    #[must_use]
    pub fn create(&self, id: &str) -> Option<CustomBlock> {
        self.get(id).map(|block_type| block_type.create())
    }

    /// Returns the registered ids, in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.types.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl fmt::Debug for CustomBlockRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomBlockRegistry")
            .field("policy", &self.policy)
            .field("ids", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::primitives::IntCodec;
    use crate::property::{DynProperty, Property};

    #[derive(Debug, Clone)]
    struct Counter {
        count: Property<i32>,
    }

    impl PropertyHolder for Counter {
        fn properties(&self) -> Vec<(&'static str, &dyn DynProperty)> {
            vec![("count", &self.count as &dyn DynProperty)]
        }

        fn properties_mut(&mut self) -> Vec<(&'static str, &mut dyn DynProperty)> {
            vec![("count", &mut self.count as &mut dyn DynProperty)]
        }
    }

    impl BlockEntity for Counter {
        fn clone_entity(&self) -> Box<dyn BlockEntity> {
            Box::new(self.clone())
        }
    }

    fn counter_type() -> SimpleBlockType {
        SimpleBlockType::with_entity("test:counter", || {
            Box::new(Counter {
                count: Property::new(IntCodec, 0),
            })
        })
    }

    #[test]
    fn test_create_and_downcast_entity() {
        let block = counter_type().create();
        assert_eq!(block.id, "test:counter");
        assert_eq!(*block.entity::<Counter>().unwrap().count.get(), 0);
    }

    #[test]
    fn test_equality_compares_properties() {
        let block_type = counter_type();
        let left = block_type.create();
        let mut right = block_type.create();
        assert_eq!(left, right);

        let mut counter = right.entity::<Counter>().unwrap().clone();
        counter.count.set(2);
        right.entity = Some(Box::new(counter));
        assert_ne!(left, right);
        assert_ne!(left, CustomBlock::new("test:counter"));
    }

    #[test]
    fn test_clone_is_deep() {
        let block = counter_type().create();
        let copy = block.clone();
        assert_eq!(block, copy);
    }

    #[test]
    fn test_registry_policy() {
        let mut registry = CustomBlockRegistry::new();
        registry.register(counter_type()).unwrap();
        registry.register(SimpleBlockType::new("test:counter")).unwrap();
        assert!(registry.create("test:counter").unwrap().entity.is_none());

        let mut strict = CustomBlockRegistry::with_policy(DuplicatePolicy::Reject);
        strict.register(counter_type()).unwrap();
        assert_eq!(
            strict.register(counter_type()).unwrap_err(),
            RegistryError::DuplicateKey {
                registry: "custom block",
                key: "test:counter".into()
            }
        );
        assert_eq!(strict.ids(), vec!["test:counter"]);
    }
}
