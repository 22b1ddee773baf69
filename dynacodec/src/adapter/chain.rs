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

//! The adapter chain dispatcher.

use crate::adapter::{AdapterList, DynAdapter};
use crate::codec::MapBuilder;
use crate::config::DuplicatePolicy;
use crate::error::{CodecError, RegistryError};
use crate::ops::{DynamicOps, ErasedNode, ErasedOpsRef, MapView};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "observability")]
use tracing::{debug, trace, warn};

type Candidates<T> = Arc<[Arc<dyn DynAdapter<T>>]>;

/// Keys mapped to ordered lists of adapter candidates.
///
/// Keys are visited in sorted order on save, so output is deterministic.
///
/// # Duplicate keys
///
/// Registering a key again replaces its whole candidate list; lists are never
/// merged. The replacement is logged as a warning. Under
/// [`DuplicatePolicy::Reject`], or through [`try_register`](Self::try_register),
/// a duplicate key fails instead.
pub struct AdapterChain<T> {
    name: &'static str,
    policy: DuplicatePolicy,
    chains: BTreeMap<String, Candidates<T>>,
}

impl<T> AdapterChain<T> {
    /// Creates an empty chain; `name` appears in errors and logs.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self::with_policy(name, DuplicatePolicy::default())
    }

    /// Creates an empty chain with an explicit duplicate policy.
    #[must_use]
    pub fn with_policy(name: &'static str, policy: DuplicatePolicy) -> Self {
        Self {
            name,
            policy,
            chains: BTreeMap::new(),
        }
    }

    /// Registers the candidates for `key`, replacing any previous list.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        candidates: AdapterList<T>,
    ) -> Result<(), RegistryError> {
        let policy = self.policy;
        self.insert(key.into(), candidates, policy)
    }

    /// Like [`register`](Self::register), but fails if `key` already exists.
    pub fn try_register(
        &mut self,
        key: impl Into<String>,
        candidates: AdapterList<T>,
    ) -> Result<(), RegistryError> {
        self.insert(key.into(), candidates, DuplicatePolicy::Reject)
    }

    fn insert(
        &mut self,
        key: String,
        candidates: AdapterList<T>,
        policy: DuplicatePolicy,
    ) -> Result<(), RegistryError> {
        if self.chains.contains_key(&key) && policy == DuplicatePolicy::Reject {
            return Err(RegistryError::DuplicateKey {
                registry: self.name,
                key,
            });
        }
        let candidates = candidates.into_shared();
        #[cfg(feature = "observability")]
        let count = candidates.len();
        if let Some(previous) = self.chains.insert(key.clone(), candidates) {
            #[cfg(feature = "observability")]
            warn!(
                chain = self.name,
                key = %key,
                previous = previous.len(),
                replacement = count,
                "Replacing adapter candidates"
            );
            drop(previous);
        }
        Ok(())
    }

    /// Returns true if `key` has candidates.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.chains.contains_key(key)
    }

    /// Returns the registered keys, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }

    /// Returns the number of candidates registered for `key`.
    #[must_use]
    pub fn candidates(&self, key: &str) -> usize {
        self.chains.get(key).map_or(0, |candidates| candidates.len())
    }

    /// Returns the number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns true if no key is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Saves every key some candidate can handle into a map node.
    pub fn save<O: DynamicOps>(&self, ops: &O, target: &T) -> O::Node {
        let mut out = MapBuilder::new(ops);
        self.save_into(ops, target, &mut out);
        out.build()
    }

    /// Like [`save`](Self::save), but writes into an existing map.
    #[cfg_attr(not(feature = "observability"), allow(unused_variables))]
    pub fn save_into<O: DynamicOps>(&self, ops: &O, target: &T, out: &mut MapBuilder<'_, O>) {
        let erased = ErasedOpsRef::new(ops);
        for (key, candidates) in &self.chains {
            for (index, candidate) in candidates.iter().enumerate() {
                if !candidate.applies_dyn(target) {
                    #[cfg(feature = "observability")]
                    trace!(chain = self.name, key = %key, index, "Adapter does not apply");
                    continue;
                }
                let saved = candidate
                    .save_erased(&erased, target)
                    .and_then(ErasedNode::downcast::<O::Node>);
                match saved {
                    Ok(node) => {
                        out.insert(key, node);
                        break;
                    }
                    Err(error) => {
                        #[cfg(feature = "observability")]
                        debug!(chain = self.name, key = %key, index, %error, "Adapter failed to save");
                    }
                }
            }
        }
    }

    /// Loads every known key of a map node into `target`.
    ///
    /// Fails only if `input` is not a map; per-key failures are dropped.
    pub fn load<O: DynamicOps>(
        &self,
        ops: &O,
        input: &O::Node,
        target: &mut T,
    ) -> Result<(), CodecError>
    where
        T: Clone,
    {
        let map = ops
            .get_map(input)
            .map_err(|e| e.context(format!("expected map for {} adapters", self.name)))?;
        self.load_entries(ops, &map, target);
        Ok(())
    }

    /// Loads every known key of already-read entries into `target`.
    ///
    /// A candidate that fails leaves `target` exactly as it was before that
    /// candidate ran.
    #[cfg_attr(not(feature = "observability"), allow(unused_variables))]
    pub fn load_entries<O: DynamicOps>(&self, ops: &O, map: &MapView<O::Node>, target: &mut T)
    where
        T: Clone,
    {
        let erased = ErasedOpsRef::new(ops);
        for (key_node, value) in map {
            let Ok(key) = ops.get_string_value(key_node) else {
                continue;
            };
            let Some(candidates) = self.chains.get(&key) else {
                #[cfg(feature = "observability")]
                trace!(chain = self.name, key = %key, "No adapters for key");
                continue;
            };
            let value = ErasedNode::new(value.clone());
            for (index, candidate) in candidates.iter().enumerate() {
                if !candidate.applies_dyn(target) {
                    continue;
                }
                let snapshot = target.clone();
                match candidate.load_erased(&erased, &value, target) {
                    Ok(()) => break,
                    Err(error) => {
                        *target = snapshot;
                        #[cfg(feature = "observability")]
                        debug!(chain = self.name, key = %key, index, %error, "Adapter failed to load");
                    }
                }
            }
        }
    }
}

impl<T> fmt::Debug for AdapterChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: BTreeMap<&str, usize> = self
            .chains
            .iter()
            .map(|(key, candidates)| (key.as_str(), candidates.len()))
            .collect();
        f.debug_struct("AdapterChain")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("keys", &keys)
            .finish()
    }
}
