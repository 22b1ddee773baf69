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

//! Vanilla block data and the palette of known materials.

use crate::config::DuplicatePolicy;
use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[cfg(feature = "observability")]
use tracing::warn;

/// Namespace of built-in block ids.
pub const VANILLA_NAMESPACE: &str = "minecraft";

/// A single block state value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    /// A boolean state such as `lit`.
    Bool(bool),
    /// An integer state such as `power`.
    Int(i64),
    /// A named state such as `facing`.
    Name(String),
}

impl StateValue {
    /// Returns a short name for the kind of value.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            StateValue::Bool(_) => "bool",
            StateValue::Int(_) => "int",
            StateValue::Name(_) => "name",
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Bool(value) => write!(f, "{value}"),
            StateValue::Int(value) => write!(f, "{value}"),
            StateValue::Name(value) => f.write_str(value),
        }
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        StateValue::Bool(value)
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        StateValue::Int(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::Name(value.to_string())
    }
}

/// A built-in block: a material and its state values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockData {
    /// Material name without namespace, for example `furnace`.
    pub material: String,
    /// State values keyed by state name.
    pub states: BTreeMap<String, StateValue>,
}

impl BlockData {
    /// Creates block data without states.
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            states: BTreeMap::new(),
        }
    }

    /// Adds or replaces a state.
    #[must_use]
    pub fn with_state(mut self, name: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.states.insert(name.into(), value.into());
        self
    }

    /// Returns the namespaced id, `minecraft:<material>`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{VANILLA_NAMESPACE}:{}", self.material)
    }

    /// Returns a state value.
    #[must_use]
    pub fn state(&self, name: &str) -> Option<&StateValue> {
        self.states.get(name)
    }

    /// Replaces a state value, returning the previous one.
    pub fn set_state(&mut self, name: impl Into<String>, value: impl Into<StateValue>) -> Option<StateValue> {
        self.states.insert(name.into(), value.into())
    }
}

/// Known vanilla materials and their default states.
///
/// Decoding a vanilla id starts from the palette defaults and then applies the
/// stored states, so an id missing from the palette cannot be decoded.
#[derive(Debug, Clone, Default)]
pub struct VanillaPalette {
    policy: DuplicatePolicy,
    materials: BTreeMap<String, BlockData>,
}

impl VanillaPalette {
    /// Creates an empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty palette with an explicit duplicate policy.
    #[must_use]
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            materials: BTreeMap::new(),
        }
    }

    /// A palette with a handful of common materials.
    #[must_use]
    pub fn standard() -> Self {
        Self::new().with_standard_materials()
    }

    /// Adds a handful of common materials, replacing any with the same name.
    #[must_use]
    pub fn with_standard_materials(mut self) -> Self {
        let defaults = [
            BlockData::new("air"),
            BlockData::new("stone"),
            BlockData::new("dirt"),
            BlockData::new("oak_planks"),
            BlockData::new("oak_log").with_state("axis", "y"),
            BlockData::new("furnace")
                .with_state("facing", "north")
                .with_state("lit", false),
            BlockData::new("chest")
                .with_state("facing", "north")
                .with_state("waterlogged", false),
            BlockData::new("redstone_wire").with_state("power", 0_i64),
        ];
        for data in defaults {
            self.materials.insert(data.material.clone(), data);
        }
        self
    }

    /// Returns the duplicate policy.
    #[must_use]
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Registers a material with its default states.
    pub fn register(&mut self, defaults: BlockData) -> Result<(), RegistryError> {
        if self.materials.contains_key(&defaults.material) {
            if self.policy == DuplicatePolicy::Reject {
                return Err(RegistryError::DuplicateKey {
                    registry: "material",
                    key: defaults.material,
                });
            }
            #[cfg(feature = "observability")]
            warn!(material = %defaults.material, "Replacing vanilla material defaults");
        }
        self.materials.insert(defaults.material.clone(), defaults);
        Ok(())
    }

    /// Returns true if `material` is known.
    #[must_use]
    pub fn contains(&self, material: &str) -> bool {
        self.materials.contains_key(material)
    }

    /// Creates block data for `material` with its default states.
    #[must_use]
    pub fn create(&self, material: &str) -> Option<BlockData> {
        self.materials.get(material).cloned()
    }

    /// Returns the known materials, in sorted order.
    pub fn materials(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    /// Returns every state name used by any material.
    #[must_use]
    pub fn state_names(&self) -> BTreeSet<&str> {
        self.materials
            .values()
            .flat_map(|data| data.states.keys().map(String::as_str))
            .collect()
    }

    /// Returns the number of materials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns true if the palette is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
