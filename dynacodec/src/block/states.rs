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

//! Adapters that save and load vanilla block states.
//!
//! Each state name gets its own candidate list. The kind of the state already
//! present on the target decides which candidate applies, so the same key can
//! carry a boolean on one material and a name on another.

use crate::adapter::{Adapter, AdapterList};
use crate::block::{BlockData, StateValue};
use crate::error::CodecError;
use crate::ops::DynamicOps;

fn missing(state: &str) -> CodecError {
    CodecError::new(format!("block has no '{state}' state"))
}

/// Saves and loads a boolean state.
#[derive(Debug, Clone)]
pub struct BoolStateAdapter {
    state: String,
}

impl BoolStateAdapter {
    /// Creates an adapter for the state called `state`.
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
        }
    }
}

impl Adapter<BlockData> for BoolStateAdapter {
    fn applies_to(&self, target: &BlockData) -> bool {
        matches!(target.state(&self.state), Some(StateValue::Bool(_)))
    }

    fn save<O: DynamicOps>(&self, ops: &O, target: &BlockData) -> Result<O::Node, CodecError> {
        match target.state(&self.state) {
            Some(StateValue::Bool(value)) => Ok(ops.create_bool(*value)),
            _ => Err(missing(&self.state)),
        }
    }

    fn load<O: DynamicOps>(
        &self,
        ops: &O,
        input: &O::Node,
        target: &mut BlockData,
    ) -> Result<(), CodecError> {
        let value = ops.get_bool(input)?;
        target.set_state(self.state.as_str(), value);
        Ok(())
    }
}

/// Saves and loads an integer state within an inclusive range.
#[derive(Debug, Clone)]
pub struct IntStateAdapter {
    state: String,
    min: i64,
    max: i64,
}

impl IntStateAdapter {
    /// Creates an adapter accepting any integer.
    pub fn new(state: impl Into<String>) -> Self {
        Self::with_range(state, i64::MIN, i64::MAX)
    }

    /// Creates an adapter accepting values in `min..=max`.
    pub fn with_range(state: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            state: state.into(),
            min,
            max,
        }
    }

    fn check(&self, value: i64) -> Result<i64, CodecError> {
        if (self.min..=self.max).contains(&value) {
            Ok(value)
        } else {
            Err(CodecError::new(format!(
                "'{}' value {value} outside {}..={}",
                self.state, self.min, self.max
            )))
        }
    }
}

impl Adapter<BlockData> for IntStateAdapter {
    fn applies_to(&self, target: &BlockData) -> bool {
        matches!(target.state(&self.state), Some(StateValue::Int(_)))
    }

    fn save<O: DynamicOps>(&self, ops: &O, target: &BlockData) -> Result<O::Node, CodecError> {
        match target.state(&self.state) {
            Some(StateValue::Int(value)) => Ok(ops.create_int(self.check(*value)?)),
            _ => Err(missing(&self.state)),
        }
    }

    fn load<O: DynamicOps>(
        &self,
        ops: &O,
        input: &O::Node,
        target: &mut BlockData,
    ) -> Result<(), CodecError> {
        let value = self.check(ops.get_int(input)?)?;
        target.set_state(self.state.as_str(), value);
        Ok(())
    }
}

/// Saves and loads a named state, optionally restricted to a set of names.
#[derive(Debug, Clone)]
pub struct NameStateAdapter {
    state: String,
    allowed: Vec<String>,
}

impl NameStateAdapter {
    /// Creates an adapter accepting any name.
    pub fn new(state: impl Into<String>) -> Self {
        Self::with_allowed(state, Vec::<String>::new())
    }

    /// Creates an adapter accepting only the given names.
    pub fn with_allowed<I, S>(state: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: state.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    fn check<'v>(&self, value: &'v str) -> Result<&'v str, CodecError> {
        if self.allowed.is_empty() || self.allowed.iter().any(|allowed| allowed == value) {
            Ok(value)
        } else {
            Err(CodecError::new(format!(
                "'{value}' is not an allowed value for '{}'",
                self.state
            )))
        }
    }
}

impl Adapter<BlockData> for NameStateAdapter {
    fn applies_to(&self, target: &BlockData) -> bool {
        matches!(target.state(&self.state), Some(StateValue::Name(_)))
    }

    fn save<O: DynamicOps>(&self, ops: &O, target: &BlockData) -> Result<O::Node, CodecError> {
        match target.state(&self.state) {
            Some(StateValue::Name(value)) => Ok(ops.create_string(self.check(value)?)),
            _ => Err(missing(&self.state)),
        }
    }

    fn load<O: DynamicOps>(
        &self,
        ops: &O,
        input: &O::Node,
        target: &mut BlockData,
    ) -> Result<(), CodecError> {
        let value = ops.get_string_value(input)?;
        self.check(&value)?;
        target.set_state(self.state.as_str(), StateValue::Name(value));
        Ok(())
    }
}

/// The default candidates for one state name: boolean, integer, then name.
pub fn default_state_adapters(state: &str) -> AdapterList<BlockData> {
    AdapterList::new()
        .with(BoolStateAdapter::new(state))
        .with(IntStateAdapter::new(state))
        .with(NameStateAdapter::new(state))
}
