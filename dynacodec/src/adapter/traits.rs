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

//! Adapter traits.

use crate::error::CodecError;
use crate::ops::{DynamicOps, ErasedNode, ErasedOpsRef};
use std::fmt;
use std::sync::Arc;

/// One candidate encoder/decoder for a key of an [`AdapterChain`].
///
/// [`AdapterChain`]: crate::adapter::AdapterChain
pub trait Adapter<T>: Send + Sync {
    /// Returns true if this adapter can handle `target`.
    fn applies_to(&self, target: &T) -> bool;

    /// Encodes this adapter's payload from `target`.
    fn save<O: DynamicOps>(&self, ops: &O, target: &T) -> Result<O::Node, CodecError>;

    /// Decodes this adapter's payload into `target`.
    ///
    /// On failure the chain restores `target` to its state before the call, so
    /// an implementation may write fields as it goes.
    fn load<O: DynamicOps>(&self, ops: &O, input: &O::Node, target: &mut T)
    -> Result<(), CodecError>;
}

/// Object-safe form of [`Adapter`], implemented for every adapter.
pub trait DynAdapter<T>: Send + Sync {
    /// See [`Adapter::applies_to`].
    fn applies_dyn(&self, target: &T) -> bool;

    /// See [`Adapter::save`].
    fn save_erased(&self, ops: &ErasedOpsRef<'_>, target: &T) -> Result<ErasedNode, CodecError>;

    /// See [`Adapter::load`].
    fn load_erased(
        &self,
        ops: &ErasedOpsRef<'_>,
        input: &ErasedNode,
        target: &mut T,
    ) -> Result<(), CodecError>;
}

impl<T, A: Adapter<T>> DynAdapter<T> for A {
    fn applies_dyn(&self, target: &T) -> bool {
        self.applies_to(target)
    }

    fn save_erased(&self, ops: &ErasedOpsRef<'_>, target: &T) -> Result<ErasedNode, CodecError> {
        self.save(ops, target)
    }

    fn load_erased(
        &self,
        ops: &ErasedOpsRef<'_>,
        input: &ErasedNode,
        target: &mut T,
    ) -> Result<(), CodecError> {
        self.load(ops, input, target)
    }
}

/// An ordered list of candidates for one key.
///
/// Order is significant: candidates are tried first to last.
pub struct AdapterList<T> {
    candidates: Vec<Arc<dyn DynAdapter<T>>>,
}

impl<T> AdapterList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }

    /// Appends a candidate.
    #[must_use]
    pub fn with<A: Adapter<T> + 'static>(mut self, adapter: A) -> Self
    where
        T: 'static,
    {
        self.candidates.push(Arc::new(adapter));
        self
    }

    /// Appends an already shared candidate.
    #[must_use]
    pub fn with_shared(mut self, adapter: Arc<dyn DynAdapter<T>>) -> Self {
        self.candidates.push(adapter);
        self
    }

    /// Returns the number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if the list has no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub(crate) fn into_shared(self) -> Arc<[Arc<dyn DynAdapter<T>>]> {
        self.candidates.into()
    }
}

impl<T> Default for AdapterList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for AdapterList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterList")
            .field("candidates", &self.candidates.len())
            .finish()
    }
}
