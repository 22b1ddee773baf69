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

//! The [`DynamicOps`] trait.

use crate::error::CodecError;
use crate::ops::{MapView, Opaque};
use std::fmt;

/// Builds and inspects nodes of one tree representation.
///
/// Operations are pure functions of their input. An implementation never keeps
/// references to nodes it produced, so it may be a stateless unit struct shared
/// by any number of callers.
///
/// Readers fail with a [`CodecError`] when a node has the wrong shape. There is
/// no implicit coercion between shapes, except that [`get_float`] accepts
/// integer nodes.
///
/// The trait is object safe; see [`ErasedOps`] for the type-erased form used by
/// registries.
///
/// [`get_float`]: DynamicOps::get_float
/// [`ErasedOps`]: crate::ops::ErasedOps
pub trait DynamicOps {
    /// The node type of this tree representation.
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// Returns a short, stable name for this representation.
    fn name(&self) -> &'static str;

    /// Returns the node used for "no value".
    fn empty(&self) -> Self::Node;

    /// Creates a string node.
    fn create_string(&self, value: &str) -> Self::Node;

    /// Creates an integer node.
    fn create_int(&self, value: i64) -> Self::Node;

    /// Creates a floating point node.
    fn create_float(&self, value: f64) -> Self::Node;

    /// Creates a boolean node.
    fn create_bool(&self, value: bool) -> Self::Node;

    /// Creates a list node from its elements.
    fn create_list(&self, elements: Vec<Self::Node>) -> Self::Node;

    /// Creates a map node from ordered key/value pairs.
    ///
    /// When a key appears twice the later value wins.
    fn create_map(&self, entries: Vec<(Self::Node, Self::Node)>) -> Self::Node;

    /// Materializes an opaque snapshot as a node of this representation.
    fn create_opaque(&self, blob: &Opaque) -> Result<Self::Node, CodecError>;

    /// Reads a string node.
    fn get_string_value(&self, input: &Self::Node) -> Result<String, CodecError>;

    /// Reads an integer node.
    fn get_int(&self, input: &Self::Node) -> Result<i64, CodecError>;

    /// Reads a numeric node as a float.
    fn get_float(&self, input: &Self::Node) -> Result<f64, CodecError>;

    /// Reads a boolean node.
    fn get_bool(&self, input: &Self::Node) -> Result<bool, CodecError>;

    /// Reads a list node.
    fn get_list(&self, input: &Self::Node) -> Result<Vec<Self::Node>, CodecError>;

    /// Reads a map node into its ordered key/value pairs.
    fn get_map(&self, input: &Self::Node) -> Result<MapView<Self::Node>, CodecError>;

    /// Captures any node as an opaque snapshot without interpreting it.
    fn get_opaque(&self, input: &Self::Node) -> Result<Opaque, CodecError>;

    /// Returns true if `input` is the empty node.
    fn is_empty(&self, input: &Self::Node) -> bool {
        *input == self.empty()
    }

    /// Looks up the value stored under a literal string key.
    fn lookup<'m>(&self, map: &'m MapView<Self::Node>, key: &str) -> Option<&'m Self::Node> {
        map.get(&self.create_string(key))
    }

    /// Like [`lookup`](DynamicOps::lookup) but fails when the key is absent.
    fn require<'m>(
        &self,
        map: &'m MapView<Self::Node>,
        key: &str,
    ) -> Result<&'m Self::Node, CodecError> {
        self.lookup(map, key)
            .ok_or_else(|| CodecError::missing_key(key))
    }
}
