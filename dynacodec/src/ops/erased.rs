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

//! Type-erased ops and nodes.
//!
//! Codecs are generic over their ops, which makes them impossible to store as
//! trait objects. Open registries instead store codecs instantiated for
//! [`ErasedOpsRef`], a concrete ops type whose nodes are [`ErasedNode`]s, and
//! convert at the boundary:
//!
//! ```text
//! caller ops O ──ErasedOpsRef::new──▶ &dyn ErasedOps ──▶ stored codec
//!   O::Node    ◀──ErasedNode::downcast──  ErasedNode  ◀──┘
//! ```

use crate::error::CodecError;
use crate::ops::{DynamicOps, MapView, Opaque};
use std::any::Any;
use std::fmt;

#[cfg(feature = "observability")]
use tracing::warn;

trait AnyNode: Any {
    fn clone_node(&self) -> Box<dyn AnyNode>;
    fn eq_node(&self, other: &dyn AnyNode) -> bool;
    fn fmt_node(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<N: Clone + PartialEq + fmt::Debug + 'static> AnyNode for N {
    fn clone_node(&self) -> Box<dyn AnyNode> {
        Box::new(self.clone())
    }

    fn eq_node(&self, other: &dyn AnyNode) -> bool {
        other
            .as_any()
            .downcast_ref::<N>()
            .is_some_and(|other| self == other)
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A node of some concrete ops, with its type erased.
pub struct ErasedNode(Box<dyn AnyNode>);

impl ErasedNode {
    /// Erases a concrete node.
    pub fn new<N: Clone + PartialEq + fmt::Debug + 'static>(node: N) -> Self {
        Self(Box::new(node))
    }

    /// Recovers the concrete node.
    ///
    /// Fails if the node was produced by a different ops implementation.
    pub fn downcast<N: 'static>(self) -> Result<N, CodecError> {
        self.0
            .into_any()
            .downcast::<N>()
            .map(|node| *node)
            .map_err(|_| CodecError::new("node belongs to a different ops implementation"))
    }

    /// Borrows the concrete node.
    pub fn downcast_ref<N: 'static>(&self) -> Result<&N, CodecError> {
        self.0
            .as_any()
            .downcast_ref::<N>()
            .ok_or_else(|| CodecError::new("node belongs to a different ops implementation"))
    }
}

impl Clone for ErasedNode {
    fn clone(&self) -> Self {
        Self(self.0.clone_node())
    }
}

impl PartialEq for ErasedNode {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_node(other.0.as_ref())
    }
}

impl fmt::Debug for ErasedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_node(f)
    }
}

/// Object-safe mirror of [`DynamicOps`] over [`ErasedNode`]s.
///
/// Implemented for every [`DynamicOps`]; callers normally go through
/// [`ErasedOpsRef`] instead of using this trait directly.
pub trait ErasedOps {
    /// See [`DynamicOps::name`].
    fn erased_name(&self) -> &'static str;
    /// See [`DynamicOps::empty`].
    fn erased_empty(&self) -> ErasedNode;
    /// See [`DynamicOps::create_string`].
    fn erased_create_string(&self, value: &str) -> ErasedNode;
    /// See [`DynamicOps::create_int`].
    fn erased_create_int(&self, value: i64) -> ErasedNode;
    /// See [`DynamicOps::create_float`].
    fn erased_create_float(&self, value: f64) -> ErasedNode;
    /// See [`DynamicOps::create_bool`].
    fn erased_create_bool(&self, value: bool) -> ErasedNode;
    /// See [`DynamicOps::create_list`].
    fn erased_create_list(&self, elements: Vec<ErasedNode>) -> Result<ErasedNode, CodecError>;
    /// See [`DynamicOps::create_map`].
    fn erased_create_map(
        &self,
        entries: Vec<(ErasedNode, ErasedNode)>,
    ) -> Result<ErasedNode, CodecError>;
    /// See [`DynamicOps::create_opaque`].
    fn erased_create_opaque(&self, blob: &Opaque) -> Result<ErasedNode, CodecError>;
    /// See [`DynamicOps::get_string_value`].
    fn erased_get_string_value(&self, input: &ErasedNode) -> Result<String, CodecError>;
    /// See [`DynamicOps::get_int`].
    fn erased_get_int(&self, input: &ErasedNode) -> Result<i64, CodecError>;
    /// See [`DynamicOps::get_float`].
    fn erased_get_float(&self, input: &ErasedNode) -> Result<f64, CodecError>;
    /// See [`DynamicOps::get_bool`].
    fn erased_get_bool(&self, input: &ErasedNode) -> Result<bool, CodecError>;
    /// See [`DynamicOps::get_list`].
    fn erased_get_list(&self, input: &ErasedNode) -> Result<Vec<ErasedNode>, CodecError>;
    /// See [`DynamicOps::get_map`].
    fn erased_get_map(&self, input: &ErasedNode) -> Result<MapView<ErasedNode>, CodecError>;
    /// See [`DynamicOps::get_opaque`].
    fn erased_get_opaque(&self, input: &ErasedNode) -> Result<Opaque, CodecError>;
}

impl<O: DynamicOps + ?Sized> ErasedOps for O {
    fn erased_name(&self) -> &'static str {
        self.name()
    }

    fn erased_empty(&self) -> ErasedNode {
        ErasedNode::new(self.empty())
    }

    fn erased_create_string(&self, value: &str) -> ErasedNode {
        ErasedNode::new(self.create_string(value))
    }

    fn erased_create_int(&self, value: i64) -> ErasedNode {
        ErasedNode::new(self.create_int(value))
    }

    fn erased_create_float(&self, value: f64) -> ErasedNode {
        ErasedNode::new(self.create_float(value))
    }

    fn erased_create_bool(&self, value: bool) -> ErasedNode {
        ErasedNode::new(self.create_bool(value))
    }

    fn erased_create_list(&self, elements: Vec<ErasedNode>) -> Result<ErasedNode, CodecError> {
        let elements = elements
            .into_iter()
            .map(ErasedNode::downcast::<O::Node>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ErasedNode::new(self.create_list(elements)))
    }

    fn erased_create_map(
        &self,
        entries: Vec<(ErasedNode, ErasedNode)>,
    ) -> Result<ErasedNode, CodecError> {
        let entries = unerase_entries::<O::Node>(entries)?;
        Ok(ErasedNode::new(self.create_map(entries)))
    }

    fn erased_create_opaque(&self, blob: &Opaque) -> Result<ErasedNode, CodecError> {
        self.create_opaque(blob).map(ErasedNode::new)
    }

    fn erased_get_string_value(&self, input: &ErasedNode) -> Result<String, CodecError> {
        self.get_string_value(input.downcast_ref::<O::Node>()?)
    }

    fn erased_get_int(&self, input: &ErasedNode) -> Result<i64, CodecError> {
        self.get_int(input.downcast_ref::<O::Node>()?)
    }

    fn erased_get_float(&self, input: &ErasedNode) -> Result<f64, CodecError> {
        self.get_float(input.downcast_ref::<O::Node>()?)
    }

    fn erased_get_bool(&self, input: &ErasedNode) -> Result<bool, CodecError> {
        self.get_bool(input.downcast_ref::<O::Node>()?)
    }

    fn erased_get_list(&self, input: &ErasedNode) -> Result<Vec<ErasedNode>, CodecError> {
        let elements = self.get_list(input.downcast_ref::<O::Node>()?)?;
        Ok(elements.into_iter().map(ErasedNode::new).collect())
    }

    fn erased_get_map(&self, input: &ErasedNode) -> Result<MapView<ErasedNode>, CodecError> {
        let map = self.get_map(input.downcast_ref::<O::Node>()?)?;
        Ok(erase_map(map))
    }

    fn erased_get_opaque(&self, input: &ErasedNode) -> Result<Opaque, CodecError> {
        self.get_opaque(input.downcast_ref::<O::Node>()?)
    }
}

/// A concrete, copyable ops type over any erased ops.
///
/// # Examples
///
/// ```rust
/// use dynacodec::ops::{DynamicOps, ErasedOpsRef, JsonOps};
/// use serde_json::json;
///
/// let erased = ErasedOpsRef::new(&JsonOps);
/// let node = erased.create_string("stone");
/// assert_eq!(node.downcast::<serde_json::Value>().unwrap(), json!("stone"));
/// ```
#[derive(Clone, Copy)]
pub struct ErasedOpsRef<'a> {
    inner: &'a dyn ErasedOps,
}

impl<'a> ErasedOpsRef<'a> {
    /// Erases a concrete ops.
    pub fn new<O: DynamicOps>(ops: &'a O) -> Self {
        Self { inner: ops }
    }

    /// Converts a map gathered with erased nodes back into a map node of `O`.
    ///
    /// `ops` must be the ops this view was created from.
    pub fn finish_map<O: DynamicOps>(
        ops: &O,
        map: MapView<ErasedNode>,
    ) -> Result<O::Node, CodecError> {
        Ok(ops.create_map(unerase_entries::<O::Node>(map.into_entries())?))
    }
}

impl fmt::Debug for ErasedOpsRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedOpsRef")
            .field("ops", &self.inner.erased_name())
            .finish()
    }
}

impl DynamicOps for ErasedOpsRef<'_> {
    type Node = ErasedNode;

    fn name(&self) -> &'static str {
        self.inner.erased_name()
    }

    fn empty(&self) -> ErasedNode {
        self.inner.erased_empty()
    }

    fn create_string(&self, value: &str) -> ErasedNode {
        self.inner.erased_create_string(value)
    }

    fn create_int(&self, value: i64) -> ErasedNode {
        self.inner.erased_create_int(value)
    }

    fn create_float(&self, value: f64) -> ErasedNode {
        self.inner.erased_create_float(value)
    }

    fn create_bool(&self, value: bool) -> ErasedNode {
        self.inner.erased_create_bool(value)
    }

    // A node from a different ops cannot be downcast; it is logged and the
    // whole collection collapses to the empty node.
    fn create_list(&self, elements: Vec<ErasedNode>) -> ErasedNode {
        self.inner
            .erased_create_list(elements)
            .unwrap_or_else(|_error| {
                #[cfg(feature = "observability")]
                warn!(error = %_error, "Foreign node in erased list, writing empty node");
                self.empty()
            })
    }

    fn create_map(&self, entries: Vec<(ErasedNode, ErasedNode)>) -> ErasedNode {
        self.inner
            .erased_create_map(entries)
            .unwrap_or_else(|_error| {
                #[cfg(feature = "observability")]
                warn!(error = %_error, "Foreign node in erased map, writing empty node");
                self.empty()
            })
    }

    fn create_opaque(&self, blob: &Opaque) -> Result<ErasedNode, CodecError> {
        self.inner.erased_create_opaque(blob)
    }

    fn get_string_value(&self, input: &ErasedNode) -> Result<String, CodecError> {
        self.inner.erased_get_string_value(input)
    }

    fn get_int(&self, input: &ErasedNode) -> Result<i64, CodecError> {
        self.inner.erased_get_int(input)
    }

    fn get_float(&self, input: &ErasedNode) -> Result<f64, CodecError> {
        self.inner.erased_get_float(input)
    }

    fn get_bool(&self, input: &ErasedNode) -> Result<bool, CodecError> {
        self.inner.erased_get_bool(input)
    }

    fn get_list(&self, input: &ErasedNode) -> Result<Vec<ErasedNode>, CodecError> {
        self.inner.erased_get_list(input)
    }

    fn get_map(&self, input: &ErasedNode) -> Result<MapView<ErasedNode>, CodecError> {
        self.inner.erased_get_map(input)
    }

    fn get_opaque(&self, input: &ErasedNode) -> Result<Opaque, CodecError> {
        self.inner.erased_get_opaque(input)
    }
}

/// Erases every key and value of a concrete map view.
pub(crate) fn erase_map<N: Clone + PartialEq + fmt::Debug + 'static>(
    map: MapView<N>,
) -> MapView<ErasedNode> {
    map.into_iter()
        .map(|(key, value)| (ErasedNode::new(key), ErasedNode::new(value)))
        .collect()
}

fn unerase_entries<N: 'static>(
    entries: Vec<(ErasedNode, ErasedNode)>,
) -> Result<Vec<(N, N)>, CodecError> {
    entries
        .into_iter()
        .map(|(key, value)| Ok((key.downcast::<N>()?, value.downcast::<N>()?)))
        .collect()
}
