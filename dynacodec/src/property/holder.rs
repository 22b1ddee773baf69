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

//! Types that own named properties.

use crate::codec::MapBuilder;
use crate::error::CodecError;
use crate::ops::{DynamicOps, ErasedNode, ErasedOpsRef};
use crate::property::DynProperty;

/// A type exposing named [`Property`] cells.
///
/// Names must be unique within one holder; they become map keys when saved.
/// Usually implemented with `#[derive(PropertyHolder)]`, which lists every
/// field of type `Property<_>` in declaration order.
///
/// [`Property`]: crate::property::Property
pub trait PropertyHolder {
    /// Returns every property with its name.
    fn properties(&self) -> Vec<(&'static str, &dyn DynProperty)>;

    /// Returns every property with its name, mutably.
    fn properties_mut(&mut self) -> Vec<(&'static str, &mut dyn DynProperty)>;
}

/// Saves every property of `holder` into a map node.
pub fn save_properties<O, H>(ops: &O, holder: &H) -> Result<O::Node, CodecError>
where
    O: DynamicOps,
    H: PropertyHolder + ?Sized,
{
    let mut out = MapBuilder::new(ops);
    write_properties(holder, &mut out)?;
    Ok(out.build())
}

/// Writes every property of `holder` into a map being built.
pub fn write_properties<O, H>(holder: &H, out: &mut MapBuilder<'_, O>) -> Result<(), CodecError>
where
    O: DynamicOps,
    H: PropertyHolder + ?Sized,
{
    let erased = ErasedOpsRef::new(out.ops());
    for (name, property) in holder.properties() {
        let node = property
            .encode_erased(&erased)
            .and_then(ErasedNode::downcast::<O::Node>)
            .map_err(|e| e.context(format!("failed to encode property '{name}'")))?;
        out.insert(name, node);
    }
    Ok(())
}

/// Loads the properties present in a map node into `holder`.
///
/// Properties without a key in `input` keep their current value. The first
/// property that fails to decode aborts the load; properties loaded before it
/// keep their new values.
pub fn load_properties<O, H>(ops: &O, input: &O::Node, holder: &mut H) -> Result<(), CodecError>
where
    O: DynamicOps,
    H: PropertyHolder + ?Sized,
{
    let map = ops
        .get_map(input)
        .map_err(|e| e.context("expected map of properties"))?;
    let erased = ErasedOpsRef::new(ops);
    for (name, property) in holder.properties_mut() {
        let Some(node) = ops.lookup(&map, name) else {
            continue;
        };
        property
            .decode_erased(&erased, &ErasedNode::new(node.clone()))
            .map_err(|e| e.context(format!("invalid value for property '{name}'")))?;
    }
    Ok(())
}
