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

//! Tree operations for format-agnostic codecs.
//!
//! A [`DynamicOps`] implementation knows how to build and inspect one physical
//! tree representation. It is the only place format-specific logic lives:
//! codecs never touch a node directly, they ask the ops.
//!
//! # Implementations
//!
//! - [`JsonOps`]: trees of [`serde_json::Value`]
//! - [`ValueOps`]: trees of the crate's own [`Value`], which can hold an
//!   [`Opaque`] blob as a dedicated variant
//! - [`ErasedOpsRef`]: a type-erased view over any other ops, used by open
//!   registries that must store object-safe codecs
//!
//! # Opaque sub-trees
//!
//! Some payloads must survive a round trip exactly as received without any
//! codec interpreting them. [`DynamicOps::get_opaque`] captures a sub-tree as an
//! [`Opaque`] snapshot and [`DynamicOps::create_opaque`] materializes it again.
//!
//! # Examples
//!
//! ```rust
//! use dynacodec::ops::{DynamicOps, JsonOps};
//!
//! let ops = JsonOps;
//! let node = ops.create_map(vec![(ops.create_string("id"), ops.create_string("stone"))]);
//! let map = ops.get_map(&node).unwrap();
//! let id = ops.lookup(&map, "id").unwrap();
//! assert_eq!(ops.get_string_value(id).unwrap(), "stone");
//! ```

mod erased;
mod json;
mod map;
mod opaque;
mod traits;
mod value;

pub(crate) use erased::erase_map;
pub use erased::{ErasedNode, ErasedOps, ErasedOpsRef};
pub use json::JsonOps;
pub use map::MapView;
pub use opaque::Opaque;
pub use traits::DynamicOps;
pub use value::{Value, ValueOps};
