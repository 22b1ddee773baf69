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

//! Bound properties: mutable value cells that carry their own codec.
//!
//! A [`Property`] owns a current value, the default it was created with and
//! the [`Codec`] used to serialize it. Types that own several properties
//! implement [`PropertyHolder`], usually through `#[derive(PropertyHolder)]`,
//! and are saved and loaded with [`save_properties`] and [`load_properties`].
//!
//! # Examples
//!
//! ```rust
//! use dynacodec::codec::primitives::{IntCodec, StringCodec};
//! use dynacodec::ops::JsonOps;
//! use dynacodec::property::{Property, PropertyHolder, load_properties, save_properties};
//! use serde_json::json;
//!
//! #[derive(PropertyHolder)]
//! struct Furnace {
//!     fuel: Property<i32>,
//!     #[property(rename = "custom_name")]
//!     name: Property<String>,
//! }
//!
//! let mut furnace = Furnace {
//!     fuel: Property::new(IntCodec, 0),
//!     name: Property::new(StringCodec, String::new()),
//! };
//! furnace.fuel.set(8);
//!
//! let saved = save_properties(&JsonOps, &furnace).unwrap();
//! assert_eq!(saved, json!({"fuel": 8, "custom_name": ""}));
//!
//! load_properties(&JsonOps, &json!({"fuel": 3}), &mut furnace).unwrap();
//! assert_eq!(*furnace.fuel.get(), 3);
//! ```
//!
//! [`Codec`]: crate::codec::Codec

mod cell;
mod holder;

pub use cell::{DynProperty, Property};
pub use holder::{PropertyHolder, load_properties, save_properties, write_properties};

#[cfg(feature = "derive")]
pub use dynacodec_macros::PropertyHolder;
