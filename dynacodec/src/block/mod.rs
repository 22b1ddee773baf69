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

//! The block model and the [`BlockInfo`] codec.
//!
//! Blocks come in two closed kinds, captured by [`BlockIdentity`]:
//!
//! - **vanilla** blocks: a material from the [`VanillaPalette`] plus state
//!   values, serialized through an [`AdapterChain`] of state adapters;
//! - **custom** blocks: an instance of an open [`CustomBlockRegistry`] entry,
//!   optionally carrying a [`BlockEntity`] made of properties.
//!
//! [`AdapterChain`]: crate::adapter::AdapterChain

mod custom;
mod data;
mod info;
mod pos;
mod states;

pub use custom::{
    BlockEntity, CustomBlock, CustomBlockRegistry, CustomBlockType, PROPERTIES_KEY,
    SimpleBlockType,
};
pub use data::{BlockData, StateValue, VANILLA_NAMESPACE, VanillaPalette};
pub use info::{BlockIdentity, BlockInfo, BlockInfoCodec, NBT_KEY, POS_KEY, STATES_ALIAS, STATES_KEY};
pub use pos::{BlockPos, BlockPosCodec};
pub use states::{BoolStateAdapter, IntStateAdapter, NameStateAdapter, default_state_adapters};
