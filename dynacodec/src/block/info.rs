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

//! [`BlockInfo`] and its codec.

use crate::adapter::AdapterChain;
use crate::block::{
    BlockData, BlockPos, BlockPosCodec, CustomBlock, CustomBlockRegistry, VANILLA_NAMESPACE,
    VanillaPalette,
};
use crate::codec::primitives::StringCodec;
use crate::codec::{Codec, MapBuilder, MapReader};
use crate::error::CodecError;
use crate::ops::{DynamicOps, ErasedOpsRef, Opaque, erase_map};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "observability")]
use tracing::trace;

/// Key of the vanilla state map.
pub const STATES_KEY: &str = "states";
/// Alternate key accepted for the vanilla state map on decode.
pub const STATES_ALIAS: &str = "properties";
/// Key of the opaque pass-through sub-tree.
pub const NBT_KEY: &str = "nbt";
/// Key of the block position.
pub const POS_KEY: &str = "pos";

/// What a block is: a built-in material or a registered custom type.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockIdentity {
    /// A built-in block.
    Vanilla(BlockData),
    /// A block of a registered custom type.
    Custom(CustomBlock),
}

impl BlockIdentity {
    /// Returns the id written under the block id key.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            BlockIdentity::Vanilla(data) => data.id(),
            BlockIdentity::Custom(block) => block.id.clone(),
        }
    }

    /// Returns true for built-in blocks.
    #[must_use]
    pub fn is_vanilla(&self) -> bool {
        matches!(self, BlockIdentity::Vanilla(_))
    }
}

impl From<BlockData> for BlockIdentity {
    fn from(data: BlockData) -> Self {
        BlockIdentity::Vanilla(data)
    }
}

impl From<CustomBlock> for BlockIdentity {
    fn from(block: CustomBlock) -> Self {
        BlockIdentity::Custom(block)
    }
}

/// One block of a structure.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockInfo {
    /// Position relative to the structure origin.
    pub pos: BlockPos,
    /// The block itself.
    pub block: BlockIdentity,
    /// Free-form data carried through unchanged.
    pub nbt: Option<Opaque>,
}

impl BlockInfo {
    /// Creates block info without extra data.
    pub fn new(pos: BlockPos, block: impl Into<BlockIdentity>) -> Self {
        Self {
            pos,
            block: block.into(),
            nbt: None,
        }
    }

    /// Attaches an opaque sub-tree.
    #[must_use]
    pub fn with_nbt(mut self, nbt: Opaque) -> Self {
        self.nbt = Some(nbt);
        self
    }

    /// Returns the block id.
    #[must_use]
    pub fn id(&self) -> String {
        self.block.id()
    }
}

/// Codec for [`BlockInfo`].
///
/// The id key decides the branch. Ids in the `minecraft` namespace are looked
/// up in the [`VanillaPalette`] and their states go through the state adapter
/// chain under `"states"` (`"properties"` is accepted on decode). Any other id
/// must name a registered custom block type, which reads and writes its own
/// keys in the same map. An `"nbt"` entry is carried through as an [`Opaque`]
/// blob in both branches.
///
/// Encoding fails when decoding the output could not give back the same
/// block: a material missing from the palette, a state with no adapters, or a
/// custom type writing the id, `"pos"` or `"nbt"` key.
#[derive(Clone)]
pub struct BlockInfoCodec {
    palette: Arc<VanillaPalette>,
    custom: Arc<CustomBlockRegistry>,
    states: Arc<AdapterChain<BlockData>>,
    id_key: String,
}

impl BlockInfoCodec {
    /// Creates a codec over the given registries.
    pub fn new(
        palette: Arc<VanillaPalette>,
        custom: Arc<CustomBlockRegistry>,
        states: Arc<AdapterChain<BlockData>>,
        id_key: impl Into<String>,
    ) -> Self {
        Self {
            palette,
            custom,
            states,
            id_key: id_key.into(),
        }
    }

    /// Returns the block id key.
    #[must_use]
    pub fn id_key(&self) -> &str {
        &self.id_key
    }

    fn unknown(&self, id: &str) -> CodecError {
        CodecError::new(format!("unknown {}: {id}", self.id_key))
    }

    // Keys owned by the block map itself; block payloads may not write them.
    fn is_reserved(&self, key: &str) -> bool {
        key == self.id_key || key == POS_KEY || key == NBT_KEY
    }

    fn encode_block(
        &self,
        block: &BlockIdentity,
        out: &mut MapBuilder<'_, ErasedOpsRef<'_>>,
    ) -> Result<(), CodecError> {
        let ops = *out.ops();
        match block {
            BlockIdentity::Vanilla(data) => {
                if !self.palette.contains(&data.material) {
                    return Err(self.unknown(&data.id()));
                }
                let uncovered = data.states.keys().find(|state| !self.states.contains(state));
                if let Some(state) = uncovered {
                    return Err(CodecError::new(format!(
                        "no adapters for state '{state}' of {}",
                        data.id()
                    )));
                }
                let mut states = MapBuilder::new(&ops);
                self.states.save_into(&ops, data, &mut states);
                if !states.is_empty() {
                    out.insert(STATES_KEY, states.build());
                }
            }
            BlockIdentity::Custom(block) => {
                let block_type = self.custom.get(&block.id).ok_or_else(|| self.unknown(&block.id))?;
                block_type
                    .encode_extra(block, out)
                    .map_err(|e| e.context(format!("failed to encode {}", block.id)))?;
            }
        }
        Ok(())
    }

    fn decode_block(
        &self,
        id: &str,
        input: &MapReader<'_, ErasedOpsRef<'_>>,
    ) -> Result<BlockIdentity, CodecError> {
        let vanilla = id
            .strip_prefix(VANILLA_NAMESPACE)
            .and_then(|rest| rest.strip_prefix(':'));
        if let Some(material) = vanilla {
            let mut data = self.palette.create(material).ok_or_else(|| self.unknown(id))?;
            if let Some(states) = input.get(STATES_KEY).or_else(|| input.get(STATES_ALIAS)) {
                self.states
                    .load(input.ops(), states, &mut data)
                    .map_err(|e| e.context(format!("invalid states for {id}")))?;
            }
            return Ok(BlockIdentity::Vanilla(data));
        }

        let block_type = self.custom.get(id).ok_or_else(|| self.unknown(id))?;
        let mut block = block_type.create();
        block_type.decode_extra(&mut block, input)?;
        Ok(BlockIdentity::Custom(block))
    }
}

impl fmt::Debug for BlockInfoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockInfoCodec")
            .field("id_key", &self.id_key)
            .field("materials", &self.palette.len())
            .field("custom", &self.custom.len())
            .field("states", &self.states.len())
            .finish()
    }
}

impl Codec<BlockInfo> for BlockInfoCodec {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &BlockInfo) -> Result<O::Node, CodecError> {
        let id = value.id();

        #[cfg(feature = "observability")]
        trace!(id = %id, pos = %value.pos, "Encoding block");

        let erased = ErasedOpsRef::new(ops);
        let mut extra = MapBuilder::new(&erased);
        self.encode_block(&value.block, &mut extra)?;

        let mut out = MapBuilder::new(&erased);
        out.insert(&self.id_key, erased.create_string(&id));
        out.field(POS_KEY, &BlockPosCodec, &value.pos)?;
        for (key, node) in extra.into_view() {
            let reserved = erased
                .get_string_value(&key)
                .ok()
                .filter(|name| self.is_reserved(name));
            if let Some(name) = reserved {
                return Err(CodecError::new(format!("{id} wrote reserved key '{name}'")));
            }
            out.insert_node(key, node);
        }
        if let Some(nbt) = &value.nbt {
            out.insert(NBT_KEY, erased.create_opaque(nbt)?);
        }
        ErasedOpsRef::finish_map(ops, out.into_view())
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<BlockInfo, CodecError> {
        let map = ops
            .get_map(input)
            .map_err(|e| e.context("expected map for block"))?;
        let erased = ErasedOpsRef::new(ops);
        let reader = MapReader::from_view(&erased, erase_map(map));

        let id = reader.required(&self.id_key, &StringCodec)?;
        let pos = reader.optional_or(POS_KEY, &BlockPosCodec, BlockPos::ORIGIN)?;
        let block = self.decode_block(&id, &reader)?;
        let nbt = match reader.get(NBT_KEY) {
            Some(node) if !erased.is_empty(node) => Some(
                erased
                    .get_opaque(node)
                    .map_err(|e| e.context(format!("invalid {NBT_KEY} for {id}")))?,
            ),
            _ => None,
        };

        #[cfg(feature = "observability")]
        trace!(id = %id, pos = %pos, "Decoded block");

        Ok(BlockInfo { pos, block, nbt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{CustomBlockType, StateValue, default_state_adapters};
    use crate::ops::{JsonOps, Value, ValueOps};
    use serde_json::json;

    /// Custom type that writes another block's id into its own map.
    struct Impostor;

    impl CustomBlockType for Impostor {
        fn id(&self) -> &str {
            "test:impostor"
        }

        fn create(&self) -> CustomBlock {
            CustomBlock::new("test:impostor")
        }

        fn encode_extra(
            &self,
            _block: &CustomBlock,
            out: &mut MapBuilder<'_, ErasedOpsRef<'_>>,
        ) -> Result<(), CodecError> {
            let id = out.ops().create_string("minecraft:stone");
            out.insert("id", id);
            Ok(())
        }
    }

    fn codec() -> BlockInfoCodec {
        let palette = VanillaPalette::standard();
        let mut states = AdapterChain::new("state");
        for name in palette.state_names() {
            states.register(name, default_state_adapters(name)).unwrap();
        }
        BlockInfoCodec::new(
            Arc::new(palette),
            Arc::new(CustomBlockRegistry::new()),
            Arc::new(states),
            "id",
        )
    }

    #[test]
    fn test_vanilla_encode_shape() {
        let info = BlockInfo::new(
            BlockPos::new(1, 0, 2),
            BlockData::new("furnace")
                .with_state("facing", "east")
                .with_state("lit", true),
        );
        assert_eq!(
            codec().encode(&JsonOps, &info).unwrap(),
            json!({
                "id": "minecraft:furnace",
                "pos": [1, 0, 2],
                "states": {"facing": "east", "lit": true}
            })
        );
    }

    #[test]
    fn test_stateless_block_has_no_states_key() {
        let info = BlockInfo::new(BlockPos::ORIGIN, BlockData::new("stone"));
        let node = codec().encode(&JsonOps, &info).unwrap();
        assert!(node.get("states").is_none());
    }

    #[test]
    fn test_properties_alias_and_default_pos() {
        let info = codec()
            .decode(
                &JsonOps,
                &json!({"id": "minecraft:oak_log", "properties": {"axis": "x"}}),
            )
            .unwrap();
        assert_eq!(info.pos, BlockPos::ORIGIN);
        let BlockIdentity::Vanilla(data) = info.block else {
            panic!("expected vanilla block");
        };
        assert_eq!(data.state("axis"), Some(&StateValue::from("x")));
    }

    #[test]
    fn test_unknown_ids_fail() {
        let error = codec()
            .decode(&JsonOps, &json!({"id": "minecraft:bedrock"}))
            .unwrap_err();
        assert_eq!(error.message(), "unknown id: minecraft:bedrock");
        let error = codec()
            .decode(&JsonOps, &json!({"id": "test:machine"}))
            .unwrap_err();
        assert_eq!(error.message(), "unknown id: test:machine");
    }

    #[test]
    fn test_missing_id_fails() {
        assert!(codec().decode(&JsonOps, &json!({"pos": [0, 0, 0]})).is_err());
    }

    #[test]
    fn test_nbt_round_trip_through_value_ops() {
        let nbt =
            Opaque::from_slice(br#"{"Items":[{"Slot":0,"id":"minecraft:coal","count":3}]}"#)
                .unwrap();
        let chest = BlockData::new("chest")
            .with_state("facing", "south")
            .with_state("waterlogged", false);
        let info = BlockInfo::new(BlockPos::new(0, 1, 0), chest).with_nbt(nbt.clone());
        let node = codec().encode(&ValueOps, &info).unwrap();
        let map = ValueOps.get_map(&node).unwrap();
        assert!(matches!(map.get(&Value::from("nbt")), Some(Value::Opaque(_))));

        let decoded = codec().decode(&ValueOps, &node).unwrap();
        assert_eq!(decoded, info);
        assert_eq!(decoded.nbt.unwrap().as_bytes(), nbt.as_bytes());
    }

    #[test]
    fn test_encode_rejects_unknown_material() {
        let info = BlockInfo::new(BlockPos::ORIGIN, BlockData::new("bedrock"));
        let error = codec().encode(&JsonOps, &info).unwrap_err();
        assert_eq!(error.message(), "unknown id: minecraft:bedrock");
    }

    #[test]
    fn test_encode_rejects_state_without_adapters() {
        let info = BlockInfo::new(
            BlockPos::ORIGIN,
            BlockData::new("stone").with_state("smooth", true),
        );
        let error = codec().encode(&JsonOps, &info).unwrap_err();
        assert!(error.mentions("no adapters for state 'smooth' of minecraft:stone"));
    }

    #[test]
    fn test_custom_type_cannot_overwrite_reserved_keys() {
        let mut custom = CustomBlockRegistry::new();
        custom.register(Impostor).unwrap();
        let codec = BlockInfoCodec::new(
            Arc::new(VanillaPalette::standard()),
            Arc::new(custom),
            Arc::new(AdapterChain::new("state")),
            "id",
        );

        let info = BlockInfo::new(BlockPos::ORIGIN, CustomBlock::new("test:impostor"));
        let error = codec.encode(&JsonOps, &info).unwrap_err();
        assert!(error.mentions("wrote reserved key 'id'"));
    }
}
