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

//! Structure processors and their registry.

use crate::block::BlockInfo;
use crate::codec::primitives::{FloatCodec, StringCodec};
use crate::codec::{Codec, MapBuilder, MapReader, RecordCodec};
use crate::dispatch::{AsAny, DispatchCodec, TypeRegistry};
use crate::error::{CodecError, RegistryError};
use crate::ops::DynamicOps;
use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Id of the built-in [`IntegrityProcessor`].
pub const INTEGRITY_ID: &str = "minecraft:integrity";
/// Id of the built-in [`BlockIgnoreProcessor`].
pub const BLOCK_IGNORE_ID: &str = "minecraft:block_ignore";

/// A step run over every block of a structure before it is placed.
pub trait StructureProcessor: AsAny + fmt::Debug + Send + Sync {
    /// Transforms `current`, or returns `None` to drop the block.
    ///
    /// `original` is the block as stored in the template, before any earlier
    /// processor ran.
    fn process(&self, current: BlockInfo, original: &BlockInfo) -> Option<BlockInfo>;
}

/// Registry of processor types, keyed by the `"type"` discriminator.
pub type ProcessorRegistry = TypeRegistry<dyn StructureProcessor>;

/// Dispatch codec for boxed processors.
pub type ProcessorCodec = DispatchCodec<dyn StructureProcessor>;

/// Registers the built-in processors.
pub fn register_builtin_processors(registry: &mut ProcessorRegistry) -> Result<(), RegistryError> {
    registry.register(INTEGRITY_ID, IntegrityFields, |processor: IntegrityProcessor| {
        Box::new(processor) as Box<dyn StructureProcessor>
    })?;
    registry.register(BLOCK_IGNORE_ID, BlockIgnoreFields, |processor: BlockIgnoreProcessor| {
        Box::new(processor) as Box<dyn StructureProcessor>
    })?;
    Ok(())
}

/// Randomly drops blocks, keeping each with probability `integrity`.
pub struct IntegrityProcessor {
    integrity: f32,
    rng: Mutex<SmallRng>,
}

impl IntegrityProcessor {
    /// Creates a processor seeded from system entropy.
    #[must_use]
    pub fn new(integrity: f32) -> Self {
        Self {
            integrity,
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Creates a processor with a fixed seed, for reproducible output.
    #[must_use]
    pub fn with_seed(integrity: f32, seed: u64) -> Self {
        Self {
            integrity,
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Returns the chance that a block is kept.
    #[must_use]
    pub fn integrity(&self) -> f32 {
        self.integrity
    }
}

impl fmt::Debug for IntegrityProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegrityProcessor")
            .field("integrity", &self.integrity)
            .finish_non_exhaustive()
    }
}

impl StructureProcessor for IntegrityProcessor {
    fn process(&self, current: BlockInfo, _original: &BlockInfo) -> Option<BlockInfo> {
        if self.integrity <= 0.0 {
            return None;
        }
        if self.integrity >= 1.0 {
            return Some(current);
        }
        let roll: f32 = self.rng.lock().gen_range(0.0..1.0);
        (roll <= self.integrity).then_some(current)
    }
}

/// Fields of [`IntegrityProcessor`]: `"integrity"`, defaulting to 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegrityFields;

impl RecordCodec<IntegrityProcessor> for IntegrityFields {
    fn encode_fields<O: DynamicOps>(
        &self,
        value: &IntegrityProcessor,
        out: &mut MapBuilder<'_, O>,
    ) -> Result<(), CodecError> {
        out.field("integrity", &FloatCodec, &value.integrity)?;
        Ok(())
    }

    fn decode_fields<O: DynamicOps>(
        &self,
        input: &MapReader<'_, O>,
    ) -> Result<IntegrityProcessor, CodecError> {
        let integrity = input.optional_or("integrity", &FloatCodec, 1.0)?;
        Ok(IntegrityProcessor::new(integrity))
    }
}

/// Drops blocks whose id is in a fixed list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockIgnoreProcessor {
    blocks: Vec<String>,
}

impl BlockIgnoreProcessor {
    /// Creates a processor ignoring the given ids.
    pub fn new<I, S>(blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            blocks: blocks.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the ignored ids.
    #[must_use]
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }
}

impl StructureProcessor for BlockIgnoreProcessor {
    fn process(&self, current: BlockInfo, _original: &BlockInfo) -> Option<BlockInfo> {
        let id = current.id();
        (!self.blocks.contains(&id)).then_some(current)
    }
}

/// Fields of [`BlockIgnoreProcessor`]: `"blocks"`, a list of ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockIgnoreFields;

impl RecordCodec<BlockIgnoreProcessor> for BlockIgnoreFields {
    fn encode_fields<O: DynamicOps>(
        &self,
        value: &BlockIgnoreProcessor,
        out: &mut MapBuilder<'_, O>,
    ) -> Result<(), CodecError> {
        out.field("blocks", &StringCodec.list(), &value.blocks)?;
        Ok(())
    }

    fn decode_fields<O: DynamicOps>(
        &self,
        input: &MapReader<'_, O>,
    ) -> Result<BlockIgnoreProcessor, CodecError> {
        let blocks = input.optional_or("blocks", &StringCodec.list(), Vec::new())?;
        Ok(BlockIgnoreProcessor { blocks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockData, BlockPos};
    use crate::ops::JsonOps;
    use serde_json::json;
    use std::sync::Arc;

    fn codec() -> ProcessorCodec {
        let mut registry = ProcessorRegistry::new("processor");
        register_builtin_processors(&mut registry).unwrap();
        DispatchCodec::new(Arc::new(registry), "type")
    }

    fn stone() -> BlockInfo {
        BlockInfo::new(BlockPos::ORIGIN, BlockData::new("stone"))
    }

    #[test]
    fn test_integrity_extremes() {
        let block = stone();
        assert!(IntegrityProcessor::new(0.0).process(block.clone(), &block).is_none());
        assert!(IntegrityProcessor::new(1.0).process(block.clone(), &block).is_some());
    }

    #[test]
    fn test_integrity_seeded_is_reproducible() {
        let block = stone();
        let run = || {
            let processor = IntegrityProcessor::with_seed(0.5, 7);
            (0..64)
                .map(|_| processor.process(block.clone(), &block).is_some())
                .collect::<Vec<_>>()
        };
        let first = run();
        assert_eq!(first, run());
        assert!(first.iter().any(|kept| *kept));
        assert!(first.iter().any(|kept| !*kept));
    }

    #[test]
    fn test_block_ignore_matches_ids() {
        let processor = BlockIgnoreProcessor::new(["minecraft:stone"]);
        let block = stone();
        assert!(processor.process(block.clone(), &block).is_none());
        let dirt = BlockInfo::new(BlockPos::ORIGIN, BlockData::new("dirt"));
        assert!(processor.process(dirt.clone(), &dirt).is_some());
    }

    #[test]
    fn test_processor_dispatch_round_trip() {
        let codec = codec();
        let node = json!({"type": "minecraft:block_ignore", "blocks": ["minecraft:air"]});
        let processor = codec.decode(&JsonOps, &node).unwrap();
        let ignore = (*processor)
            .as_any()
            .downcast_ref::<BlockIgnoreProcessor>()
            .unwrap();
        assert_eq!(ignore.blocks(), ["minecraft:air".to_string()]);
        assert_eq!(codec.encode(&JsonOps, &processor).unwrap(), node);
    }

    #[test]
    fn test_integrity_defaults_to_one() {
        let processor = codec()
            .decode(&JsonOps, &json!({"type": "minecraft:integrity"}))
            .unwrap();
        let integrity = (*processor)
            .as_any()
            .downcast_ref::<IntegrityProcessor>()
            .unwrap();
        assert_eq!(integrity.integrity(), 1.0);
    }

    #[test]
    fn test_unknown_processor_type() {
        let error = codec()
            .decode(&JsonOps, &json!({"type": "nonexistent"}))
            .unwrap_err();
        assert_eq!(error.message(), "unknown type: nonexistent");
    }
}
