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

//! Structure templates.

use crate::block::{BlockInfo, BlockInfoCodec, BlockPos, BlockPosCodec};
use crate::codec::primitives::IntCodec;
use crate::codec::{Codec, ListCodec, MapBuilder, MapReader};
use crate::error::CodecError;
use crate::ops::DynamicOps;
use crate::structure::{ProcessorCodec, StructureProcessor};

#[cfg(feature = "observability")]
use tracing::debug;

/// Format version written under `"DataVersion"`.
pub const DATA_VERSION: i32 = 1;

/// A stored structure: its bounding size, blocks and processor pipeline.
#[derive(Debug, Default)]
pub struct StructureTemplate {
    /// Extent of the structure on each axis.
    pub size: BlockPos,
    /// Blocks relative to the structure origin.
    pub blocks: Vec<BlockInfo>,
    /// Processors run in order over every block.
    pub processors: Vec<Box<dyn StructureProcessor>>,
}

impl StructureTemplate {
    /// Creates an empty template of the given size.
    #[must_use]
    pub fn new(size: BlockPos) -> Self {
        Self {
            size,
            blocks: Vec::new(),
            processors: Vec::new(),
        }
    }

    /// Adds a block.
    #[must_use]
    pub fn with_block(mut self, block: BlockInfo) -> Self {
        self.blocks.push(block);
        self
    }

    /// Appends a processor to the pipeline.
    #[must_use]
    pub fn with_processor(mut self, processor: Box<dyn StructureProcessor>) -> Self {
        self.processors.push(processor);
        self
    }

    /// Runs the processor pipeline over every block.
    ///
    /// Each processor sees the output of the one before it; a block dropped by
    /// any processor is not passed to the rest.
    #[must_use]
    pub fn process_blocks(&self) -> Vec<BlockInfo> {
        let processed: Vec<BlockInfo> = self
            .blocks
            .iter()
            .filter_map(|original| {
                self.processors
                    .iter()
                    .try_fold(original.clone(), |current, processor| {
                        processor.process(current, original)
                    })
            })
            .collect();

        #[cfg(feature = "observability")]
        debug!(
            blocks = self.blocks.len(),
            kept = processed.len(),
            processors = self.processors.len(),
            "Processed structure blocks"
        );

        processed
    }
}

/// Codec for [`StructureTemplate`].
///
/// `"DataVersion"` is written on encode and ignored on decode. A missing
/// `"processors"` list decodes as an empty pipeline.
#[derive(Debug, Clone)]
pub struct StructureTemplateCodec {
    blocks: ListCodec<BlockInfoCodec, BlockInfo>,
    processors: ListCodec<ProcessorCodec, Box<dyn StructureProcessor>>,
}

impl StructureTemplateCodec {
    /// Creates a template codec from its block and processor codecs.
    pub fn new(blocks: BlockInfoCodec, processors: ProcessorCodec) -> Self {
        Self {
            blocks: blocks.list(),
            processors: processors.list(),
        }
    }
}

impl Codec<StructureTemplate> for StructureTemplateCodec {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &StructureTemplate) -> Result<O::Node, CodecError> {
        let mut out = MapBuilder::new(ops);
        out.field("DataVersion", &IntCodec, &DATA_VERSION)?
            .field("size", &BlockPosCodec, &value.size)?
            .field("blocks", &self.blocks, &value.blocks)?
            .field("processors", &self.processors, &value.processors)?;
        Ok(out.build())
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<StructureTemplate, CodecError> {
        let input = MapReader::new(ops, input)?;
        Ok(StructureTemplate {
            size: input.required("size", &BlockPosCodec)?,
            blocks: input.required("blocks", &self.blocks)?,
            processors: input.optional_or("processors", &self.processors, Vec::new())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AdapterChain;
    use crate::block::{BlockData, CustomBlockRegistry, VanillaPalette};
    use crate::dispatch::DispatchCodec;
    use crate::ops::JsonOps;
    use crate::structure::{
        BlockIgnoreProcessor, IntegrityProcessor, ProcessorRegistry, register_builtin_processors,
    };
    use serde_json::json;
    use std::sync::Arc;

    fn codec() -> StructureTemplateCodec {
        let mut registry = ProcessorRegistry::new("processor");
        register_builtin_processors(&mut registry).unwrap();
        let blocks = BlockInfoCodec::new(
            Arc::new(VanillaPalette::standard()),
            Arc::new(CustomBlockRegistry::new()),
            Arc::new(AdapterChain::new("state")),
            "id",
        );
        StructureTemplateCodec::new(blocks, DispatchCodec::new(Arc::new(registry), "type"))
    }

    fn template() -> StructureTemplate {
        StructureTemplate::new(BlockPos::new(2, 1, 1))
            .with_block(BlockInfo::new(BlockPos::new(0, 0, 0), BlockData::new("stone")))
            .with_block(BlockInfo::new(BlockPos::new(1, 0, 0), BlockData::new("air")))
    }

    #[test]
    fn test_process_blocks_runs_pipeline() {
        let template = template()
            .with_processor(Box::new(IntegrityProcessor::new(1.0)))
            .with_processor(Box::new(BlockIgnoreProcessor::new(["minecraft:air"])));
        let kept = template.process_blocks();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id(), "minecraft:stone");
    }

    #[test]
    fn test_process_blocks_without_processors_keeps_all() {
        assert_eq!(template().process_blocks(), template().blocks);
    }

    #[test]
    fn test_template_encode_shape() {
        let template = template().with_processor(Box::new(BlockIgnoreProcessor::new(["minecraft:air"])));
        assert_eq!(
            codec().encode(&JsonOps, &template).unwrap(),
            json!({
                "DataVersion": 1,
                "size": [2, 1, 1],
                "blocks": [
                    {"id": "minecraft:stone", "pos": [0, 0, 0]},
                    {"id": "minecraft:air", "pos": [1, 0, 0]}
                ],
                "processors": [{"type": "minecraft:block_ignore", "blocks": ["minecraft:air"]}]
            })
        );
    }

    #[test]
    fn test_template_decode_ignores_version_and_defaults_processors() {
        let decoded = codec()
            .decode(
                &JsonOps,
                &json!({"DataVersion": 99, "size": [1, 1, 1], "blocks": [{"id": "minecraft:dirt"}]}),
            )
            .unwrap();
        assert_eq!(decoded.size, BlockPos::new(1, 1, 1));
        assert_eq!(decoded.blocks.len(), 1);
        assert!(decoded.processors.is_empty());
    }

    #[test]
    fn test_template_bad_block_names_index() {
        let error = codec()
            .decode(
                &JsonOps,
                &json!({"size": [1, 1, 1], "blocks": [{"id": "minecraft:dirt"}, {"id": "x:y"}]}),
            )
            .unwrap_err();
        assert!(error.mentions("invalid element 1"));
        assert!(error.mentions("unknown id: x:y"));
    }
}
