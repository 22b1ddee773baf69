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

//! Integration tests for loading whole structure documents.

use dynacodec::CodecContext;
use dynacodec::block::{BlockData, BlockInfo, BlockPos};
use dynacodec::document::{DocumentFormat, PostcardDocument};
use dynacodec::structure::{
    BlockIgnoreProcessor, IntegrityProcessor, StructureLoader, StructureTemplate,
};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn house() -> serde_json::Value {
    json!({
        "DataVersion": 1,
        "size": [3, 2, 1],
        "blocks": [
            {"id": "minecraft:oak_planks", "pos": [0, 0, 0]},
            {"id": "minecraft:air", "pos": [1, 0, 0]},
            {"id": "minecraft:oak_planks", "pos": [2, 0, 0]},
            {"id": "minecraft:chest", "pos": [1, 1, 0], "states": {"facing": "south"},
             "nbt": {"Items": []}}
        ],
        "processors": [
            {"type": "minecraft:block_ignore", "blocks": ["minecraft:air"]},
            {"type": "minecraft:integrity", "integrity": 1.0}
        ]
    })
}

fn bytes(value: &serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap()
}

#[test]
fn test_load_and_process_document() {
    init_tracing();
    let context = CodecContext::builder().build().unwrap();
    let loader = context.structure_loader();

    let template = loader.load(&bytes(&house())).unwrap();
    assert_eq!(template.size, BlockPos::new(3, 2, 1));
    assert_eq!(template.blocks.len(), 4);
    assert_eq!(template.processors.len(), 2);

    let placed = template.process_blocks();
    let ids: Vec<String> = placed.iter().map(BlockInfo::id).collect();
    assert_eq!(
        ids,
        ["minecraft:oak_planks", "minecraft:oak_planks", "minecraft:chest"]
    );
    assert!(placed[2].nbt.is_some());
}

#[test]
fn test_save_then_load_preserves_template() {
    let context = CodecContext::builder().build().unwrap();
    let loader = context.structure_loader();

    let template = loader.load(&bytes(&house())).unwrap();
    let saved = loader.save(&template).unwrap();
    let reloaded = loader.load(&saved).unwrap();

    assert_eq!(reloaded.size, template.size);
    assert_eq!(reloaded.blocks, template.blocks);
    assert_eq!(reloaded.processors.len(), template.processors.len());

    let saved: serde_json::Value = serde_json::from_slice(&saved).unwrap();
    assert_eq!(saved["processors"], house()["processors"]);
}

#[test]
fn test_postcard_loader() {
    let context = CodecContext::builder().build().unwrap();
    let loader = StructureLoader::new(context.template_codec(), PostcardDocument::new());
    assert_eq!(loader.format().name(), "postcard");

    let template = StructureTemplate::new(BlockPos::new(1, 1, 1))
        .with_block(BlockInfo::new(
            BlockPos::ORIGIN,
            BlockData::new("furnace")
                .with_state("facing", "east")
                .with_state("lit", true),
        ))
        .with_processor(Box::new(BlockIgnoreProcessor::new(["minecraft:stone"])));

    let encoded = loader.save(&template).unwrap();
    let decoded = loader.load(&encoded).unwrap();
    assert_eq!(decoded.blocks, template.blocks);
    assert_eq!(decoded.processors.len(), 1);
}

#[test]
fn test_load_all_skips_failures_and_duplicates() {
    init_tracing();
    let context = CodecContext::builder().build().unwrap();
    let loader = context.structure_loader();

    let broken = json!({"size": [1, 1, 1], "blocks": [{"id": "minecraft:unobtainium"}]});
    let small = json!({"size": [1, 1, 1], "blocks": [{"id": "minecraft:dirt"}]});
    let documents = vec![
        ("house", bytes(&house())),
        ("broken", bytes(&broken)),
        ("garbage", b"{not json".to_vec()),
        ("small", bytes(&small)),
        ("house", bytes(&small)),
    ];

    let loaded = loader.load_all(documents);
    let names: Vec<&str> = loaded.keys().map(String::as_str).collect();
    assert_eq!(names, ["house", "small"]);
    assert_eq!(loaded["house"].blocks.len(), 4);
    assert_eq!(loaded["small"].blocks[0].pos, BlockPos::ORIGIN);
}

#[test]
fn test_missing_blocks_is_an_error() {
    let context = CodecContext::builder().build().unwrap();
    let loader = context.structure_loader();
    assert!(loader.load(&bytes(&json!({"size": [1, 1, 1]}))).is_err());
}

#[test]
fn test_zero_integrity_drops_everything() {
    let template = StructureTemplate::new(BlockPos::new(2, 1, 1))
        .with_block(BlockInfo::new(BlockPos::ORIGIN, BlockData::new("stone")))
        .with_block(BlockInfo::new(BlockPos::new(1, 0, 0), BlockData::new("dirt")))
        .with_processor(Box::new(IntegrityProcessor::with_seed(0.0, 7)));
    assert!(template.process_blocks().is_empty());
}

#[test]
fn test_seeded_integrity_is_reproducible() {
    let blocks: Vec<BlockInfo> = (0..64)
        .map(|x| BlockInfo::new(BlockPos::new(x, 0, 0), BlockData::new("stone")))
        .collect();
    let build = || {
        blocks
            .iter()
            .cloned()
            .fold(StructureTemplate::new(BlockPos::new(64, 1, 1)), StructureTemplate::with_block)
            .with_processor(Box::new(IntegrityProcessor::with_seed(0.5, 42)))
    };

    let first = build().process_blocks();
    let second = build().process_blocks();
    assert_eq!(first, second);
    assert!(first.len() < blocks.len());
}
