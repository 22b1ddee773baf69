//! Dispatch benchmarks for dynacodec
//!
//! Measures encode and decode cost for:
//! - Processor dispatch on the `"type"` key
//! - Block identity resolution with state adapter chains
//! - Whole structure templates of growing size

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dynacodec::block::{BlockData, BlockInfo, BlockPos};
use dynacodec::ops::{JsonOps, ValueOps};
use dynacodec::structure::{BlockIgnoreProcessor, StructureProcessor, StructureTemplate};
use dynacodec::{Codec, CodecContext};
use serde_json::json;

/// Benchmark processor decode and encode through the type registry
fn bench_processor_dispatch(c: &mut Criterion) {
    let context = CodecContext::builder().build().unwrap();
    let codec = context.processor_codec();
    let node = json!({"type": "minecraft:block_ignore", "blocks": ["minecraft:air", "minecraft:stone"]});
    let processor: Box<dyn StructureProcessor> =
        Box::new(BlockIgnoreProcessor::new(["minecraft:air", "minecraft:stone"]));

    let mut group = c.benchmark_group("processor_dispatch");
    group.bench_function("decode_json", |b| {
        b.iter(|| black_box(codec.decode(&JsonOps, black_box(&node)).unwrap()));
    });
    group.bench_function("encode_json", |b| {
        b.iter(|| black_box(codec.encode(&JsonOps, black_box(&processor)).unwrap()));
    });
    group.finish();
}

/// Benchmark block identity resolution
fn bench_block_info(c: &mut Criterion) {
    let context = CodecContext::builder().build().unwrap();
    let codec = context.block_info_codec();
    let furnace = BlockInfo::new(
        BlockPos::new(3, 64, -7),
        BlockData::new("furnace")
            .with_state("facing", "west")
            .with_state("lit", true),
    );
    let json = codec.encode(&JsonOps, &furnace).unwrap();
    let value = codec.encode(&ValueOps, &furnace).unwrap();

    let mut group = c.benchmark_group("block_info");
    group.bench_function("encode_json", |b| {
        b.iter(|| black_box(codec.encode(&JsonOps, black_box(&furnace)).unwrap()));
    });
    group.bench_function("decode_json", |b| {
        b.iter(|| black_box(codec.decode(&JsonOps, black_box(&json)).unwrap()));
    });
    group.bench_function("decode_value", |b| {
        b.iter(|| black_box(codec.decode(&ValueOps, black_box(&value)).unwrap()));
    });
    group.finish();
}

/// Benchmark whole templates
fn bench_template(c: &mut Criterion) {
    let context = CodecContext::builder().build().unwrap();
    let codec = context.template_codec();

    let mut group = c.benchmark_group("template");
    for side in [4, 16, 32].iter() {
        let mut template = StructureTemplate::new(BlockPos::new(*side, 1, *side));
        for x in 0..*side {
            for z in 0..*side {
                let material = if (x + z) % 2 == 0 { "stone" } else { "oak_planks" };
                template = template.with_block(BlockInfo::new(
                    BlockPos::new(x, 0, z),
                    BlockData::new(material),
                ));
            }
        }
        let node = codec.encode(&JsonOps, &template).unwrap();

        group.throughput(Throughput::Elements(template.blocks.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("decode_json", format!("{}blocks", template.blocks.len())),
            &node,
            |b, node| {
                b.iter(|| black_box(codec.decode(&JsonOps, node).unwrap()));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_processor_dispatch,
    bench_block_info,
    bench_template
);
criterion_main!(benches);
