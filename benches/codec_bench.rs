//! Benchmarks for descriptor encode/decode

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use colfam::codec::{decode, encode};
use colfam::{Compression, DataBlockEncoding, FamilyDescriptor, KeepDeletedCells};

fn populated_descriptor() -> FamilyDescriptor {
    let mut desc = FamilyDescriptor::new("bench").unwrap();
    desc.set_block_size(65536)
        .unwrap()
        .set_time_to_live(86400)
        .unwrap()
        .set_max_versions(3)
        .unwrap()
        .set_min_versions(1)
        .unwrap()
        .set_scope(1)
        .unwrap()
        .set_mob_threshold(102400)
        .unwrap()
        .set_in_memory(true)
        .set_compression(Compression::Snappy)
        .set_data_block_encoding(DataBlockEncoding::FastDiff)
        .set_keep_deleted_cells(KeepDeletedCells::Ttl)
        .set_configuration("engine.compaction.ratio", "0.5");
    desc
}

fn codec_benchmarks(c: &mut Criterion) {
    let desc = populated_descriptor();
    let bytes = encode(&desc);

    c.bench_function("encode_populated_descriptor", |b| {
        b.iter(|| encode(black_box(&desc)))
    });

    c.bench_function("decode_populated_descriptor", |b| {
        b.iter(|| decode(black_box(&bytes)).unwrap())
    });
}

criterion_group!(benches, codec_benchmarks);
criterion_main!(benches);
