//! Codec Tests
//!
//! Round-trip law, forward compatibility, and strict decode failures.

use colfam::codec::{decode, encode, HEADER_SIZE, MAGIC, VERSION};
use colfam::{
    BloomFilter, Compression, DataBlockEncoding, FamilyDescriptor, KeepDeletedCells,
    SchemaError,
};

/// A descriptor with every recognized attribute set away from its default,
/// plus a user pair and configuration entries.
fn populated_descriptor() -> FamilyDescriptor {
    let mut desc = FamilyDescriptor::new("catalog").unwrap();
    desc.set_block_size(123)
        .unwrap()
        .set_time_to_live(123)
        .unwrap()
        .set_max_versions(123)
        .unwrap()
        .set_min_versions(123)
        .unwrap()
        .set_scope(123)
        .unwrap()
        .set_mob_threshold(1000)
        .unwrap()
        .set_dfs_replication(123)
        .unwrap()
        .set_in_memory(true)
        .set_block_cache_enabled(false)
        .set_keep_deleted_cells(KeepDeletedCells::True)
        .set_compression(Compression::Snappy)
        .set_bloom_filter(BloomFilter::Row)
        .set_data_block_encoding(DataBlockEncoding::FastDiff)
        .set_mob_enabled(true)
        .set_value(&b"a"[..], &b"b"[..])
        .set_configuration("engine.knob", "42");
    desc
}

// =============================================================================
// Round-Trip Law
// =============================================================================

#[test]
fn test_round_trip_fully_populated() {
    let desc = populated_descriptor();
    let bytes = encode(&desc);
    let decoded = decode(&bytes).unwrap();

    assert_eq!(desc, decoded);

    // Typed getters agree on both sides
    assert_eq!(decoded.block_size().unwrap(), 123);
    assert_eq!(decoded.time_to_live().unwrap(), 123);
    assert_eq!(decoded.max_versions().unwrap(), 123);
    assert_eq!(decoded.min_versions().unwrap(), 123);
    assert_eq!(decoded.scope().unwrap(), 123);
    assert_eq!(decoded.mob_threshold().unwrap(), 1000);
    assert_eq!(decoded.dfs_replication().unwrap(), 123);
    assert!(decoded.in_memory().unwrap());
    assert!(!decoded.block_cache_enabled().unwrap());
    assert_eq!(decoded.keep_deleted_cells().unwrap(), KeepDeletedCells::True);
    assert_eq!(decoded.compression().unwrap(), Compression::Snappy);
    assert_eq!(decoded.bloom_filter().unwrap(), BloomFilter::Row);
    assert_eq!(
        decoded.data_block_encoding().unwrap(),
        DataBlockEncoding::FastDiff
    );
    assert!(decoded.mob_enabled().unwrap());
    assert_eq!(decoded.value(b"a").unwrap().as_ref(), b"b");
    assert_eq!(
        decoded.configuration_value("engine.knob").as_deref(),
        Some("42")
    );
}

#[test]
fn test_round_trip_empty_descriptor() {
    let desc = FamilyDescriptor::new("bare").unwrap();
    let decoded = decode(&encode(&desc)).unwrap();
    assert_eq!(desc, decoded);
    assert!(decoded.attributes().is_empty());
    assert!(decoded.configuration().is_empty());
}

#[test]
fn test_encoding_is_deterministic() {
    let desc = populated_descriptor();
    assert_eq!(encode(&desc), encode(&desc));
}

#[test]
fn test_unknown_attribute_keys_are_retained() {
    let mut desc = FamilyDescriptor::new("future").unwrap();
    desc.set_value(&b"SOME_FUTURE_KEY"[..], &b"whatever"[..]);

    let decoded = decode(&encode(&desc)).unwrap();
    assert_eq!(
        decoded.value(b"SOME_FUTURE_KEY").unwrap().as_ref(),
        b"whatever"
    );

    // Re-encoding preserves the unknown pair byte-for-byte
    assert_eq!(encode(&desc), encode(&decoded));
}

// =============================================================================
// Strict Decode Failures
// =============================================================================

fn assert_deserialization_error(bytes: &[u8]) {
    match decode(bytes) {
        Err(SchemaError::Deserialization(_)) => {}
        other => panic!("Expected Deserialization error, got {:?}", other),
    }
}

#[test]
fn test_decode_rejects_short_buffer() {
    assert_deserialization_error(&[]);
    assert_deserialization_error(&MAGIC[..3]);
}

#[test]
fn test_decode_rejects_bad_magic() {
    let mut bytes = encode(&populated_descriptor());
    bytes[0] = b'X';
    assert_deserialization_error(&bytes);
}

#[test]
fn test_decode_rejects_unknown_version() {
    let mut bytes = encode(&populated_descriptor());
    bytes[4] = VERSION + 1;
    assert_deserialization_error(&bytes);
}

#[test]
fn test_decode_rejects_truncation() {
    let bytes = encode(&populated_descriptor());
    // Every strict prefix of the valid stream must fail, not silently
    // produce a partial descriptor.
    for end in HEADER_SIZE..bytes.len() {
        assert_deserialization_error(&bytes[..end]);
    }
}

#[test]
fn test_decode_rejects_trailing_garbage() {
    let mut bytes = encode(&populated_descriptor());
    bytes.push(0);
    assert_deserialization_error(&bytes);
}

#[test]
fn test_decode_rejects_illegal_family_name() {
    // Hand-build an envelope whose family name construction would refuse
    let mut bytes = Vec::new();
    bytes.extend_from_slice(MAGIC);
    bytes.push(VERSION);
    bytes.extend_from_slice(&0u32.to_be_bytes()); // empty name
    bytes.extend_from_slice(&0u32.to_be_bytes()); // no attributes
    bytes.extend_from_slice(&0u32.to_be_bytes()); // no configuration
    assert_deserialization_error(&bytes);
}

#[test]
fn test_decode_rejects_oversized_length_prefix() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(MAGIC);
    bytes.push(VERSION);
    bytes.extend_from_slice(&u32::MAX.to_be_bytes()); // absurd name length
    assert_deserialization_error(&bytes);
}
