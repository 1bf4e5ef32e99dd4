//! Attribute Store Tests
//!
//! Ordering, overwrite semantics, typed accessors, and equality.

use colfam::{AttributeStore, SchemaError};

#[test]
fn test_set_get_remove() {
    let mut store = AttributeStore::new();
    assert!(store.is_empty());

    store.set(&b"key"[..], &b"value"[..]);
    assert_eq!(store.get(b"key").unwrap().as_ref(), b"value");
    assert_eq!(store.len(), 1);

    store.remove(b"key");
    assert!(store.get(b"key").is_none());

    // Removing an absent key is a no-op
    store.remove(b"key");
    assert!(store.is_empty());
}

#[test]
fn test_overwrite_preserves_position() {
    let mut store = AttributeStore::new();
    store.set(&b"a"[..], &b"1"[..]);
    store.set(&b"b"[..], &b"2"[..]);
    store.set(&b"a"[..], &b"3"[..]);

    let pairs: Vec<_> = store
        .iter()
        .map(|(k, v)| (k.as_ref().to_vec(), v.as_ref().to_vec()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (b"a".to_vec(), b"3".to_vec()),
            (b"b".to_vec(), b"2".to_vec()),
        ]
    );
}

#[test]
fn test_iteration_follows_insertion_order() {
    let mut store = AttributeStore::new();
    store.set(&b"z"[..], &b"26"[..]);
    store.set(&b"a"[..], &b"1"[..]);
    store.set(&b"m"[..], &b"13"[..]);

    let keys: Vec<_> = store.iter().map(|(k, _)| k.as_ref().to_vec()).collect();
    assert_eq!(keys, vec![b"z".to_vec(), b"a".to_vec(), b"m".to_vec()]);
}

#[test]
fn test_equality_ignores_order() {
    let mut x = AttributeStore::new();
    x.set(&b"a"[..], &b"1"[..]);
    x.set(&b"b"[..], &b"2"[..]);

    let mut y = AttributeStore::new();
    y.set(&b"b"[..], &b"2"[..]);
    y.set(&b"a"[..], &b"1"[..]);

    assert_eq!(x, y);

    y.set(&b"b"[..], &b"changed"[..]);
    assert_ne!(x, y);
}

#[test]
fn test_typed_accessors_use_defaults_when_absent() {
    let store = AttributeStore::new();
    assert_eq!(store.get_i64(b"n", 42).unwrap(), 42);
    assert_eq!(store.get_i32(b"n", 7).unwrap(), 7);
    assert!(store.get_bool(b"f", true).unwrap());
    assert_eq!(store.get_str(b"s", "fallback").unwrap(), "fallback");
}

#[test]
fn test_typed_accessors_decode_canonical_encodings() {
    let mut store = AttributeStore::new();
    store.set(&b"n"[..], &b"42"[..]);
    store.set(&b"neg"[..], &b"-3"[..]);
    store.set(&b"t"[..], &b"true"[..]);
    store.set(&b"f"[..], &b"FALSE"[..]);
    store.set(&b"s"[..], &b"hello"[..]);

    assert_eq!(store.get_i64(b"n", 0).unwrap(), 42);
    assert_eq!(store.get_i64(b"neg", 0).unwrap(), -3);
    assert!(store.get_bool(b"t", false).unwrap());
    assert!(!store.get_bool(b"f", true).unwrap());
    assert_eq!(store.get_str(b"s", "").unwrap(), "hello");
}

#[test]
fn test_malformed_values_fail_decoding() {
    let mut store = AttributeStore::new();
    store.set(&b"n"[..], &b"not-a-number"[..]);
    store.set(&b"b"[..], &b"yes"[..]);
    store.set(&b"big"[..], &b"99999999999"[..]);

    match store.get_i64(b"n", 0) {
        Err(SchemaError::InvalidArgument(_)) => {}
        other => panic!("Expected InvalidArgument, got {:?}", other),
    }
    assert!(store.get_bool(b"b", false).is_err());
    // Fits i64 but not i32
    assert!(store.get_i32(b"big", 0).is_err());
    assert_eq!(store.get_i64(b"big", 0).unwrap(), 99999999999);
}
