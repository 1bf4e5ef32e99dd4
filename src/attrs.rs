//! Attribute store
//!
//! Insertion-ordered byte-keyed key/value container backing a descriptor.
//!
//! Keys are unique; re-setting a key overwrites its value in place so the
//! original position is preserved. Iteration order is what the wire codec
//! serializes, making encoding deterministic for a given store. Equality is
//! order-independent: two stores holding the same (key, value) pairs compare
//! equal no matter the order the pairs were inserted in.

use bytes::Bytes;

use crate::error::{Result, SchemaError};

/// Ordered mapping from byte-sequence keys to byte-sequence values.
///
/// The expected population is a dozen or so well-known attribute keys plus a
/// handful of user keys, so lookups are linear scans over a pair vector.
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    entries: Vec<(Bytes, Bytes)>,
}

impl AttributeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key. Overwriting keeps the key's original
    /// position in iteration order.
    pub fn set(&mut self, key: impl Into<Bytes>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get the raw stored bytes for a key
    pub fn get(&self, key: &[u8]) -> Option<&Bytes> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Delete a key if present; no-op if absent
    pub fn remove(&mut self, key: &[u8]) {
        self.entries.retain(|(k, _)| k != key);
    }

    /// Iterate (key, value) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Bytes, &Bytes)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no pairs are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // -------------------------------------------------------------------------
    // Typed Accessors
    // -------------------------------------------------------------------------
    // Values use canonical textual encodings: integers as decimal ASCII,
    // booleans as "true"/"false", enums as their uppercase names. An absent
    // key yields the caller's default; a present but malformed value is an
    // InvalidArgument naming the key.

    /// Decode the value under `key` as UTF-8, or return `default` if absent
    pub fn get_str(&self, key: &[u8], default: &str) -> Result<String> {
        match self.get(key) {
            Some(raw) => std::str::from_utf8(raw)
                .map(str::to_owned)
                .map_err(|_| malformed(key, "UTF-8 string")),
            None => Ok(default.to_owned()),
        }
    }

    /// Decode the value under `key` as a decimal i64, or return `default`
    pub fn get_i64(&self, key: &[u8], default: i64) -> Result<i64> {
        match self.get(key) {
            Some(raw) => std::str::from_utf8(raw)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .ok_or_else(|| malformed(key, "decimal integer")),
            None => Ok(default),
        }
    }

    /// Decode the value under `key` as a decimal i32, or return `default`
    pub fn get_i32(&self, key: &[u8], default: i32) -> Result<i32> {
        let v = self.get_i64(key, default as i64)?;
        i32::try_from(v).map_err(|_| malformed(key, "32-bit integer"))
    }

    /// Decode the value under `key` as "true"/"false", or return `default`
    pub fn get_bool(&self, key: &[u8], default: bool) -> Result<bool> {
        match self.get(key) {
            Some(raw) => match std::str::from_utf8(raw).map(str::trim) {
                Ok(s) if s.eq_ignore_ascii_case("true") => Ok(true),
                Ok(s) if s.eq_ignore_ascii_case("false") => Ok(false),
                _ => Err(malformed(key, "boolean")),
            },
            None => Ok(default),
        }
    }
}

fn malformed(key: &[u8], expected: &str) -> SchemaError {
    SchemaError::InvalidArgument(format!(
        "Value for attribute '{}' is not a valid {}",
        String::from_utf8_lossy(key),
        expected
    ))
}

// Order-independent equality: same key set, same values.
impl PartialEq for AttributeStore {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for AttributeStore {}

impl std::hash::Hash for AttributeStore {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Hash must agree with the order-independent equality, so combine
        // per-pair hashes with an order-insensitive fold.
        let mut acc: u64 = 0;
        for (k, v) in &self.entries {
            let mut h = std::collections::hash_map::DefaultHasher::new();
            std::hash::Hash::hash(&(k.as_ref(), v.as_ref()), &mut h);
            acc = acc.wrapping_add(std::hash::Hasher::finish(&h));
        }
        state.write_u64(acc);
    }
}
