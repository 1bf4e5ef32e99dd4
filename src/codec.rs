//! Descriptor wire codec
//!
//! Versioned binary encoding and decoding of a [`FamilyDescriptor`].
//!
//! ## Wire Format
//! ```text
//! ┌───────────┬─────────┬──────────────┬──────────────────────────────┐
//! │ Magic (4) │ Ver (1) │ NameLen (4)  │          Name                │
//! ├───────────┴─────────┴──────────────┴──────────────────────────────┤
//! │ AttrCount (4)                                                     │
//! │   [KeyLen (4)][Key][ValLen (4)][Value]   ... per attribute ...    │
//! ├───────────────────────────────────────────────────────────────────┤
//! │ ConfCount (4)                                                     │
//! │   [KeyLen (4)][Key][ValLen (4)][Value]   ... per config pair ...  │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//! All integers are big-endian u32. The envelope is flat and
//! self-describing: pairs carry no type tags, so keys unknown to this crate
//! pass through decode untouched and re-encode identically (forward
//! compatibility).
//!
//! Decode validates the magic and version before reading anything else and
//! fails with a `Deserialization` error on any mismatch, truncation, or
//! trailing garbage. It builds into fresh values and only assembles the
//! descriptor on full success, so no partially-decoded descriptor is ever
//! observable.

use bytes::Bytes;
use tracing::debug;

use crate::attrs::AttributeStore;
use crate::descriptor::FamilyDescriptor;
use crate::error::{Result, SchemaError};

/// Magic bytes identifying an encoded family descriptor
pub const MAGIC: &[u8; 4] = b"CFAM";

/// Current wire format version
pub const VERSION: u8 = 1;

/// Fixed prefix size: Magic (4) + Version (1)
pub const HEADER_SIZE: usize = 5;

/// Upper bound for any single length prefix (16 MB), guarding against
/// allocating for corrupt lengths
pub const MAX_FIELD_SIZE: u32 = 16 * 1024 * 1024;

// =============================================================================
// Encoding
// =============================================================================

/// Encode a descriptor to its wire form.
///
/// Attribute and configuration pairs are written in store iteration order,
/// so encoding is deterministic for a given descriptor.
pub fn encode(desc: &FamilyDescriptor) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_size(desc));

    buf.extend_from_slice(MAGIC);
    buf.push(VERSION);

    write_field(&mut buf, desc.name());

    write_pairs(&mut buf, desc.attributes());
    write_pairs(&mut buf, desc.configuration());

    debug!(
        family = %desc.name_as_str(),
        bytes = buf.len(),
        "encoded descriptor"
    );
    buf
}

/// Exact size of the wire form, for a single allocation
fn encoded_size(desc: &FamilyDescriptor) -> usize {
    let pairs_size = |store: &AttributeStore| {
        4 + store
            .iter()
            .map(|(k, v)| 8 + k.len() + v.len())
            .sum::<usize>()
    };
    HEADER_SIZE + 4 + desc.name().len() + pairs_size(desc.attributes()) + pairs_size(desc.configuration())
}

/// Write a length-prefixed byte field
fn write_field(buf: &mut Vec<u8>, field: &[u8]) {
    buf.extend_from_slice(&(field.len() as u32).to_be_bytes());
    buf.extend_from_slice(field);
}

/// Write a count-prefixed run of length-prefixed (key, value) pairs
fn write_pairs(buf: &mut Vec<u8>, store: &AttributeStore) {
    buf.extend_from_slice(&(store.len() as u32).to_be_bytes());
    for (key, value) in store.iter() {
        write_field(buf, key);
        write_field(buf, value);
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a descriptor from its wire form.
///
/// The result is guaranteed `==` to the descriptor that was encoded
/// (round-trip law). Unknown attribute keys are retained verbatim.
pub fn decode(bytes: &[u8]) -> Result<FamilyDescriptor> {
    if bytes.len() < HEADER_SIZE {
        return Err(SchemaError::Deserialization(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    if &bytes[0..4] != MAGIC {
        return Err(SchemaError::Deserialization(format!(
            "Bad magic: expected {:02x?}, got {:02x?}",
            MAGIC,
            &bytes[0..4]
        )));
    }

    let version = bytes[4];
    if version != VERSION {
        return Err(SchemaError::Deserialization(format!(
            "Unsupported format version: {} (supported: {})",
            version, VERSION
        )));
    }

    let mut reader = Reader {
        bytes,
        pos: HEADER_SIZE,
    };

    let name = Bytes::copy_from_slice(reader.read_field("family name")?);
    let attrs = read_pairs(&mut reader, "attribute")?;
    let configuration = read_pairs(&mut reader, "configuration")?;

    if reader.pos != bytes.len() {
        return Err(SchemaError::Deserialization(format!(
            "{} trailing bytes after descriptor",
            bytes.len() - reader.pos
        )));
    }

    // Family-name legality is re-checked here so a corrupt payload cannot
    // smuggle in a name that construction would have rejected.
    let desc = FamilyDescriptor::from_parts(name, attrs, configuration)
        .map_err(|e| SchemaError::Deserialization(e.to_string()))?;

    debug!(family = %desc.name_as_str(), "decoded descriptor");
    Ok(desc)
}

/// Read a count-prefixed run of pairs into a fresh store
fn read_pairs(reader: &mut Reader<'_>, what: &str) -> Result<AttributeStore> {
    let count = reader.read_u32(what)?;
    let mut store = AttributeStore::new();
    for _ in 0..count {
        let key = Bytes::copy_from_slice(reader.read_field(what)?);
        let value = Bytes::copy_from_slice(reader.read_field(what)?);
        store.set(key, value);
    }
    Ok(store)
}

/// Bounds-checked sequential reader over the encoded buffer
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Read a big-endian u32, guarding against truncation
    fn read_u32(&mut self, what: &str) -> Result<u32> {
        if self.bytes.len() - self.pos < 4 {
            return Err(SchemaError::Deserialization(format!(
                "Truncated {}: missing length prefix at offset {}",
                what, self.pos
            )));
        }
        let value = u32::from_be_bytes([
            self.bytes[self.pos],
            self.bytes[self.pos + 1],
            self.bytes[self.pos + 2],
            self.bytes[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(value)
    }

    /// Read a length-prefixed byte field
    fn read_field(&mut self, what: &str) -> Result<&'a [u8]> {
        let len = self.read_u32(what)?;
        if len > MAX_FIELD_SIZE {
            return Err(SchemaError::Deserialization(format!(
                "{} field too large: {} bytes (max {})",
                what, len, MAX_FIELD_SIZE
            )));
        }
        let len = len as usize;
        if self.bytes.len() - self.pos < len {
            return Err(SchemaError::Deserialization(format!(
                "Truncated {}: expected {} bytes at offset {}, {} remain",
                what,
                len,
                self.pos,
                self.bytes.len() - self.pos
            )));
        }
        let field = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(field)
    }
}
