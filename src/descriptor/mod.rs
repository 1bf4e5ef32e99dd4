//! Column-family descriptor
//!
//! The builder-style façade over the attribute store. A descriptor is
//! identified by its family name and carries two byte-keyed maps:
//!
//! - **attributes**: the fixed, well-known schema knobs (TTL, compression,
//!   versions, ...) plus arbitrary user pairs set through [`set_value`]
//! - **configuration**: an open sub-namespace of string pairs for
//!   engine-specific tuning knobs unknown to this crate
//!
//! ## Construction
//! ```text
//! let mut desc = FamilyDescriptor::new("info")?;
//! desc.set_max_versions(3)?
//!     .set_time_to_live_str("5 DAYS")?
//!     .set_compression(Compression::Snappy)
//!     .set_in_memory(true);
//! let frozen = desc.freeze();
//! ```
//!
//! Every setter returns `&mut Self` (wrapped in `Result` when validation can
//! fail) so calls chain. Validation happens at the setter, never deferred to
//! serialization. Once built, [`FamilyDescriptor::freeze`] produces an
//! immutable snapshot for hand-off to consumers.
//!
//! [`set_value`]: FamilyDescriptor::set_value

mod types;

use std::hash::{Hash, Hasher};
use std::ops::Deref;

use bytes::Bytes;

pub use types::{BloomFilter, Compression, DataBlockEncoding, KeepDeletedCells};

use crate::attrs::AttributeStore;
use crate::error::{Result, SchemaError};
use crate::pretty;

// =============================================================================
// Well-Known Attribute Keys
// =============================================================================

/// Maximum number of cell versions retained
pub const VERSIONS: &[u8] = b"VERSIONS";

/// Minimum number of cell versions retained even past TTL
pub const MIN_VERSIONS: &[u8] = b"MIN_VERSIONS";

/// Compression algorithm name
pub const COMPRESSION: &[u8] = b"COMPRESSION";

/// Target block size in bytes
pub const BLOCKSIZE: &[u8] = b"BLOCKSIZE";

/// Time-to-live in seconds
pub const TTL: &[u8] = b"TTL";

/// Bloom filter type name
pub const BLOOMFILTER: &[u8] = b"BLOOMFILTER";

/// Data block encoding name
pub const DATA_BLOCK_ENCODING: &[u8] = b"DATA_BLOCK_ENCODING";

/// Whether blocks should be pinned in cache
pub const IN_MEMORY: &[u8] = b"IN_MEMORY";

/// Whether the block cache is used at all
pub const BLOCKCACHE: &[u8] = b"BLOCKCACHE";

/// Keep-deleted-cells policy name
pub const KEEP_DELETED_CELLS: &[u8] = b"KEEP_DELETED_CELLS";

/// Replication scope (0 = local only)
pub const REPLICATION_SCOPE: &[u8] = b"REPLICATION_SCOPE";

/// Whether values above the MOB threshold take the medium-object path
pub const IS_MOB: &[u8] = b"IS_MOB";

/// Size in bytes above which a value is treated as a medium object
pub const MOB_THRESHOLD: &[u8] = b"MOB_THRESHOLD";

/// Per-family filesystem replication factor (0 = filesystem default)
pub const DFS_REPLICATION: &[u8] = b"DFS_REPLICATION";

// =============================================================================
// Defaults
// =============================================================================

/// TTL sentinel meaning "never expire"
pub const FOREVER: i64 = i32::MAX as i64;

/// Default maximum number of versions
pub const DEFAULT_VERSIONS: i32 = 1;

/// Default minimum number of versions
pub const DEFAULT_MIN_VERSIONS: i32 = 1;

/// Default block size (64 KB)
pub const DEFAULT_BLOCKSIZE: i32 = 64 * 1024;

/// Default time-to-live: never expire
pub const DEFAULT_TTL: i64 = FOREVER;

/// Default compression: none
pub const DEFAULT_COMPRESSION: Compression = Compression::None;

/// Default bloom filter type
pub const DEFAULT_BLOOMFILTER: BloomFilter = BloomFilter::Row;

/// Default data block encoding: none
pub const DEFAULT_DATA_BLOCK_ENCODING: DataBlockEncoding = DataBlockEncoding::None;

/// Default in-memory flag
pub const DEFAULT_IN_MEMORY: bool = false;

/// Default block cache flag
pub const DEFAULT_BLOCKCACHE: bool = true;

/// Default keep-deleted-cells policy
pub const DEFAULT_KEEP_DELETED: KeepDeletedCells = KeepDeletedCells::False;

/// Default replication scope: local
pub const DEFAULT_REPLICATION_SCOPE: i32 = 0;

/// Default MOB flag
pub const DEFAULT_MOB: bool = false;

/// Default MOB threshold (100 KB)
pub const DEFAULT_MOB_THRESHOLD: i64 = 100 * 1024;

/// Default DFS replication: follow the filesystem's own default
pub const DEFAULT_DFS_REPLICATION: i16 = 0;

// =============================================================================
// Family Name Validation
// =============================================================================

/// Check family-name legality: non-empty, no leading period, no colon, no
/// control characters. Returns the offending reason as InvalidArgument.
pub fn check_family_name(name: &[u8]) -> Result<()> {
    if name.is_empty() {
        return Err(SchemaError::InvalidArgument(
            "Family name can not be empty".to_string(),
        ));
    }
    if name[0] == b'.' {
        return Err(SchemaError::InvalidArgument(format!(
            "Family name cannot start with a period: '{}'",
            String::from_utf8_lossy(name)
        )));
    }
    for &b in name {
        if b == b':' || b < b' ' || b == 0x7f {
            return Err(SchemaError::InvalidArgument(format!(
                "Illegal character <{}> in family name: '{}'",
                b,
                String::from_utf8_lossy(name)
            )));
        }
    }
    Ok(())
}

// =============================================================================
// FamilyDescriptor
// =============================================================================

/// Schema descriptor for a single column family.
///
/// Mutated through chained builder-style setters during construction, then
/// conventionally read-only; call [`freeze`](Self::freeze) to make that
/// convention a type-level guarantee.
#[derive(Debug, Clone)]
pub struct FamilyDescriptor {
    /// Family name, the descriptor's identity
    name: Bytes,

    /// Well-known attributes plus arbitrary user pairs
    attrs: AttributeStore,

    /// Engine-specific string pairs, distinct from the attribute set
    configuration: AttributeStore,
}

impl FamilyDescriptor {
    /// Create an empty descriptor for the given family name.
    ///
    /// Fails immediately with `InvalidArgument` if the name is empty, starts
    /// with a period, or contains ':' or a control character.
    pub fn new(name: impl Into<Bytes>) -> Result<Self> {
        let name = name.into();
        check_family_name(&name)?;
        Ok(Self {
            name,
            attrs: AttributeStore::new(),
            configuration: AttributeStore::new(),
        })
    }

    /// Family name bytes
    pub fn name(&self) -> &Bytes {
        &self.name
    }

    /// Family name as a lossy UTF-8 string, for diagnostics
    pub fn name_as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    // -------------------------------------------------------------------------
    // Raw Attribute Access
    // -------------------------------------------------------------------------

    /// Set an arbitrary attribute pair. Overwrites in place if the key exists.
    pub fn set_value(&mut self, key: impl Into<Bytes>, value: impl Into<Bytes>) -> &mut Self {
        self.attrs.set(key, value);
        self
    }

    /// Raw bytes stored under an attribute key
    pub fn value(&self, key: &[u8]) -> Option<&Bytes> {
        self.attrs.get(key)
    }

    /// Remove an attribute key; no-op if absent
    pub fn remove_value(&mut self, key: &[u8]) -> &mut Self {
        self.attrs.remove(key);
        self
    }

    /// The backing attribute store (iteration order feeds the codec)
    pub fn attributes(&self) -> &AttributeStore {
        &self.attrs
    }

    // -------------------------------------------------------------------------
    // Versioning
    // -------------------------------------------------------------------------

    /// Set the maximum number of retained versions (at least 1, and not
    /// below the current minimum)
    pub fn set_max_versions(&mut self, versions: i32) -> Result<&mut Self> {
        if versions < 1 {
            return Err(SchemaError::InvalidArgument(format!(
                "Maximum versions must be positive, got {}",
                versions
            )));
        }
        if versions < self.min_versions()? {
            return Err(SchemaError::InvalidArgument(format!(
                "Maximum versions ({}) must not be less than minimum versions ({})",
                versions,
                self.min_versions()?
            )));
        }
        self.attrs.set(VERSIONS, versions.to_string());
        Ok(self)
    }

    /// Maximum number of retained versions
    pub fn max_versions(&self) -> Result<i32> {
        self.attrs.get_i32(VERSIONS, DEFAULT_VERSIONS)
    }

    /// Set the minimum number of retained versions (non-negative, and not
    /// above the current maximum)
    pub fn set_min_versions(&mut self, versions: i32) -> Result<&mut Self> {
        if versions < 0 {
            return Err(SchemaError::InvalidArgument(format!(
                "Minimum versions must not be negative, got {}",
                versions
            )));
        }
        if versions > self.max_versions()? {
            return Err(SchemaError::InvalidArgument(format!(
                "Minimum versions ({}) must not exceed maximum versions ({})",
                versions,
                self.max_versions()?
            )));
        }
        self.attrs.set(MIN_VERSIONS, versions.to_string());
        Ok(self)
    }

    /// Minimum number of retained versions
    pub fn min_versions(&self) -> Result<i32> {
        self.attrs.get_i32(MIN_VERSIONS, DEFAULT_MIN_VERSIONS)
    }

    // -------------------------------------------------------------------------
    // Time To Live
    // -------------------------------------------------------------------------

    /// Set the TTL in seconds. Negative values are rejected; use [`FOREVER`]
    /// for "never expire".
    pub fn set_time_to_live(&mut self, seconds: i64) -> Result<&mut Self> {
        if seconds < 0 {
            return Err(SchemaError::InvalidArgument(format!(
                "Time-to-live must not be negative, got {}",
                seconds
            )));
        }
        self.attrs.set(TTL, seconds.to_string());
        Ok(self)
    }

    /// Set the TTL from a human-entered duration string such as
    /// `"5 DAYS 3 hours"`, `"50000 seconds"`, or `"FOREVER"`.
    ///
    /// Fails with `ConfigParse` carrying the input if it cannot be parsed.
    pub fn set_time_to_live_str(&mut self, ttl: &str) -> Result<&mut Self> {
        let seconds = pretty::to_seconds(ttl)?;
        self.attrs.set(TTL, seconds.to_string());
        Ok(self)
    }

    /// TTL in seconds ([`FOREVER`] when never expiring)
    pub fn time_to_live(&self) -> Result<i64> {
        self.attrs.get_i64(TTL, DEFAULT_TTL)
    }

    // -------------------------------------------------------------------------
    // Block Storage
    // -------------------------------------------------------------------------

    /// Set the target block size in bytes (must be positive)
    pub fn set_block_size(&mut self, size: i32) -> Result<&mut Self> {
        if size <= 0 {
            return Err(SchemaError::InvalidArgument(format!(
                "Block size must be positive, got {}",
                size
            )));
        }
        self.attrs.set(BLOCKSIZE, size.to_string());
        Ok(self)
    }

    /// Target block size in bytes
    pub fn block_size(&self) -> Result<i32> {
        self.attrs.get_i32(BLOCKSIZE, DEFAULT_BLOCKSIZE)
    }

    /// Set the compression algorithm
    pub fn set_compression(&mut self, algorithm: Compression) -> &mut Self {
        self.attrs.set(COMPRESSION, algorithm.as_str());
        self
    }

    /// Compression algorithm
    pub fn compression(&self) -> Result<Compression> {
        self.attrs
            .get_str(COMPRESSION, DEFAULT_COMPRESSION.as_str())?
            .parse()
    }

    /// Set the bloom filter type
    pub fn set_bloom_filter(&mut self, bloom: BloomFilter) -> &mut Self {
        self.attrs.set(BLOOMFILTER, bloom.as_str());
        self
    }

    /// Bloom filter type
    pub fn bloom_filter(&self) -> Result<BloomFilter> {
        self.attrs
            .get_str(BLOOMFILTER, DEFAULT_BLOOMFILTER.as_str())?
            .parse()
    }

    /// Set the data block encoding
    pub fn set_data_block_encoding(&mut self, encoding: DataBlockEncoding) -> &mut Self {
        self.attrs.set(DATA_BLOCK_ENCODING, encoding.as_str());
        self
    }

    /// Data block encoding
    pub fn data_block_encoding(&self) -> Result<DataBlockEncoding> {
        self.attrs
            .get_str(DATA_BLOCK_ENCODING, DEFAULT_DATA_BLOCK_ENCODING.as_str())?
            .parse()
    }

    // -------------------------------------------------------------------------
    // Caching
    // -------------------------------------------------------------------------

    /// Pin this family's blocks in cache
    pub fn set_in_memory(&mut self, in_memory: bool) -> &mut Self {
        self.attrs.set(IN_MEMORY, bool_str(in_memory));
        self
    }

    /// Whether blocks are pinned in cache
    pub fn in_memory(&self) -> Result<bool> {
        self.attrs.get_bool(IN_MEMORY, DEFAULT_IN_MEMORY)
    }

    /// Enable or disable the block cache for this family
    pub fn set_block_cache_enabled(&mut self, enabled: bool) -> &mut Self {
        self.attrs.set(BLOCKCACHE, bool_str(enabled));
        self
    }

    /// Whether the block cache is enabled
    pub fn block_cache_enabled(&self) -> Result<bool> {
        self.attrs.get_bool(BLOCKCACHE, DEFAULT_BLOCKCACHE)
    }

    // -------------------------------------------------------------------------
    // Deletes and Replication
    // -------------------------------------------------------------------------

    /// Set the keep-deleted-cells policy
    pub fn set_keep_deleted_cells(&mut self, policy: KeepDeletedCells) -> &mut Self {
        self.attrs.set(KEEP_DELETED_CELLS, policy.as_str());
        self
    }

    /// Keep-deleted-cells policy
    pub fn keep_deleted_cells(&self) -> Result<KeepDeletedCells> {
        self.attrs
            .get_str(KEEP_DELETED_CELLS, DEFAULT_KEEP_DELETED.as_str())?
            .parse()
    }

    /// Set the replication scope (non-negative; 0 means local only)
    pub fn set_scope(&mut self, scope: i32) -> Result<&mut Self> {
        if scope < 0 {
            return Err(SchemaError::InvalidArgument(format!(
                "Replication scope must not be negative, got {}",
                scope
            )));
        }
        self.attrs.set(REPLICATION_SCOPE, scope.to_string());
        Ok(self)
    }

    /// Replication scope
    pub fn scope(&self) -> Result<i32> {
        self.attrs
            .get_i32(REPLICATION_SCOPE, DEFAULT_REPLICATION_SCOPE)
    }

    /// Set the per-family filesystem replication factor (non-negative;
    /// 0 means follow the filesystem default)
    pub fn set_dfs_replication(&mut self, replication: i16) -> Result<&mut Self> {
        if replication < 0 {
            return Err(SchemaError::InvalidArgument(format!(
                "DFS replication must not be negative, got {}",
                replication
            )));
        }
        self.attrs.set(DFS_REPLICATION, replication.to_string());
        Ok(self)
    }

    /// Per-family filesystem replication factor
    pub fn dfs_replication(&self) -> Result<i16> {
        let v = self
            .attrs
            .get_i32(DFS_REPLICATION, DEFAULT_DFS_REPLICATION as i32)?;
        i16::try_from(v).map_err(|_| {
            SchemaError::InvalidArgument(format!("DFS replication out of range: {}", v))
        })
    }

    // -------------------------------------------------------------------------
    // Medium Objects (MOB)
    // -------------------------------------------------------------------------

    /// Route oversized values through the medium-object path
    pub fn set_mob_enabled(&mut self, enabled: bool) -> &mut Self {
        self.attrs.set(IS_MOB, bool_str(enabled));
        self
    }

    /// Whether the medium-object path is enabled
    pub fn mob_enabled(&self) -> Result<bool> {
        self.attrs.get_bool(IS_MOB, DEFAULT_MOB)
    }

    /// Set the size in bytes above which a value counts as a medium object
    pub fn set_mob_threshold(&mut self, threshold: i64) -> Result<&mut Self> {
        if threshold < 0 {
            return Err(SchemaError::InvalidArgument(format!(
                "MOB threshold must not be negative, got {}",
                threshold
            )));
        }
        self.attrs.set(MOB_THRESHOLD, threshold.to_string());
        Ok(self)
    }

    /// MOB size threshold in bytes
    pub fn mob_threshold(&self) -> Result<i64> {
        self.attrs.get_i64(MOB_THRESHOLD, DEFAULT_MOB_THRESHOLD)
    }

    // -------------------------------------------------------------------------
    // Configuration Sub-Namespace
    // -------------------------------------------------------------------------
    // String pairs for engine tuning knobs this crate knows nothing about.
    // Kept apart from the attribute set, but part of equality and of the
    // wire form.

    /// Set an engine configuration pair
    pub fn set_configuration(&mut self, key: &str, value: &str) -> &mut Self {
        self.configuration
            .set(key.as_bytes().to_vec(), value.as_bytes().to_vec());
        self
    }

    /// Look up an engine configuration value
    pub fn configuration_value(&self, key: &str) -> Option<String> {
        self.configuration
            .get(key.as_bytes())
            .map(|v| String::from_utf8_lossy(v).into_owned())
    }

    /// Remove an engine configuration pair; no-op if absent
    pub fn remove_configuration(&mut self, key: &str) -> &mut Self {
        self.configuration.remove(key.as_bytes());
        self
    }

    /// The configuration sub-namespace store
    pub fn configuration(&self) -> &AttributeStore {
        &self.configuration
    }

    // -------------------------------------------------------------------------
    // Freezing
    // -------------------------------------------------------------------------

    /// Consume the builder and produce an immutable snapshot.
    pub fn freeze(self) -> FrozenDescriptor {
        FrozenDescriptor { inner: self }
    }

    /// Internal constructor for the codec: assembles a descriptor from
    /// already-validated parts without re-copying.
    pub(crate) fn from_parts(
        name: Bytes,
        attrs: AttributeStore,
        configuration: AttributeStore,
    ) -> Result<Self> {
        check_family_name(&name)?;
        Ok(Self {
            name,
            attrs,
            configuration,
        })
    }
}

impl PartialEq for FamilyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attrs == other.attrs
            && self.configuration == other.configuration
    }
}

impl Eq for FamilyDescriptor {}

impl Hash for FamilyDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.attrs.hash(state);
        self.configuration.hash(state);
    }
}

fn bool_str(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

// =============================================================================
// FrozenDescriptor
// =============================================================================

/// Immutable snapshot of a [`FamilyDescriptor`].
///
/// Exposes the full read API through `Deref` while offering no path to the
/// `&mut self` setters, making the post-build read-only convention a
/// compile-time guarantee. [`thaw`](Self::thaw) recovers a mutable builder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrozenDescriptor {
    inner: FamilyDescriptor,
}

impl FrozenDescriptor {
    /// Recover a mutable descriptor from the snapshot
    pub fn thaw(self) -> FamilyDescriptor {
        self.inner
    }
}

impl Deref for FrozenDescriptor {
    type Target = FamilyDescriptor;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<FamilyDescriptor> for FrozenDescriptor {
    fn from(desc: FamilyDescriptor) -> Self {
        desc.freeze()
    }
}
