//! Enumerated attribute value types
//!
//! Closed value sets for the enum-typed attributes. Each type round-trips
//! through its canonical uppercase name, which is the textual encoding
//! stored in the attribute store and carried on the wire. Membership is
//! validated when parsing: a name outside the closed set is rejected with
//! InvalidArgument.

use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;

// =============================================================================
// Compression
// =============================================================================

/// Compression algorithm applied to stored blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
    None,
    Gz,
    Lz4,
    Snappy,
    Zstd,
}

impl Compression {
    /// Canonical stored name
    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::None => "NONE",
            Compression::Gz => "GZ",
            Compression::Lz4 => "LZ4",
            Compression::Snappy => "SNAPPY",
            Compression::Zstd => "ZSTD",
        }
    }
}

impl FromStr for Compression {
    type Err = SchemaError;

    /// Case-insensitive parse; fails for names outside the closed set
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(Compression::None),
            "GZ" => Ok(Compression::Gz),
            "LZ4" => Ok(Compression::Lz4),
            "SNAPPY" => Ok(Compression::Snappy),
            "ZSTD" => Ok(Compression::Zstd),
            _ => Err(SchemaError::InvalidArgument(format!(
                "Unknown compression algorithm: '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// BloomFilter
// =============================================================================

/// Bloom filter kind used for read short-circuiting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BloomFilter {
    None,
    Row,
    RowCol,
}

impl BloomFilter {
    /// Canonical stored name
    pub fn as_str(&self) -> &'static str {
        match self {
            BloomFilter::None => "NONE",
            BloomFilter::Row => "ROW",
            BloomFilter::RowCol => "ROWCOL",
        }
    }
}

impl FromStr for BloomFilter {
    type Err = SchemaError;

    /// Case-insensitive parse; fails for names outside the closed set
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(BloomFilter::None),
            "ROW" => Ok(BloomFilter::Row),
            "ROWCOL" => Ok(BloomFilter::RowCol),
            _ => Err(SchemaError::InvalidArgument(format!(
                "Unknown bloom filter type: '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for BloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// DataBlockEncoding
// =============================================================================

/// Encoding applied to keys inside data blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataBlockEncoding {
    None,
    Prefix,
    Diff,
    FastDiff,
    RowIndexV1,
}

impl DataBlockEncoding {
    /// Canonical stored name
    pub fn as_str(&self) -> &'static str {
        match self {
            DataBlockEncoding::None => "NONE",
            DataBlockEncoding::Prefix => "PREFIX",
            DataBlockEncoding::Diff => "DIFF",
            DataBlockEncoding::FastDiff => "FAST_DIFF",
            DataBlockEncoding::RowIndexV1 => "ROW_INDEX_V1",
        }
    }
}

impl FromStr for DataBlockEncoding {
    type Err = SchemaError;

    /// Case-insensitive parse; fails for names outside the closed set
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(DataBlockEncoding::None),
            "PREFIX" => Ok(DataBlockEncoding::Prefix),
            "DIFF" => Ok(DataBlockEncoding::Diff),
            "FAST_DIFF" => Ok(DataBlockEncoding::FastDiff),
            "ROW_INDEX_V1" => Ok(DataBlockEncoding::RowIndexV1),
            _ => Err(SchemaError::InvalidArgument(format!(
                "Unknown data block encoding: '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for DataBlockEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// KeepDeletedCells
// =============================================================================

/// Whether deleted cells remain visible to reads at older timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeepDeletedCells {
    /// Deleted cells are purged at the next compaction
    False,
    /// Deleted cells are kept as long as version/TTL limits allow
    True,
    /// Deleted cells are kept until their TTL expires, ignoring version limits
    Ttl,
}

impl KeepDeletedCells {
    /// Canonical stored name
    pub fn as_str(&self) -> &'static str {
        match self {
            KeepDeletedCells::False => "FALSE",
            KeepDeletedCells::True => "TRUE",
            KeepDeletedCells::Ttl => "TTL",
        }
    }
}

impl FromStr for KeepDeletedCells {
    type Err = SchemaError;

    /// Case-insensitive parse; fails for names outside the closed set
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FALSE" => Ok(KeepDeletedCells::False),
            "TRUE" => Ok(KeepDeletedCells::True),
            "TTL" => Ok(KeepDeletedCells::Ttl),
            _ => Err(SchemaError::InvalidArgument(format!(
                "Unknown keep-deleted-cells policy: '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for KeepDeletedCells {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
