//! # colfam
//!
//! Column-family schema descriptors for a storage table, with:
//! - Builder-style chained construction with set-time validation
//! - A lossless, versioned binary wire format (round-trip law)
//! - Tolerant human duration parsing for TTL values
//! - Immutable frozen snapshots for post-build hand-off
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  FamilyDescriptor                           │
//! │        (chained typed setters / getters, equality)          │
//! └──────────┬─────────────────────────────────┬────────────────┘
//!            │                                 │
//!            ▼                                 ▼
//!   ┌─────────────────┐               ┌─────────────────┐
//!   │ AttributeStore  │               │  pretty (TTL)   │
//!   │ (ordered k/v)   │               │ parse / format  │
//!   └────────┬────────┘               └─────────────────┘
//!            │
//!            ▼
//!   ┌─────────────────┐
//!   │      codec      │
//!   │ encode / decode │
//!   └─────────────────┘
//! ```
//!
//! A caller builds a [`FamilyDescriptor`] through chained setters, which
//! write canonical textual encodings into the backing [`AttributeStore`].
//! [`codec::encode`] turns the descriptor into a self-describing byte
//! envelope; [`codec::decode`] reconstructs an equal descriptor, retaining
//! attribute keys it does not recognize. All work is in-memory; nothing
//! blocks or performs I/O.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod attrs;
pub mod codec;
pub mod descriptor;
pub mod error;
pub mod pretty;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use attrs::AttributeStore;
pub use descriptor::{
    BloomFilter, Compression, DataBlockEncoding, FamilyDescriptor, FrozenDescriptor,
    KeepDeletedCells, FOREVER,
};
pub use error::{Result, SchemaError};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of colfam
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
