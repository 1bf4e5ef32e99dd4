//! Error types for colfam
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SchemaError
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Unified error type for colfam operations
#[derive(Debug, Error)]
pub enum SchemaError {
    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    /// Raised synchronously by constructors and setters: illegal family name,
    /// negative numeric attribute, enum value outside its closed set, or a
    /// stored value that cannot be decoded as the requested type.
    #[error("{0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Duration Parsing Errors
    // -------------------------------------------------------------------------
    /// Malformed TTL/duration string. Carries the offending input.
    #[error("Invalid time-to-live string: {input}")]
    ConfigParse { input: String },

    // -------------------------------------------------------------------------
    // Wire Format Errors
    // -------------------------------------------------------------------------
    /// Magic/version mismatch, truncated or structurally inconsistent payload.
    /// Decode fails cleanly: no partially-built descriptor escapes.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}
