//! # Error Types — Core Error Hierarchy
//!
//! Defines the error types shared across the veilcard workspace. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Canonicalization errors fail loudly with full context — a digest
//!   computed over the wrong byte sequence is worse than no digest.
//! - Address parsing errors report the offending input shape, never the
//!   full input (addresses can be attacker-controlled strings).

use thiserror::Error;

/// Top-level error type for core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Address parsing or validation failed.
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Timestamp parsing failed.
    #[error("timestamp error: {0}")]
    Timestamp(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Stats and identifiers must be integers or strings.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error parsing or validating an account address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The hex string has the wrong length for a 20-byte address.
    #[error("address hex must be 40 chars (plus optional 0x prefix), got {0}")]
    BadLength(usize),

    /// The string contains non-hexadecimal characters.
    #[error("invalid hex at position {0}")]
    BadHex(usize),
}
