//! # Ciphertext Handles
//!
//! `CiphertextHandle` is the opaque reference type for encrypted values.
//! Handle position within an admission batch is the sole identifier of
//! which attribute a ciphertext represents — there is no accompanying
//! tag — so the types here deliberately offer nothing beyond identity,
//! ordering (for map keys), and serialization.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use veilcard_core::Address;

/// The plaintext type a ciphertext handle stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleType {
    /// A 32-bit unsigned integer (card stats).
    Uint32,
    /// An account address (ownership shadow).
    Address,
}

impl std::fmt::Display for HandleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Uint32 => "euint32",
            Self::Address => "eaddress",
        };
        f.write_str(s)
    }
}

/// A typed plaintext value destined for encryption.
///
/// The builder collects these in admission order; the coprocessor vault
/// stores them keyed by the handle it derives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaintextValue {
    /// A 32-bit unsigned integer.
    Uint32(u32),
    /// An account address.
    Address(Address),
}

impl PlaintextValue {
    /// The handle type this value encrypts to.
    pub fn handle_type(&self) -> HandleType {
        match self {
            Self::Uint32(_) => HandleType::Uint32,
            Self::Address(_) => HandleType::Address,
        }
    }
}

/// An opaque reference to an encrypted value.
///
/// The registry stores and compares handles; only the coprocessor can
/// exchange one for plaintext, and only for an authorized requester.
/// Serializes as a `0x`-prefixed lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CiphertextHandle(pub [u8; 32]);

impl CiphertextHandle {
    /// Create a handle from raw 32 bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw 32-byte handle.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the handle as a `0x`-prefixed lowercase hex string.
    pub fn to_hex(&self) -> String {
        let body: String = self.0.iter().map(|b| format!("{b:02x}")).collect();
        format!("0x{body}")
    }

    /// Parse a handle from a hex string, with or without `0x` prefix.
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let hex = hex.trim();
        let hex = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X")).unwrap_or(hex);
        if hex.len() != 64 {
            return Err(format!("handle hex must be 64 chars, got {}", hex.len()));
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in (0..hex.len()).step_by(2).enumerate() {
            bytes[i] = u8::from_str_radix(&hex[chunk..chunk + 2], 16)
                .map_err(|e| format!("invalid hex at position {chunk}: {e}"))?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for CiphertextHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CiphertextHandle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for CiphertextHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "CiphertextHandle(0x{prefix}...)")
    }
}

impl std::fmt::Display for CiphertextHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
