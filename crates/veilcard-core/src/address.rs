//! # Account Addresses
//!
//! A 20-byte account address, rendered as `0x`-prefixed lowercase hex.
//! Addresses identify callers, owners, operators, and the registry
//! itself — one flat namespace, matching the ledger the original system
//! targets.
//!
//! ## Security Invariant
//!
//! `Address::ZERO` is a valid value (it is the "no approval" sentinel in
//! query output) but the ledger rejects it as a transfer destination.
//! The type does not enforce that rule — the mutation gateway does.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AddressError;

/// A 20-byte account address.
///
/// Serializes as a `0x`-prefixed lowercase hex string for JSON
/// interoperability.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address. Used as the "nobody" sentinel in approval
    /// queries; never a legal transfer destination.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create an address from raw 20 bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Return the raw 20-byte address.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Generate a fresh random address.
    ///
    /// Stand-in for key-derived account creation; used by the CLI when
    /// initializing a registry instance.
    pub fn random() -> Self {
        let mut bytes = [0u8; 20];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes[..]);
        Self(bytes)
    }

    /// Whether this is the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Render the address as a `0x`-prefixed lowercase hex string.
    pub fn to_hex(&self) -> String {
        let body: String = self.0.iter().map(|b| format!("{b:02x}")).collect();
        format!("0x{body}")
    }

    /// Parse an address from a hex string, with or without `0x` prefix.
    ///
    /// Accepts mixed case; canonical output is always lowercase.
    pub fn from_hex(hex: &str) -> Result<Self, AddressError> {
        let hex = hex.trim();
        let hex = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X")).unwrap_or(hex);
        if hex.len() != 40 {
            return Err(AddressError::BadLength(hex.len()));
        }
        let mut bytes = [0u8; 20];
        for (i, chunk) in (0..hex.len()).step_by(2).enumerate() {
            bytes[i] = u8::from_str_radix(&hex[chunk..chunk + 2], 16)
                .map_err(|_| AddressError::BadHex(chunk))?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "Address(0x{prefix}...)")
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
