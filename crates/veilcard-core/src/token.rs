//! # Token Identifiers
//!
//! Newtype wrapper for card token ids. Ids are assigned by the ledger as
//! a monotonically increasing sequence starting at 1; id 0 never exists.
//! There is no burn operation, so no id is ever reused.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card.
///
/// Assigned at mint as `total_supply + 1`. Immutable for the lifetime of
/// the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl TokenId {
    /// The first id the ledger will ever assign.
    pub const FIRST: TokenId = TokenId(1);

    /// Access the inner integer value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The id that follows this one in mint order.
    pub fn next(&self) -> TokenId {
        TokenId(self.0 + 1)
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card:{}", self.0)
    }
}

impl From<u64> for TokenId {
    fn from(id: u64) -> Self {
        TokenId(id)
    }
}
