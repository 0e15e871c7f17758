//! # Ledger Events
//!
//! Ordered, timestamped records of every successful mutation. The event
//! log is append-only and lives inside the ledger snapshot, so replaying
//! history after a save/load cycle needs no external store.

use serde::{Deserialize, Serialize};
use veilcard_core::{Address, Timestamp, TokenId};

/// Which transfer path moved a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    /// `transfer_from` — plaintext channel only.
    Standard,
    /// Confidential transfer — refreshes the encrypted owner shadow.
    Confidential,
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Standard => "standard",
            Self::Confidential => "confidential",
        };
        f.write_str(s)
    }
}

/// A single ledger mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A card was minted.
    CardMinted {
        /// The new card's id.
        token_id: TokenId,
        /// The minting caller, now the owner.
        owner: Address,
    },
    /// A card changed hands.
    CardTransferred {
        /// The card that moved.
        token_id: TokenId,
        /// Previous owner.
        from: Address,
        /// New owner.
        to: Address,
        /// Which transfer path was used.
        channel: ChannelKind,
    },
    /// The single-slot approval for a card changed.
    Approval {
        /// The card.
        token_id: TokenId,
        /// The card's owner at approval time.
        owner: Address,
        /// The approved operator, or `None` if the slot was cleared.
        operator: Option<Address>,
    },
    /// A global operator grant changed.
    ApprovalForAll {
        /// The granting owner.
        owner: Address,
        /// The operator.
        operator: Address,
        /// Whether the grant is now active.
        approved: bool,
    },
}

/// An event with its admission timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// When the mutation was admitted.
    pub at: Timestamp,
    /// What happened.
    pub event: LedgerEvent,
}

impl EventRecord {
    /// Record an event at the current time.
    pub fn now(event: LedgerEvent) -> Self {
        Self {
            at: Timestamp::now(),
            event,
        }
    }
}
