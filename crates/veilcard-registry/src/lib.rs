//! # veilcard-registry — The Card Ledger
//!
//! The authoritative state machine for uniquely owned collectible cards
//! whose stats, and whose ownership shadow, live behind ciphertext
//! handles.
//!
//! ## Architecture
//!
//! - **Cards** (`card.rs`): the per-card record — plaintext metadata, the
//!   fixed-order encrypted attribute bundle, the plaintext owner used for
//!   all authorization, and the encrypted owner shadow refreshed on
//!   confidential transfers.
//!
//! - **Ledger** (`ledger.rs`): `CardLedger` is an arena of card records
//!   indexed by token id, and the single mutation gateway. Every write
//!   path validates fully before mutating, so a rejected operation leaves
//!   no partial state. Proofs are single-use: the ledger records the
//!   digest of every admitted proof and rejects replays.
//!
//! - **Events** (`event.rs`): ordered, timestamped records of every
//!   mutation, in admission order.
//!
//! ## Dual-Channel Ownership
//!
//! The plaintext `owner` field answers every authorization and
//! enumeration question. The `encrypted_owner` handle is a confidential
//! shadow of the same fact, refreshed only by the confidential transfer
//! path. A standard `transfer_from` deliberately leaves the shadow (and
//! the attribute decryption grants) untouched — the shadow is
//! best-effort, confidential-path-only, and goes stale until the next
//! confidential transfer. See DESIGN.md for the recorded decision.

pub mod card;
pub mod error;
pub mod event;
pub mod ledger;

pub use card::{AttributeBundle, Card};
pub use error::RegistryError;
pub use event::{ChannelKind, EventRecord, LedgerEvent};
pub use ledger::CardLedger;
