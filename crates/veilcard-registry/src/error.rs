//! # Error Types — Ledger Operation Failures
//!
//! Every variant is fatal to the operation that raised it, and no
//! operation writes any state before its last possible error point.

use thiserror::Error;
use veilcard_core::{Address, TokenId};

/// Errors raised by the card ledger's mutation gateway and queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The proof blob does not bind the submitted handles, caller, and
    /// registry address — or it was already consumed by an earlier
    /// operation.
    #[error("invalid input proof")]
    InvalidProof,

    /// The caller lacks owner or approval rights over the card.
    #[error("{caller} is not authorized for {token_id}")]
    NotAuthorized {
        /// The card the operation targeted.
        token_id: TokenId,
        /// The principal whose call was refused.
        caller: Address,
    },

    /// No card exists with this token id.
    #[error("{0} does not exist")]
    NotFound(TokenId),

    /// A required plaintext metadata field was empty.
    #[error("metadata field {field:?} must be non-empty")]
    InvalidMetadata {
        /// The offending field name.
        field: &'static str,
    },

    /// The zero address is not a legal transfer destination.
    #[error("the zero address is not a valid destination")]
    InvalidDestination,
}
