//! # Error Types — Confidential Compute Boundary
//!
//! Client-side and boundary errors. None of these ever surface from
//! inside a ledger mutation: encryption happens strictly before the
//! registry call, and decryption is read-only.

use thiserror::Error;
use veilcard_core::Address;

use crate::handle::{CiphertextHandle, HandleType};

/// Errors raised at the confidential compute boundary.
#[derive(Error, Debug)]
pub enum FheError {
    /// The coprocessor is unreachable. Retryable by the invoking
    /// collaborator; never reaches the ledger.
    #[error("confidential compute service unavailable")]
    ServiceUnavailable,

    /// The batch was rejected before encryption (empty, over the value
    /// cap). No handles were produced.
    #[error("encrypted input batch rejected: {0}")]
    BatchRejected(String),

    /// The handle does not reference any ciphertext known to the
    /// coprocessor.
    #[error("unknown ciphertext handle {0}")]
    UnknownHandle(CiphertextHandle),

    /// The requester is not on the access-control list for the handle.
    #[error("decryption denied for {requester}")]
    DecryptionDenied {
        /// The principal whose request was refused.
        requester: Address,
    },

    /// The handle references a ciphertext of a different type than the
    /// decryption call expects.
    #[error("handle type mismatch: expected {expected}, found {actual}")]
    HandleTypeMismatch {
        /// Type the caller asked to decrypt.
        expected: HandleType,
        /// Type the handle actually carries.
        actual: HandleType,
    },

    /// The binding record could not be canonicalized. Indicates a bug in
    /// the batch encoding, not a caller error.
    #[error("proof binding failed: {0}")]
    Binding(String),
}
