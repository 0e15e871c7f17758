//! # Confidential Compute Trait (Sealed)
//!
//! The contract between the card ledger and the coprocessor that holds
//! ciphertext material. The ledger calls three things across this
//! boundary: batch encryption (via the input builder), access grants, and
//! authorized decryption. It never sees plaintext attribute values
//! itself.
//!
//! ## Sealed Trait
//!
//! `ConfidentialCompute` is **sealed**: only implementations defined
//! within `veilcard-fhe` can exist. External crates cannot inject an
//! alternative coprocessor that, for example, skips the access-control
//! check on decryption.

use veilcard_core::Address;

use crate::builder::EncryptedInput;
use crate::error::FheError;
use crate::handle::{CiphertextHandle, PlaintextValue};

/// Private module that seals the [`ConfidentialCompute`] trait.
mod private {
    /// Sealing marker trait. Not accessible outside `veilcard-fhe`.
    pub trait Sealed {}

    impl Sealed for crate::mock::MockCoprocessor {}
}

/// Sealed interface to the confidential compute service.
///
/// The trait is object-safe: the ledger takes `&mut dyn
/// ConfidentialCompute` so registry code is independent of which backend
/// is wired in. `Send + Sync` supports concurrent read-only decryption
/// serving.
pub trait ConfidentialCompute: private::Sealed + Send + Sync {
    /// Encrypt an ordered batch of plaintext values for `caller` against
    /// `registry`, returning one handle per value (same order) and a
    /// single proof binding the entire batch.
    ///
    /// The caller is granted transient decryption access to every handle
    /// produced. All-or-nothing: on error, no handles exist.
    ///
    /// # Errors
    ///
    /// [`FheError::ServiceUnavailable`] if the service is unreachable,
    /// [`FheError::BatchRejected`] for an empty or oversized batch.
    fn encrypt_batch(
        &mut self,
        registry: Address,
        caller: Address,
        values: &[PlaintextValue],
    ) -> Result<EncryptedInput, FheError>;

    /// Grant `grantee` decryption access to `handle`.
    ///
    /// Only the ledger calls this, as part of mint and confidential
    /// transfer admission.
    ///
    /// # Errors
    ///
    /// [`FheError::UnknownHandle`] if the handle references no known
    /// ciphertext.
    fn allow(&mut self, handle: &CiphertextHandle, grantee: Address) -> Result<(), FheError>;

    /// Whether `requester` currently holds decryption access to `handle`.
    fn is_allowed(&self, handle: &CiphertextHandle, requester: Address) -> bool;

    /// Reveal the 32-bit integer behind `handle` to `requester`.
    ///
    /// # Errors
    ///
    /// [`FheError::UnknownHandle`], [`FheError::DecryptionDenied`] if the
    /// requester is not on the handle's access list, or
    /// [`FheError::HandleTypeMismatch`] if the handle carries an address.
    fn decrypt_u32(&self, handle: &CiphertextHandle, requester: Address) -> Result<u32, FheError>;

    /// Reveal the address behind `handle` to `requester`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ConfidentialCompute::decrypt_u32`], with the
    /// type expectation reversed.
    fn decrypt_address(
        &self,
        handle: &CiphertextHandle,
        requester: Address,
    ) -> Result<Address, FheError>;
}
