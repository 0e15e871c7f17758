//! # Encrypted Input Builder
//!
//! Client-side assembler for admission batches. Values are appended in
//! the order the target registry operation expects them — position is
//! the only thing identifying which value is which, so admission-order
//! errors here are silent and must be covered by tests at the call site.

use serde::{Deserialize, Serialize};
use veilcard_core::Address;

use crate::error::FheError;
use crate::handle::{CiphertextHandle, PlaintextValue};
use crate::proof::InputProof;
use crate::traits::ConfidentialCompute;

/// Upper bound on values per batch.
///
/// The admission surface only ever needs five (mint) or two (transfer);
/// the cap bounds coprocessor round-trip size.
pub const MAX_BATCH_VALUES: usize = 8;

/// The result of a successful batch build: one handle per input value,
/// in input order, and a single proof binding the entire batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedInput {
    /// Ciphertext handles, one-to-one with the builder's values.
    pub handles: Vec<CiphertextHandle>,
    /// Proof blob covering (caller, registry, ordered handle set).
    pub proof: InputProof,
}

/// Ordered assembler for one encrypted-input batch.
///
/// ```text
/// let input = EncryptedInputBuilder::new(registry, caller)
///     .add_u32(level)
///     .add_u32(hp)
///     .add_u32(attack)
///     .add_u32(defense)
///     .add_address(owner)
///     .encrypt(&mut coprocessor)?;
/// ```
#[derive(Debug, Clone)]
pub struct EncryptedInputBuilder {
    registry: Address,
    caller: Address,
    values: Vec<PlaintextValue>,
}

impl EncryptedInputBuilder {
    /// Start a batch for `caller` targeting `registry`.
    pub fn new(registry: Address, caller: Address) -> Self {
        Self {
            registry,
            caller,
            values: Vec::new(),
        }
    }

    /// Append a 32-bit unsigned integer to the batch.
    pub fn add_u32(mut self, value: u32) -> Self {
        self.values.push(PlaintextValue::Uint32(value));
        self
    }

    /// Append an account address to the batch.
    pub fn add_address(mut self, address: Address) -> Self {
        self.values.push(PlaintextValue::Address(address));
        self
    }

    /// Number of values queued so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the batch is still empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Perform the round trip to the coprocessor.
    ///
    /// This is the only suspension point in the client path. No registry
    /// state is touched; a failed build leaves nothing behind.
    ///
    /// # Errors
    ///
    /// [`FheError::BatchRejected`] for an empty batch or one over
    /// [`MAX_BATCH_VALUES`]; [`FheError::ServiceUnavailable`] if the
    /// coprocessor is unreachable.
    pub fn encrypt(
        self,
        service: &mut dyn ConfidentialCompute,
    ) -> Result<EncryptedInput, FheError> {
        if self.values.is_empty() {
            return Err(FheError::BatchRejected("empty batch".to_string()));
        }
        if self.values.len() > MAX_BATCH_VALUES {
            return Err(FheError::BatchRejected(format!(
                "batch of {} values exceeds cap of {MAX_BATCH_VALUES}",
                self.values.len()
            )));
        }
        service.encrypt_batch(self.registry, self.caller, &self.values)
    }
}
