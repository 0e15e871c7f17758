//! # Input Proofs — Batch-Scoped Binding
//!
//! An `InputProof` attests that every handle in an admission batch was
//! honestly derived, in order, for a specific caller against a specific
//! registry address. The attestation is a digest over the canonical
//! encoding of (registry, caller, ordered handles): change the target,
//! the caller, the handle set, or the order, and the digest no longer
//! matches.
//!
//! This mock proof carries no zero-knowledge guarantees — the real
//! system's proof object is consumed opaquely at the same interface. What
//! the digest construction does preserve is the binding property the
//! ledger relies on: a proof built for one batch cannot admit a subset,
//! a reordering, or a different context.

use serde::{Deserialize, Serialize};
use veilcard_core::{sha256_digest, Address, CanonicalBytes, ContentDigest};

use crate::error::FheError;
use crate::handle::CiphertextHandle;

/// The record the binding digest commits to.
///
/// Field names are part of the wire format — both sides of the boundary
/// must canonicalize identically.
#[derive(Serialize)]
struct BindingRecord<'a> {
    registry: Address,
    caller: Address,
    handles: &'a [CiphertextHandle],
}

/// A proof blob binding an ordered handle batch to (caller, registry).
///
/// Single-use at the ledger: the registry records the digest of every
/// admitted proof and rejects replays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputProof {
    digest: ContentDigest,
}

impl InputProof {
    /// Compute the proof for an ordered handle batch.
    ///
    /// Called by the coprocessor at batch build time. The ledger never
    /// calls this with plaintext knowledge — it only recomputes the
    /// binding from the handles submitted to it.
    pub fn compute(
        registry: Address,
        caller: Address,
        handles: &[CiphertextHandle],
    ) -> Result<Self, FheError> {
        let record = BindingRecord {
            registry,
            caller,
            handles,
        };
        let bytes = CanonicalBytes::new(&record).map_err(|e| FheError::Binding(e.to_string()))?;
        Ok(Self {
            digest: sha256_digest(&bytes),
        })
    }

    /// Whether this proof binds exactly the given context and ordered
    /// handle batch.
    ///
    /// Returns `false` for any mismatch — different registry, different
    /// caller, missing or extra handles, or a reordered batch.
    pub fn covers(&self, registry: Address, caller: Address, handles: &[CiphertextHandle]) -> bool {
        match Self::compute(registry, caller, handles) {
            Ok(expected) => expected.digest == self.digest,
            Err(_) => false,
        }
    }

    /// The binding digest. Used by the ledger as the replay-tracking key.
    pub fn digest(&self) -> ContentDigest {
        self.digest
    }
}
