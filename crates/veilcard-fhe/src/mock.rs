//! # Mock Coprocessor
//!
//! An in-process stand-in for the confidential compute service. The
//! "ciphertext" vault keeps plaintexts keyed by derived handles, and the
//! per-handle access-control list is the selective-decryption mechanism.
//!
//! ## Security Notice
//!
//! This implementation provides NO cryptographic privacy. It preserves
//! the protocol's observable behavior — opaque handles, batch-bound
//! proofs, owner-only decryption — so the admission and authorization
//! paths can be exercised end to end in tests and the CLI.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use veilcard_core::{sha256_digest, Address, CanonicalBytes};

use crate::builder::{EncryptedInput, MAX_BATCH_VALUES};
use crate::error::FheError;
use crate::handle::{CiphertextHandle, HandleType, PlaintextValue};
use crate::proof::InputProof;
use crate::traits::ConfidentialCompute;

/// Record the handle derivation digest commits to. A fresh batch id per
/// round trip keeps equal plaintexts from producing equal handles.
#[derive(Serialize)]
struct HandleSeed<'a> {
    batch: &'a str,
    index: usize,
    kind: HandleType,
}

/// In-process confidential compute service with a plaintext vault and a
/// per-handle access-control list.
///
/// Serializable so the CLI can snapshot coprocessor state alongside the
/// ledger. The availability toggle is runtime-only.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MockCoprocessor {
    /// Plaintexts keyed by the handle derived at encryption time.
    vault: BTreeMap<CiphertextHandle, PlaintextValue>,
    /// Principals granted decryption access, per handle.
    acl: BTreeMap<CiphertextHandle, BTreeSet<Address>>,
    /// Simulated outage flag. Not persisted.
    #[serde(skip)]
    offline: bool,
}

impl MockCoprocessor {
    /// Create an empty coprocessor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the service being unreachable. While offline, every
    /// batch build fails with [`FheError::ServiceUnavailable`].
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Number of ciphertexts in the vault. Test observability.
    pub fn vault_len(&self) -> usize {
        self.vault.len()
    }

    fn derive_handle(batch: &str, index: usize, kind: HandleType) -> Result<CiphertextHandle, FheError> {
        let seed = HandleSeed { batch, index, kind };
        let bytes = CanonicalBytes::new(&seed).map_err(|e| FheError::Binding(e.to_string()))?;
        Ok(CiphertextHandle::from_bytes(sha256_digest(&bytes).0))
    }
}

impl ConfidentialCompute for MockCoprocessor {
    fn encrypt_batch(
        &mut self,
        registry: Address,
        caller: Address,
        values: &[PlaintextValue],
    ) -> Result<EncryptedInput, FheError> {
        if self.offline {
            return Err(FheError::ServiceUnavailable);
        }
        if values.is_empty() {
            return Err(FheError::BatchRejected("empty batch".to_string()));
        }
        if values.len() > MAX_BATCH_VALUES {
            return Err(FheError::BatchRejected(format!(
                "batch of {} values exceeds cap of {MAX_BATCH_VALUES}",
                values.len()
            )));
        }

        // Derive all handles before touching the vault: a failed
        // derivation must not leave a partial batch behind.
        let batch = Uuid::new_v4().to_string();
        let mut handles = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            handles.push(Self::derive_handle(&batch, index, value.handle_type())?);
        }
        let proof = InputProof::compute(registry, caller, &handles)?;

        for (handle, value) in handles.iter().zip(values) {
            self.vault.insert(*handle, *value);
            // Transient builder grant: the caller who supplied the
            // plaintext can always read it back.
            self.acl.entry(*handle).or_default().insert(caller);
        }

        Ok(EncryptedInput { handles, proof })
    }

    fn allow(&mut self, handle: &CiphertextHandle, grantee: Address) -> Result<(), FheError> {
        if !self.vault.contains_key(handle) {
            return Err(FheError::UnknownHandle(*handle));
        }
        self.acl.entry(*handle).or_default().insert(grantee);
        Ok(())
    }

    fn is_allowed(&self, handle: &CiphertextHandle, requester: Address) -> bool {
        self.acl
            .get(handle)
            .is_some_and(|grants| grants.contains(&requester))
    }

    fn decrypt_u32(&self, handle: &CiphertextHandle, requester: Address) -> Result<u32, FheError> {
        let value = self
            .vault
            .get(handle)
            .ok_or(FheError::UnknownHandle(*handle))?;
        if !self.is_allowed(handle, requester) {
            return Err(FheError::DecryptionDenied { requester });
        }
        match value {
            PlaintextValue::Uint32(v) => Ok(*v),
            PlaintextValue::Address(_) => Err(FheError::HandleTypeMismatch {
                expected: HandleType::Uint32,
                actual: HandleType::Address,
            }),
        }
    }

    fn decrypt_address(
        &self,
        handle: &CiphertextHandle,
        requester: Address,
    ) -> Result<Address, FheError> {
        let value = self
            .vault
            .get(handle)
            .ok_or(FheError::UnknownHandle(*handle))?;
        if !self.is_allowed(handle, requester) {
            return Err(FheError::DecryptionDenied { requester });
        }
        match value {
            PlaintextValue::Address(a) => Ok(*a),
            PlaintextValue::Uint32(_) => Err(FheError::HandleTypeMismatch {
                expected: HandleType::Address,
                actual: HandleType::Uint32,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    fn encrypt_one(coproc: &mut MockCoprocessor, caller: Address, v: u32) -> CiphertextHandle {
        let input = coproc
            .encrypt_batch(addr(0xaa), caller, &[PlaintextValue::Uint32(v)])
            .unwrap();
        input.handles[0]
    }

    #[test]
    fn test_builder_caller_can_decrypt() {
        let mut coproc = MockCoprocessor::new();
        let alice = addr(1);
        let handle = encrypt_one(&mut coproc, alice, 50);
        assert_eq!(coproc.decrypt_u32(&handle, alice).unwrap(), 50);
    }

    #[test]
    fn test_non_granted_requester_denied() {
        let mut coproc = MockCoprocessor::new();
        let alice = addr(1);
        let mallory = addr(9);
        let handle = encrypt_one(&mut coproc, alice, 50);
        let err = coproc.decrypt_u32(&handle, mallory).unwrap_err();
        assert!(matches!(err, FheError::DecryptionDenied { requester } if requester == mallory));
    }

    #[test]
    fn test_allow_extends_access() {
        let mut coproc = MockCoprocessor::new();
        let alice = addr(1);
        let bob = addr(2);
        let handle = encrypt_one(&mut coproc, alice, 50);
        assert!(!coproc.is_allowed(&handle, bob));
        coproc.allow(&handle, bob).unwrap();
        assert_eq!(coproc.decrypt_u32(&handle, bob).unwrap(), 50);
    }

    #[test]
    fn test_unknown_handle() {
        let mut coproc = MockCoprocessor::new();
        let ghost = CiphertextHandle::from_bytes([0xde; 32]);
        assert!(matches!(
            coproc.decrypt_u32(&ghost, addr(1)),
            Err(FheError::UnknownHandle(_))
        ));
        assert!(matches!(
            coproc.allow(&ghost, addr(1)),
            Err(FheError::UnknownHandle(_))
        ));
    }

    #[test]
    fn test_type_mismatch() {
        let mut coproc = MockCoprocessor::new();
        let alice = addr(1);
        let input = coproc
            .encrypt_batch(addr(0xaa), alice, &[PlaintextValue::Address(alice)])
            .unwrap();
        let err = coproc.decrypt_u32(&input.handles[0], alice).unwrap_err();
        assert!(matches!(err, FheError::HandleTypeMismatch { .. }));
    }

    #[test]
    fn test_equal_plaintexts_get_distinct_handles() {
        let mut coproc = MockCoprocessor::new();
        let alice = addr(1);
        let h1 = encrypt_one(&mut coproc, alice, 42);
        let h2 = encrypt_one(&mut coproc, alice, 42);
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_offline_rejects_batches() {
        let mut coproc = MockCoprocessor::new();
        coproc.set_offline(true);
        let result = coproc.encrypt_batch(addr(0xaa), addr(1), &[PlaintextValue::Uint32(1)]);
        assert!(matches!(result, Err(FheError::ServiceUnavailable)));
        coproc.set_offline(false);
        assert!(coproc
            .encrypt_batch(addr(0xaa), addr(1), &[PlaintextValue::Uint32(1)])
            .is_ok());
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_vault_and_acl() {
        let mut coproc = MockCoprocessor::new();
        let alice = addr(1);
        let bob = addr(2);
        let handle = encrypt_one(&mut coproc, alice, 77);
        coproc.allow(&handle, bob).unwrap();

        let json = serde_json::to_string(&coproc).unwrap();
        let restored: MockCoprocessor = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.decrypt_u32(&handle, alice).unwrap(), 77);
        assert_eq!(restored.decrypt_u32(&handle, bob).unwrap(), 77);
        assert!(matches!(
            restored.decrypt_u32(&handle, addr(9)),
            Err(FheError::DecryptionDenied { .. })
        ));
    }
}
