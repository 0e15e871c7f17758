//! # veilcard-fhe — Confidential Compute Boundary
//!
//! Everything the card ledger knows about encrypted values lives in this
//! crate: opaque ciphertext handles, the ordered encrypted-input batch
//! protocol with its binding proof, and the coprocessor interface behind
//! which the actual homomorphic arithmetic lives.
//!
//! ## Architecture
//!
//! - **Handles** (`handle.rs`): `CiphertextHandle` is an external
//!   capability reference — an owned opaque token with no structural
//!   operations except store, compare, and pass-to-decrypt. The ledger
//!   never inspects its bytes.
//!
//! - **Proofs** (`proof.rs`): `InputProof` binds an entire ordered batch
//!   of handles to a (registry, caller) pair. A registry must not accept
//!   a subset of handles from a proof built for a different batch,
//!   caller, or target — the binding digest covers all three.
//!
//! - **Builder** (`builder.rs`): `EncryptedInputBuilder` assembles an
//!   ordered list of typed plaintext values and performs the single
//!   round trip to the coprocessor. Failure surfaces as a build error,
//!   never a partial result.
//!
//! - **Traits** (`traits.rs`): The sealed `ConfidentialCompute` trait is
//!   the compile-time contract between the ledger and any coprocessor
//!   implementation. Sealing prevents unauthorized backends from being
//!   injected into the system.
//!
//! - **Mock** (`mock.rs`): `MockCoprocessor` keeps plaintexts in an
//!   in-process vault with a per-handle access-control list. It provides
//!   NO cryptographic privacy; it exists so the admission and
//!   authorization protocol is exercisable end to end without external
//!   services.
//!
//! ## Crate Policy
//!
//! - Depends only on `veilcard-core` internally.
//! - No `unsafe` code.

pub mod builder;
pub mod error;
pub mod handle;
pub mod mock;
pub mod proof;
pub mod traits;

pub use builder::{EncryptedInput, EncryptedInputBuilder, MAX_BATCH_VALUES};
pub use error::FheError;
pub use handle::{CiphertextHandle, HandleType, PlaintextValue};
pub use mock::MockCoprocessor;
pub use proof::InputProof;
pub use traits::ConfidentialCompute;
