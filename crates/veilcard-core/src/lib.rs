//! # veilcard-core — Foundational Types for the Card Registry
//!
//! This crate is the bedrock of the veilcard workspace. It defines the
//! type-system primitives shared by the confidential compute boundary and
//! the card ledger. Every other crate in the workspace depends on
//! `veilcard-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `Address`, `TokenId` —
//!    validated constructors, no bare strings or integers for identifiers.
//!
//! 2. **`CanonicalBytes` newtype.** ALL digest computation flows through
//!    `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for digests.
//!    Proof binding digests are only meaningful if both sides of the
//!    confidential compute boundary canonicalize identically.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type enforces UTC with
//!    seconds precision — event logs stay deterministic under
//!    re-serialization.
//!
//! 4. **`sha256_digest()` accepts only `&CanonicalBytes`.** Compile-time
//!    enforcement that all digest paths flow through canonicalization.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `veilcard-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` unless a type deliberately hides state.

pub mod address;
pub mod canonical;
pub mod digest;
pub mod error;
pub mod temporal;
pub mod token;

// Re-export primary types for ergonomic imports.
pub use address::Address;
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use error::{AddressError, CanonicalizationError, CoreError};
pub use temporal::Timestamp;
pub use token::TokenId;
