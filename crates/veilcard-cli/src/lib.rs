//! # veilcard-cli — CLI Tool for the Card Registry
//!
//! Provides the `veilcard` command-line interface. The registry and its
//! mock coprocessor live in a JSON snapshot file; every command loads
//! the snapshot, performs one operation, and writes it back.
//!
//! ## Subcommands
//!
//! - `veilcard init` — Create a fresh ledger snapshot.
//! - `veilcard mint` — Mint a card with encrypted stats.
//! - `veilcard card` — Print a card's plaintext metadata and handles.
//! - `veilcard transfer` — Confidential transfer to a new owner.
//! - `veilcard decrypt-level` — Decrypt one's own card's level stat.

pub mod card;
pub mod decrypt;
pub mod init;
pub mod mint;
pub mod snapshot;
pub mod transfer;
