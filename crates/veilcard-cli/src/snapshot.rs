//! # Ledger Snapshots
//!
//! The CLI's persistence layer: one JSON file holding the ledger and the
//! mock coprocessor side by side. Loading and saving are whole-file
//! operations — the snapshot is small and atomicity concerns stay inside
//! the in-memory ledger.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use veilcard_core::Address;
use veilcard_fhe::MockCoprocessor;
use veilcard_registry::CardLedger;

/// A complete registry instance: ledger state plus the coprocessor that
/// holds its ciphertext material.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// The card ledger.
    pub ledger: CardLedger,
    /// The mock confidential compute service.
    pub coprocessor: MockCoprocessor,
}

impl Snapshot {
    /// Create a fresh registry instance with a random registry address.
    pub fn create() -> Self {
        Self {
            ledger: CardLedger::new(Address::random()),
            coprocessor: MockCoprocessor::new(),
        }
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!(
                "snapshot not found: {} (run `veilcard init` first)",
                path.display()
            );
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse snapshot: {}", path.display()))
    }

    /// Write the snapshot to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize snapshot")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write snapshot: {}", path.display()))
    }
}
