//! # Init Subcommand
//!
//! Creates a fresh ledger snapshot with a newly generated registry
//! address. The local-file equivalent of deploying a registry instance.

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;

use crate::snapshot::Snapshot;

/// Arguments for `veilcard init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing snapshot.
    #[arg(long)]
    pub force: bool,
}

/// Execute the init subcommand.
pub fn run_init(args: &InitArgs, state_path: &Path) -> Result<u8> {
    if state_path.exists() && !args.force {
        bail!(
            "snapshot already exists: {} (use --force to overwrite)",
            state_path.display()
        );
    }

    let snap = Snapshot::create();
    snap.save(state_path)?;

    println!("OK: initialized registry");
    println!("  Registry address: {}", snap.ledger.address());
    println!("  Snapshot: {}", state_path.display());
    Ok(0)
}
