//! # Transfer Subcommand
//!
//! Confidential transfer: builds the two-assertion batch — current
//! owner, new owner, in that order — and submits it with the binding
//! proof. The caller's address is used as the current-owner assertion,
//! matching what an honest owner submits.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use veilcard_core::{Address, TokenId};
use veilcard_fhe::EncryptedInputBuilder;

use crate::snapshot::Snapshot;

/// Arguments for `veilcard transfer`.
#[derive(Args, Debug)]
pub struct TransferArgs {
    /// The transferring caller's address.
    #[arg(long)]
    pub caller: Address,

    /// Token id to transfer.
    #[arg(long)]
    pub tokenid: u64,

    /// Recipient address.
    #[arg(long)]
    pub to: Address,
}

/// Execute the transfer subcommand.
pub fn run_transfer(args: &TransferArgs, state_path: &Path) -> Result<u8> {
    let mut snap = Snapshot::load(state_path)?;
    let token_id = TokenId(args.tokenid);

    let input = EncryptedInputBuilder::new(snap.ledger.address(), args.caller)
        .add_address(args.caller)
        .add_address(args.to)
        .encrypt(&mut snap.coprocessor)
        .context("failed to build encrypted input")?;

    snap.ledger.transfer(
        args.caller,
        token_id,
        args.to,
        input.handles[0],
        input.handles[1],
        &input.proof,
        &mut snap.coprocessor,
    )?;

    snap.save(state_path)?;

    println!("OK: transferred {token_id}");
    println!("  New owner: {}", args.to);
    Ok(0)
}
