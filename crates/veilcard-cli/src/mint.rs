//! # Mint Subcommand
//!
//! Builds the five-value encrypted input batch — level, hp, attack,
//! defense, owner assertion, in that order — and mints a card. The
//! caller's own address is used as the owner assertion, matching what an
//! honest client submits.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use veilcard_core::Address;
use veilcard_fhe::EncryptedInputBuilder;

use crate::snapshot::Snapshot;

/// Arguments for `veilcard mint`.
#[derive(Args, Debug)]
pub struct MintArgs {
    /// The minting caller's address.
    #[arg(long)]
    pub caller: Address,

    /// Card name.
    #[arg(long)]
    pub name: String,

    /// Image URI.
    #[arg(long)]
    pub image: String,

    /// Card level.
    #[arg(long)]
    pub level: u32,

    /// Card HP.
    #[arg(long)]
    pub hp: u32,

    /// Card attack.
    #[arg(long)]
    pub attack: u32,

    /// Card defense.
    #[arg(long)]
    pub defense: u32,
}

/// Execute the mint subcommand.
pub fn run_mint(args: &MintArgs, state_path: &Path) -> Result<u8> {
    let mut snap = Snapshot::load(state_path)?;

    let input = EncryptedInputBuilder::new(snap.ledger.address(), args.caller)
        .add_u32(args.level)
        .add_u32(args.hp)
        .add_u32(args.attack)
        .add_u32(args.defense)
        .add_address(args.caller)
        .encrypt(&mut snap.coprocessor)
        .context("failed to build encrypted input")?;

    tracing::debug!(caller = %args.caller, "encrypted input batch built");

    let token_id = snap.ledger.mint_card(
        args.caller,
        &args.name,
        &args.image,
        input.handles[0],
        input.handles[1],
        input.handles[2],
        input.handles[3],
        input.handles[4],
        &input.proof,
        &mut snap.coprocessor,
    )?;

    snap.save(state_path)?;

    println!("OK: minted {token_id}");
    println!("  Owner: {}", args.caller);
    Ok(0)
}
