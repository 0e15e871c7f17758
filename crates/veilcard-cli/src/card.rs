//! # Card Subcommand
//!
//! Prints a card's plaintext metadata and its ciphertext handles
//! verbatim. No decryption happens here — handles are opaque output.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use veilcard_core::TokenId;

use crate::snapshot::Snapshot;

/// Arguments for `veilcard card`.
#[derive(Args, Debug)]
pub struct CardArgs {
    /// Token id to look up.
    #[arg(long)]
    pub tokenid: u64,
}

/// Execute the card subcommand.
pub fn run_card(args: &CardArgs, state_path: &Path) -> Result<u8> {
    let snap = Snapshot::load(state_path)?;
    let card = snap.ledger.get_card(TokenId(args.tokenid))?;

    println!("Card Name: {}", card.name);
    println!("Image URI: {}", card.image_uri);
    println!("Owner: {}", card.owner);
    println!("Level: {}", card.attributes.level);
    println!("HP: {}", card.attributes.hp);
    println!("Attack: {}", card.attributes.attack);
    println!("Defense: {}", card.attributes.defense);
    println!("Encrypted Owner: {}", card.encrypted_owner);
    Ok(0)
}
