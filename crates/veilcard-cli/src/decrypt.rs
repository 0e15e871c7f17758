//! # Decrypt Subcommand
//!
//! Requests decryption of a card's level stat. Succeeds only for a
//! caller the ledger has granted access to — the current owner via the
//! confidential path, or the minting caller.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use veilcard_core::{Address, TokenId};
use veilcard_fhe::{ConfidentialCompute, FheError};

use crate::snapshot::Snapshot;

/// Arguments for `veilcard decrypt-level`.
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// The requesting caller's address.
    #[arg(long)]
    pub caller: Address,

    /// Token id whose level to decrypt.
    #[arg(long)]
    pub tokenid: u64,
}

/// Execute the decrypt-level subcommand.
pub fn run_decrypt_level(args: &DecryptArgs, state_path: &Path) -> Result<u8> {
    let snap = Snapshot::load(state_path)?;
    let card = snap.ledger.get_card(TokenId(args.tokenid))?;

    match snap.coprocessor.decrypt_u32(&card.attributes.level, args.caller) {
        Ok(level) => {
            println!("Decrypted Level: {level}");
            Ok(0)
        }
        Err(FheError::DecryptionDenied { requester }) => {
            println!("FAIL: decryption denied for {requester}");
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}
