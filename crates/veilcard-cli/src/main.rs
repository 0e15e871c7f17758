//! # veilcard CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; the subcommand surface matches the original
//! task-runner automation: mint, card lookup, transfer, and owner
//! decryption, plus local snapshot initialization.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use veilcard_cli::card::{run_card, CardArgs};
use veilcard_cli::decrypt::{run_decrypt_level, DecryptArgs};
use veilcard_cli::init::{run_init, InitArgs};
use veilcard_cli::mint::{run_mint, MintArgs};
use veilcard_cli::transfer::{run_transfer, TransferArgs};

/// Confidential card registry toolchain.
///
/// Operates on a local JSON ledger snapshot: cards carry plaintext
/// metadata and encrypted stats, and ownership is tracked on both a
/// plaintext and a confidential channel.
#[derive(Parser, Debug)]
#[command(name = "veilcard", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the ledger snapshot file.
    #[arg(long, global = true, default_value = "veilcard.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a fresh ledger snapshot with a generated registry address.
    Init(InitArgs),

    /// Mint a card with encrypted stats.
    Mint(MintArgs),

    /// Print a card's plaintext metadata and ciphertext handles.
    Card(CardArgs),

    /// Confidential transfer of a card to a new owner.
    Transfer(TransferArgs),

    /// Decrypt the level stat of a card you own.
    #[command(name = "decrypt-level")]
    DecryptLevel(DecryptArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(state = %cli.state.display(), "veilcard CLI starting");

    let result = match cli.command {
        Commands::Init(args) => run_init(&args, &cli.state),
        Commands::Mint(args) => run_mint(&args, &cli.state),
        Commands::Card(args) => run_card(&args, &cli.state),
        Commands::Transfer(args) => run_transfer(&args, &cli.state),
        Commands::DecryptLevel(args) => run_decrypt_level(&args, &cli.state),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
