//! # wenwallet CLI
//!
//! Entry point for the `wenwallet` binary.
//!
//! Subcommands:
//! - `wenwallet init`: write a starter config
//! - `wenwallet status`: connect and print token, faucet and game state
//! - `wenwallet mint`: mint tokens from the faucet
//! - `wenwallet play`: submit a guess to the Wen game
//! - `wenwallet claim`: claim the winner's reward
//! - `wenwallet disconnect`: forget the connection

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wenwallet_core::types::GameDate;

mod commands;
mod terminal;

/// Wenwallet: play the Wen guessing game from a terminal.
#[derive(Parser)]
#[command(name = "wenwallet", version, about)]
struct Cli {
    /// Path to config.yaml (default: ~/.wenwallet/config.yaml).
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Wallet JSON-RPC endpoint, overriding the config file.
    #[arg(long, env = "WENWALLET_RPC_URL", global = true)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config.yaml.
    Init {
        /// Overwrite an existing config.
        #[arg(long)]
        force: bool,
    },

    /// Connect the wallet and show balances, faucet and game state.
    Status,

    /// Mint tokens from the faucet.
    Mint,

    /// Guess the date, paying the participation fee.
    Play {
        /// Guessed date as DD/MM/YYYY.
        #[arg(long)]
        guess: GameDate,
    },

    /// Claim the reward for a winning guess.
    Claim,

    /// Drop the connection and show how to revoke wallet permissions.
    Disconnect,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context {
        config_path: cli.config,
        rpc_url: cli.rpc_url,
    };

    let result = match cli.command {
        Commands::Init { force } => commands::init::run(&ctx, force),
        Commands::Status => commands::status::run(&ctx).await,
        Commands::Mint => commands::action::mint(&ctx).await,
        Commands::Play { guess } => commands::action::play(&ctx, guess).await,
        Commands::Claim => commands::action::claim(&ctx).await,
        Commands::Disconnect => commands::disconnect::run(&ctx).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
