/// Command line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::wallet::WalletKind;

#[derive(Parser, Debug)]
#[command(name = "passport-board", about = "Passport NFT leaderboard dashboard")]
pub struct Args {
    /// TOML configuration file
    #[arg(long, env = "PASSPORT_BOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Poll the snapshot and redraw until Ctrl+C
    Watch,
    /// Refresh once and print the dashboard
    Show,
    /// Remember a wallet address (defaults to wallet.default_address)
    Connect {
        address: Option<String>,
        /// Wallet type recorded with the address (linera or demo)
        #[arg(long, default_value = "linera")]
        kind: WalletKind,
    },
    /// Forget the saved wallet
    Disconnect,
    /// Mint a passport for the connected wallet
    Mint,
    /// Ask the oracle to re-score the connected wallet
    Analyze,
}

impl Args {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Watch)
    }
}
