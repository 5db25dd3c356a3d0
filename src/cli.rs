use crate::render::View;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "KOL trading insights for Solana tokens", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the KOL API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Print metadata as JSON after the text
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Hottest tokens of the last hour
    HotTokens,
    /// Daily PnL leaderboard
    Leaderboard,
    /// Most active traders
    Traders,
    /// Latest KOL trades
    Trades,
    /// Trading signal for one token
    Analyze {
        /// Symbol ($BONK, WIF) or mint address
        token: String,
    },
    /// Market overview used as conversation context
    Context,
}

impl Command {
    /// The list view this command shows, if it is a listing.
    pub fn view(&self) -> Option<View> {
        match self {
            Command::HotTokens => Some(View::HotTokens),
            Command::Leaderboard => Some(View::Leaderboard),
            Command::Traders => Some(View::Traders),
            Command::Trades => Some(View::Trades),
            Command::Analyze { .. } | Command::Context => None,
        }
    }
}
