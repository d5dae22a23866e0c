//! CLI argument definitions for bsor.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bsor")]
#[command(about = "BSOR replay decoder and score analyzer", version)]
pub struct Args {
    /// Load settings from a TOML file
    #[arg(long, value_name = "FILE", global = true, env = "BSOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show replay header and play metadata
    Info {
        /// Replay file
        file: PathBuf,
        /// Print a short colored summary instead of JSON
        #[arg(long)]
        summary: bool,
    },
    /// Reconstruct gameplay events and replay the score
    Events {
        /// Replay file
        file: PathBuf,
    },
    /// Aggregate per-hand statistics
    Stats {
        /// Replay file
        file: PathBuf,
        /// Print a short colored summary instead of JSON
        #[arg(long)]
        summary: bool,
    },
}
