mod cli;
mod commands;
mod config;
mod console;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use config::CliConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "bsor_cli=debug,bsor_core=debug"
    } else {
        "bsor_cli=warn,bsor_core=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::load(args.config.as_deref())?;
    let pretty = args.pretty || config.output.pretty;

    match args.command {
        Command::Info { file, summary } => commands::info::run(&file, summary, &config, pretty),
        Command::Events { file } => commands::events::run(&file, &config, pretty),
        Command::Stats { file, summary } => commands::stats::run(&file, summary, &config, pretty),
    }
}
