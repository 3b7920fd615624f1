//! naughts - noughts and crosses against a learning opponent
//!
//! Subcommands:
//! - `play`: games in the terminal, human or computer on either side
//! - `train`: unattended computer self-play
//! - `rebuild`: fresh state table by enumeration
//! - `stats`: summary of a saved snapshot

use anyhow::Result;
use clap::{Parser, Subcommand};
use naughts::cli::{CommonArgs, commands};

#[derive(Parser)]
#[command(name = "naughts")]
#[command(version, about = "Noughts and crosses with a learning opponent", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal
    Play(commands::play::PlayArgs),

    /// Train by computer self-play
    Train(commands::train::TrainArgs),

    /// Rebuild the state table from scratch
    Rebuild(commands::rebuild::RebuildArgs),

    /// Show snapshot statistics
    Stats(commands::stats::StatsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.common.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Play(args) => commands::play::execute(args, &cli.common),
        Commands::Train(args) => commands::train::execute(args, &cli.common),
        Commands::Rebuild(args) => commands::rebuild::execute(args, &cli.common),
        Commands::Stats(args) => commands::stats::execute(args, &cli.common),
    }
}
