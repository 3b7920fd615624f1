//! Stats command - summarise a saved snapshot

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    cli::{
        CommonArgs,
        output::{print_kv, print_section, print_table_stats},
    },
    ports::SnapshotRepository,
    tictactoe::{Board, Configuration},
};

#[derive(Parser, Debug)]
#[command(about = "Show statistics for a saved snapshot")]
pub struct StatsArgs {
    /// Also show the candidate weights for one configuration, e.g. "X...O...."
    #[arg(long)]
    pub configuration: Option<String>,
}

pub fn execute(args: StatsArgs, common: &CommonArgs) -> Result<()> {
    let config = common.session_config()?;
    let snapshot = MsgPackRepository::new()
        .load(&config.snapshot_path)
        .with_context(|| format!("Failed to load {}", config.snapshot_path.display()))?;

    print_section(&format!("Snapshot {}", config.snapshot_path.display()));
    print_table_stats(&snapshot.table().stats(), snapshot.save_count());

    if let Some(raw) = args.configuration {
        let configuration: Configuration = raw.parse()?;
        let table = snapshot.table();
        let candidates = table.lookup_candidates(&configuration)?;

        print_section("Candidate weights");
        println!("{}", Board::from_configuration(configuration));
        for position in configuration.empty_positions() {
            let weight = table.weight_of(&configuration, position)?;
            print_kv(
                &format!("Cell {}", position + 1),
                &format!("{weight} of {}", candidates.len()),
            );
        }
    }
    Ok(())
}
