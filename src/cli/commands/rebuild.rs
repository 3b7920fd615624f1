//! Rebuild command - replace the snapshot with a freshly enumerated table

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    cli::{
        CommonArgs,
        output::{print_section, print_table_stats},
    },
    menace::Snapshot,
    ports::SnapshotRepository,
};

#[derive(Parser, Debug)]
#[command(about = "Rebuild the state table by enumeration, discarding learned weights")]
pub struct RebuildArgs {}

pub fn execute(_args: RebuildArgs, common: &CommonArgs) -> Result<()> {
    let config = common.session_config()?;
    let repo = MsgPackRepository::new();

    if repo.exists(&config.snapshot_path) {
        log::warn!(
            "replacing existing snapshot at {}",
            config.snapshot_path.display()
        );
    }

    let mut snapshot = Snapshot::build();
    snapshot.record_save();
    repo.save(&snapshot, &config.snapshot_path)
        .with_context(|| format!("Failed to write {}", config.snapshot_path.display()))?;
    log::info!("rebuilt snapshot at {}", config.snapshot_path.display());

    print_section("Rebuilt snapshot");
    print_table_stats(&snapshot.table().stats(), snapshot.save_count());
    Ok(())
}
