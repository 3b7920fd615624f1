//! Train command - unattended self-play between two learning agents

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::{HeadlessPresenter, LogObserver, MsgPackRepository, ProgressObserver},
    cli::{
        CommonArgs, install_interrupt_handler,
        output::{print_section, print_table_stats, print_tally},
    },
    players::PlayerKind,
    session::Session,
};

#[derive(Parser, Debug)]
#[command(about = "Train the table by computer self-play")]
pub struct TrainArgs {
    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

pub fn execute(args: TrainArgs, common: &CommonArgs) -> Result<()> {
    let config = common
        .session_config()?
        .with_players(PlayerKind::Computer, PlayerKind::Computer);

    let mut session = Session::open(&config, MsgPackRepository::new(), Box::new(HeadlessPresenter))
        .with_context(|| format!("Failed to open snapshot {}", config.snapshot_path.display()))?;
    if !args.no_progress {
        session.add_observer(Box::new(ProgressObserver::new()));
    }
    session.add_observer(Box::new(LogObserver));
    install_interrupt_handler(session.shutdown_handle())?;

    let tally = session.run(Some(args.games)).context("Training failed")?;

    print_section("Training summary");
    print_tally(&tally);
    print_table_stats(&session.table().stats(), session.snapshot().save_count());
    Ok(())
}
