//! Play command - interactive games in the terminal

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::{ConsolePresenter, HeadlessPresenter, LogObserver, MsgPackRepository},
    cli::{
        CommonArgs, install_interrupt_handler,
        output::{print_kv, print_section, print_tally},
    },
    players::PlayerKind,
    ports::Presenter,
    session::Session,
    tictactoe::Side,
};

#[derive(Parser, Debug)]
#[command(about = "Play games in the terminal")]
pub struct PlayArgs {
    /// Who plays crosses (moves first)
    #[arg(long, value_enum)]
    pub cross: Option<PlayerKind>,

    /// Who plays naughts
    #[arg(long, value_enum)]
    pub naught: Option<PlayerKind>,

    /// Stop after this many games (default: until quit)
    #[arg(long, short = 'g')]
    pub games: Option<usize>,
}

pub fn execute(args: PlayArgs, common: &CommonArgs) -> Result<()> {
    let mut config = common.session_config()?;
    // Without a config file the terminal player takes crosses
    let (default_cross, default_naught) = match common.config {
        Some(_) => (config.cross, config.naught),
        None => (PlayerKind::Human, PlayerKind::Computer),
    };
    config = config.with_players(
        args.cross.unwrap_or(default_cross),
        args.naught.unwrap_or(default_naught),
    );

    // Computer against computer needs no terminal
    let presenter: Box<dyn Presenter> = if config.is_automated() {
        Box::new(HeadlessPresenter)
    } else {
        println!("Enter cells as 1-9 (top left to bottom right), q to quit.");
        Box::new(ConsolePresenter::stdio())
    };
    let mut session = Session::open(&config, MsgPackRepository::new(), presenter)
    .with_context(|| format!("Failed to open snapshot {}", config.snapshot_path.display()))?;
    session.add_observer(Box::new(LogObserver));
    install_interrupt_handler(session.shutdown_handle())?;

    let tally = session.run(args.games).context("Session failed")?;

    print_section("Session summary");
    print_tally(&tally);
    for side in [Side::Cross, Side::Naught] {
        if let Some(score) = session.player(side).score() {
            print_kv(&format!("Score ({side})"), &score.to_string());
        }
    }
    Ok(())
}
