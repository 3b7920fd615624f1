//! Game session: the context object tying table, players and persistence together
//!
//! A session owns the snapshot for its whole lifetime. Each game gets a fresh
//! board and referee; feedback is applied to the table as soon as a game ends.
//! The snapshot is saved once right after startup, after every
//! `save_interval` completed games, and when the session shuts down.

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{
    Error, Result,
    config::SessionConfig,
    menace::{Snapshot, StateTable},
    players::{self, MoveSource, PlayerKind, TurnContext},
    ports::{MoveRequest, Observer, Presenter, SnapshotRepository},
    tictactoe::{Board, Outcome, Referee, Side},
};

/// How a call to [`Session::play_game`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Finished(Outcome),
    /// A quit or shutdown request arrived mid-game; no feedback was applied
    Interrupted,
}

/// Outcome counts across the games of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub cross_wins: usize,
    pub naught_wins: usize,
    pub draws: usize,
}

impl Tally {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::CrossWins => self.cross_wins += 1,
            Outcome::NaughtWins => self.naught_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    pub fn total(&self) -> usize {
        self.cross_wins + self.naught_wins + self.draws
    }
}

pub struct Session<R: SnapshotRepository> {
    snapshot: Snapshot,
    repository: R,
    snapshot_path: PathBuf,
    save_interval: usize,
    cross: Box<dyn MoveSource>,
    naught: Box<dyn MoveSource>,
    presenter: Box<dyn Presenter>,
    observers: Vec<Box<dyn Observer>>,
    shutdown: Arc<AtomicBool>,
    games_completed: usize,
    tally: Tally,
    closed: bool,
}

impl<R: SnapshotRepository> Session<R> {
    /// Load the snapshot (or build one if none exists), save it once, and set
    /// up both sides as configured.
    ///
    /// A corrupt snapshot is fatal unless `rebuild_on_corrupt` is set, in which
    /// case the table is rebuilt by full enumeration.
    pub fn open(
        config: &SessionConfig,
        repository: R,
        presenter: Box<dyn Presenter>,
    ) -> Result<Self> {
        config.validate()?;
        let snapshot = load_or_build(&repository, &config.snapshot_path, config.rebuild_on_corrupt)?;

        // Distinct streams so two computers do not mirror each other
        let cross = players::create(config.cross, config.seed);
        let naught = players::create(config.naught, config.seed.map(|s| s.wrapping_add(1)));

        let mut session = Session {
            snapshot,
            repository,
            snapshot_path: config.snapshot_path.clone(),
            save_interval: config.save_interval,
            cross,
            naught,
            presenter,
            observers: Vec::new(),
            shutdown: Arc::new(AtomicBool::new(false)),
            games_completed: 0,
            tally: Tally::default(),
            closed: false,
        };
        session.save()?;
        Ok(session)
    }

    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Flag shared with signal handlers; setting it stops the session at the
    /// next move boundary.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    pub fn table(&self) -> &StateTable {
        self.snapshot.table()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn games_completed(&self) -> usize {
        self.games_completed
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn player(&self, side: Side) -> &dyn MoveSource {
        match side {
            Side::Cross => self.cross.as_ref(),
            Side::Naught => self.naught.as_ref(),
        }
    }

    /// Increment the save counter and write the snapshot
    pub fn save(&mut self) -> Result<()> {
        let count = self.snapshot.record_save();
        match self.repository.save(&self.snapshot, &self.snapshot_path) {
            Ok(()) => {
                log::info!(
                    "saved snapshot #{count} to {}",
                    self.snapshot_path.display()
                );
                Ok(())
            }
            Err(err) => {
                log::error!(
                    "failed to save snapshot to {}, learned state since the last save is at risk: {err}",
                    self.snapshot_path.display()
                );
                Err(err)
            }
        }
    }

    /// Play one game to completion or until a quit/shutdown request.
    pub fn play_game(&mut self) -> Result<GameEnd> {
        let game_num = self.games_completed + 1;
        let mut board = Board::new();
        let mut referee = Referee::new();

        for observer in &mut self.observers {
            observer.on_game_start(game_num)?;
        }

        loop {
            if self.shutdown_requested() {
                self.abandon_game();
                return Ok(GameEnd::Interrupted);
            }
            self.presenter.render(&board)?;

            let side = referee.turn();
            let mover = match side {
                Side::Cross => self.cross.as_mut(),
                Side::Naught => self.naught.as_mut(),
            };
            let interactive = mover.kind() == PlayerKind::Human;
            let request = mover.choose_move(TurnContext {
                board: &board,
                side,
                table: self.snapshot.table(),
                presenter: self.presenter.as_mut(),
            })?;

            let position = match request {
                MoveRequest::Place(position) => position,
                MoveRequest::Quit => {
                    self.request_shutdown();
                    continue;
                }
            };

            let before = board.configuration();
            let outcome = match referee.apply_move(&mut board, position) {
                Ok(outcome) => outcome,
                Err(err @ (Error::InvalidMove { .. } | Error::InvalidPosition { .. }))
                    if interactive =>
                {
                    self.presenter.rejected(&err)?;
                    continue;
                }
                Err(err) => return Err(err),
            };

            for observer in &mut self.observers {
                observer.on_move(game_num, side, &before, position)?;
            }

            if outcome.is_terminal() {
                self.finish_game(&board, outcome)?;
                return Ok(GameEnd::Finished(outcome));
            }
        }
    }

    fn finish_game(&mut self, board: &Board, outcome: Outcome) -> Result<()> {
        let table = self.snapshot.table_mut();
        for (side, player) in [
            (Side::Cross, self.cross.as_mut()),
            (Side::Naught, self.naught.as_mut()),
        ] {
            if let Some(standing) = outcome.standing_for(side) {
                player.finish_game(table, standing)?;
            }
        }

        self.games_completed += 1;
        self.tally.record(outcome);
        self.presenter.game_over(board, outcome)?;
        for observer in &mut self.observers {
            observer.on_game_end(self.games_completed, outcome)?;
        }

        if self.games_completed.is_multiple_of(self.save_interval) {
            // Already logged by save(); play continues
            let _ = self.save();
        }
        Ok(())
    }

    fn abandon_game(&mut self) {
        self.cross.abandon_game();
        self.naught.abandon_game();
    }

    /// Play up to `games` games (unbounded if `None`), then shut down and save.
    pub fn run(&mut self, games: Option<usize>) -> Result<Tally> {
        for observer in &mut self.observers {
            observer.on_session_start(games)?;
        }

        let played = self.play_games(games);
        let closed = self.close();
        played?;
        closed?;
        Ok(self.tally)
    }

    fn play_games(&mut self, games: Option<usize>) -> Result<()> {
        let mut started = 0;
        while games.is_none_or(|limit| started < limit) {
            started += 1;
            if self.play_game()? == GameEnd::Interrupted {
                log::info!("shutdown requested, stopping after {} games", self.games_completed);
                break;
            }
        }
        Ok(())
    }

    /// Final save. Safe to call more than once; only the first call writes.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.abandon_game();
        for observer in &mut self.observers {
            observer.on_session_end(self.games_completed)?;
        }
        self.save()
    }
}

fn load_or_build<R: SnapshotRepository>(
    repository: &R,
    path: &Path,
    rebuild_on_corrupt: bool,
) -> Result<Snapshot> {
    if !repository.exists(path) {
        log::info!(
            "no snapshot at {}, building state table by enumeration",
            path.display()
        );
        return Ok(Snapshot::build());
    }

    match repository.load(path) {
        Ok(snapshot) => {
            log::info!(
                "loaded snapshot from {} ({} configurations, save count {})",
                path.display(),
                snapshot.table().len(),
                snapshot.save_count()
            );
            Ok(snapshot)
        }
        Err(Error::CorruptSnapshot { reason }) if rebuild_on_corrupt => {
            log::warn!(
                "snapshot at {} is corrupt ({reason}), rebuilding by full enumeration",
                path.display()
            );
            Ok(Snapshot::build())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{HeadlessPresenter, InMemoryRepository};

    fn automated(interval: usize) -> SessionConfig {
        SessionConfig::default()
            .with_snapshot_path("memory")
            .with_save_interval(interval)
            .with_seed(11)
    }

    #[test]
    fn test_open_builds_and_saves_once() {
        let repo = InMemoryRepository::new();
        let session =
            Session::open(&automated(100), repo.clone(), Box::new(HeadlessPresenter)).unwrap();

        assert_eq!(repo.save_calls(), 1);
        assert_eq!(session.snapshot().save_count(), 1);
        assert_eq!(session.table().len(), crate::menace::state_table::ENUMERATED_ENTRIES);
    }

    #[test]
    fn test_game_finishes_and_clears_agent_memory() {
        let repo = InMemoryRepository::new();
        let mut session =
            Session::open(&automated(100), repo, Box::new(HeadlessPresenter)).unwrap();

        let end = session.play_game().unwrap();
        assert!(matches!(end, GameEnd::Finished(outcome) if outcome.is_terminal()));
        assert_eq!(session.games_completed(), 1);
        assert_eq!(session.tally().total(), 1);
        assert!(session.table().stats().trained_entries > 0);
    }

    #[test]
    fn test_shutdown_before_game_interrupts() {
        let repo = InMemoryRepository::new();
        let mut session =
            Session::open(&automated(100), repo, Box::new(HeadlessPresenter)).unwrap();

        session.request_shutdown();
        assert_eq!(session.play_game().unwrap(), GameEnd::Interrupted);
        assert_eq!(session.games_completed(), 0);
        assert_eq!(session.table().stats().trained_entries, 0);
    }

    #[test]
    fn test_close_saves_only_once() {
        let repo = InMemoryRepository::new();
        let mut session =
            Session::open(&automated(100), repo.clone(), Box::new(HeadlessPresenter)).unwrap();

        session.close().unwrap();
        session.close().unwrap();
        assert_eq!(repo.save_calls(), 2);
    }
}
