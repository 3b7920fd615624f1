//! Observer adapters: progress bar and log output

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    ports::Observer,
    tictactoe::{Configuration, Outcome, Side},
};

/// Progress bar over a fixed number of games, showing the running tally
#[derive(Default)]
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    cross_wins: usize,
    naught_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn message(&self) -> String {
        format!(
            "X:{} O:{} D:{}",
            self.cross_wins, self.naught_wins, self.draws
        )
    }
}

impl Observer for ProgressObserver {
    fn on_session_start(&mut self, planned_games: Option<usize>) -> Result<()> {
        let pb = match planned_games {
            Some(total) => ProgressBar::new(total as u64),
            None => ProgressBar::new_spinner(),
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::CrossWins => self.cross_wins += 1,
            Outcome::NaughtWins => self.naught_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_session_end(&mut self, _games_completed: usize) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Writes moves and outcomes to the `log` facade at debug/trace level
#[derive(Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_move(
        &mut self,
        game_num: usize,
        side: Side,
        before: &Configuration,
        position: usize,
    ) -> Result<()> {
        log::trace!("game {game_num}: {side} {before} -> {position}");
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome) -> Result<()> {
        log::debug!("game {game_num}: {}", outcome.message());
        Ok(())
    }

    fn on_session_end(&mut self, games_completed: usize) -> Result<()> {
        log::info!("session finished after {games_completed} games");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_tally() {
        let mut observer = ProgressObserver::new();
        observer.on_session_start(Some(3)).unwrap();
        observer.on_game_end(1, Outcome::CrossWins).unwrap();
        observer.on_game_end(2, Outcome::Draw).unwrap();
        observer.on_game_end(3, Outcome::Draw).unwrap();
        observer.on_session_end(3).unwrap();
        assert_eq!(observer.message(), "X:1 O:0 D:2");
    }
}
