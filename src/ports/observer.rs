//! Observer port - abstraction for watching a session play out
//!
//! Observers receive game events without the session knowing how they are
//! reported. Progress bars and log output are adapters of this port.

use crate::{
    Result,
    tictactoe::{Configuration, Outcome, Side},
};

/// Observer trait for monitoring a session
///
/// # Event Sequence
///
/// 1. `on_session_start(planned_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - For each applied move
///    - `on_game_end(game_num, outcome)` - After feedback has been applied
/// 3. `on_session_end(games_completed)` - Once at the end, also after an interrupt
///
/// # Examples
///
/// ```no_run
/// use naughts::{ports::Observer, tictactoe::Outcome};
///
/// struct CountingObserver {
///     draws: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_game_end(&mut self, _game_num: usize, outcome: Outcome) -> naughts::Result<()> {
///         if outcome == Outcome::Draw {
///             self.draws += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    /// Called when the session starts. `planned_games` is `None` for open-ended play.
    fn on_session_start(&mut self, _planned_games: Option<usize>) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts (`game_num` is 1-based).
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move has been applied to the board.
    ///
    /// `before` is the configuration the move was chosen from.
    fn on_move(
        &mut self,
        _game_num: usize,
        _side: Side,
        _before: &Configuration,
        _position: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches a terminal outcome.
    fn on_game_end(&mut self, _game_num: usize, _outcome: Outcome) -> Result<()> {
        Ok(())
    }

    /// Called once when the session stops.
    fn on_session_end(&mut self, _games_completed: usize) -> Result<()> {
        Ok(())
    }
}
