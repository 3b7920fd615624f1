//! Turn tracking and outcome detection

use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Side},
    lines::LineScan,
};

/// State of a game as judged after each move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    CrossWins,
    NaughtWins,
    Draw,
}

/// How a finished game went from one side's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Standing {
    Won,
    Lost,
    Drawn,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::CrossWins => Some(Side::Cross),
            Outcome::NaughtWins => Some(Side::Naught),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    /// Standing of `side` in a finished game; `None` while in progress
    pub fn standing_for(self, side: Side) -> Option<Standing> {
        match self {
            Outcome::InProgress => None,
            Outcome::Draw => Some(Standing::Drawn),
            _ if self.winner() == Some(side) => Some(Standing::Won),
            _ => Some(Standing::Lost),
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Outcome::InProgress => "Game in progress",
            Outcome::CrossWins => "Crosses win!",
            Outcome::NaughtWins => "Naughts win!",
            Outcome::Draw => "Draw!",
        }
    }
}

/// Tracks whose turn it is and the current outcome of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Referee {
    turn: Side,
    outcome: Outcome,
}

impl Referee {
    /// Start a new game with crosses to move
    pub fn new() -> Self {
        Referee {
            turn: Side::Cross,
            outcome: Outcome::InProgress,
        }
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Judge a board: completed line first, then a full board, else in progress
    pub fn judge(board: &Board) -> Outcome {
        match LineScan::winner(board.cells()) {
            Some(Side::Cross) => Outcome::CrossWins,
            Some(Side::Naught) => Outcome::NaughtWins,
            None if board.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    /// Place the current side's mark, switch the turn and re-judge the board.
    ///
    /// An occupied cell yields [`crate::Error::InvalidMove`] and leaves both the
    /// board and the turn untouched.
    pub fn apply_move(&mut self, board: &mut Board, position: usize) -> crate::Result<Outcome> {
        if self.outcome.is_terminal() {
            return Err(crate::Error::GameOver);
        }
        if !board.is_empty(position)? {
            return Err(crate::Error::InvalidMove { position });
        }

        board.set(position, self.turn)?;
        self.turn = self.turn.opponent();
        self.outcome = Self::judge(board);
        Ok(self.outcome)
    }
}

impl Default for Referee {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Configuration;

    fn board(s: &str) -> Board {
        Board::from_configuration(s.parse::<Configuration>().unwrap())
    }

    #[test]
    fn test_top_row_cross_win() {
        // Crosses at 0,1,2 and naughts at 3,4
        assert_eq!(Referee::judge(&board("XXXOO....")), Outcome::CrossWins);
    }

    #[test]
    fn test_column_naught_win() {
        assert_eq!(Referee::judge(&board("OXXOX.O..")), Outcome::NaughtWins);
    }

    #[test]
    fn test_draw_detection() {
        // XOX
        // XOO
        // OXX
        assert_eq!(Referee::judge(&board("XOXXOOOXX")), Outcome::Draw);
    }

    #[test]
    fn test_in_progress() {
        assert_eq!(Referee::judge(&board("X...O....")), Outcome::InProgress);
        assert_eq!(Referee::judge(&Board::new()), Outcome::InProgress);
    }

    #[test]
    fn test_turn_alternation() {
        let mut referee = Referee::new();
        let mut board = Board::new();
        assert_eq!(referee.turn(), Side::Cross);

        referee.apply_move(&mut board, 0).unwrap();
        assert_eq!(referee.turn(), Side::Naught);

        referee.apply_move(&mut board, 4).unwrap();
        assert_eq!(referee.turn(), Side::Cross);
    }

    #[test]
    fn test_invalid_move_leaves_state_unchanged() {
        let mut referee = Referee::new();
        let mut board = Board::new();
        referee.apply_move(&mut board, 4).unwrap();
        let before = board;

        let err = referee.apply_move(&mut board, 4).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidMove { position: 4 }));
        assert_eq!(board, before);
        assert_eq!(referee.turn(), Side::Naught);
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let mut referee = Referee::new();
        let mut board = Board::new();
        for position in [0, 3, 1, 4, 2] {
            referee.apply_move(&mut board, position).unwrap();
        }
        assert_eq!(referee.outcome(), Outcome::CrossWins);
        assert!(matches!(
            referee.apply_move(&mut board, 8),
            Err(crate::Error::GameOver)
        ));
    }

    #[test]
    fn test_standing_for() {
        assert_eq!(
            Outcome::CrossWins.standing_for(Side::Cross),
            Some(Standing::Won)
        );
        assert_eq!(
            Outcome::CrossWins.standing_for(Side::Naught),
            Some(Standing::Lost)
        );
        assert_eq!(Outcome::Draw.standing_for(Side::Naught), Some(Standing::Drawn));
        assert_eq!(Outcome::InProgress.standing_for(Side::Cross), None);
    }
}
