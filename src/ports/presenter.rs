//! Presentation port
//!
//! Everything the core needs from a user interface: show a board, ask for a
//! move, report a refused move and announce the end of a game.

use crate::{
    Error, Result,
    tictactoe::{Board, Outcome, Side},
};

/// Answer to a move request from an interactive player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRequest {
    /// Place the mark on this cell (0-8, row-major)
    Place(usize),
    /// Stop playing; the session saves and shuts down
    Quit,
}

pub trait Presenter {
    /// Show the current board
    fn render(&mut self, board: &Board) -> Result<()>;

    /// Ask the person playing `side` for a move
    fn request_move(&mut self, board: &Board, side: Side) -> Result<MoveRequest>;

    /// Tell the person their last move was refused; the request is repeated
    fn rejected(&mut self, error: &Error) -> Result<()>;

    /// Announce a finished game before the board is reset
    fn game_over(&mut self, board: &Board, outcome: Outcome) -> Result<()>;
}
