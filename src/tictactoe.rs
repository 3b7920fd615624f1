//! Tic-Tac-Toe game implementation

pub mod board;
pub mod lines;
pub mod referee;

pub use board::{Board, Cell, Configuration, Side};
pub use lines::{LineScan, WINNING_LINES};
pub use referee::{Outcome, Referee, Standing};
