//! Move sources for the two sides of a game
//!
//! A side is driven either by a person through the [`Presenter`] or by a
//! [`LearningAgent`]. The session only sees the [`MoveSource`] trait.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    menace::{LearningAgent, StateTable},
    ports::{MoveRequest, Presenter},
    tictactoe::{Board, Side, Standing},
};

/// Who controls a side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Computer,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "human"),
            PlayerKind::Computer => write!(f, "computer"),
        }
    }
}

/// Everything a move source may look at when asked for a move
pub struct TurnContext<'a> {
    pub board: &'a Board,
    pub side: Side,
    pub table: &'a StateTable,
    pub presenter: &'a mut dyn Presenter,
}

pub trait MoveSource {
    /// Pick a cell for the side to move
    fn choose_move(&mut self, turn: TurnContext<'_>) -> Result<MoveRequest>;

    /// Receive the result of a finished game
    fn finish_game(&mut self, table: &mut StateTable, standing: Standing) -> Result<()>;

    /// Drop any per-game state of an unfinished game
    fn abandon_game(&mut self) {}

    fn kind(&self) -> PlayerKind;

    /// Running score, where the source keeps one
    fn score(&self) -> Option<i64> {
        None
    }
}

/// A person entering moves through the presenter.
///
/// Keeps a tally of +3 per win, -1 per loss and +1 per draw.
#[derive(Debug, Default)]
pub struct Human {
    score: i64,
}

impl Human {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MoveSource for Human {
    fn choose_move(&mut self, turn: TurnContext<'_>) -> Result<MoveRequest> {
        turn.presenter.request_move(turn.board, turn.side)
    }

    fn finish_game(&mut self, _table: &mut StateTable, standing: Standing) -> Result<()> {
        self.score += match standing {
            Standing::Won => 3,
            Standing::Lost => -1,
            Standing::Drawn => 1,
        };
        Ok(())
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn score(&self) -> Option<i64> {
        Some(self.score)
    }
}

/// The learning agent playing one side
#[derive(Debug)]
pub struct Computer {
    agent: LearningAgent,
}

impl Computer {
    pub fn new(seed: Option<u64>) -> Self {
        Computer {
            agent: LearningAgent::new(seed),
        }
    }

    pub fn agent(&self) -> &LearningAgent {
        &self.agent
    }
}

impl MoveSource for Computer {
    fn choose_move(&mut self, turn: TurnContext<'_>) -> Result<MoveRequest> {
        self.agent
            .choose_move(turn.table, turn.board)
            .map(MoveRequest::Place)
    }

    fn finish_game(&mut self, table: &mut StateTable, standing: Standing) -> Result<()> {
        self.agent.apply_standing(table, standing)
    }

    fn abandon_game(&mut self) {
        self.agent.forget();
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Computer
    }
}

/// Build the move source for a side
pub fn create(kind: PlayerKind, seed: Option<u64>) -> Box<dyn MoveSource> {
    match kind {
        PlayerKind::Human => Box::new(Human::new()),
        PlayerKind::Computer => Box::new(Computer::new(seed)),
    }
}
