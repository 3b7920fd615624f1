//! Noughts and crosses against a matchbox-style learning opponent
//!
//! This crate provides:
//! - Board, win-line detection and turn refereeing
//! - An exhaustive state table whose candidate lists encode move weights by
//!   repetition, with win/draw/loss reinforcement
//! - A learning agent that samples from the table and remembers its choices
//! - Snapshot persistence with a save counter (MessagePack)
//! - A session loop for human/computer play and unattended training

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod menace;
pub mod players;
pub mod ports;
pub mod session;
pub mod tictactoe;

pub use config::SessionConfig;
pub use error::{Error, Result};
pub use menace::{LearningAgent, Snapshot, StateTable};
pub use session::{GameEnd, Session, Tally};
