//! Matchbox-style learning engine
//!
//! The state table maps every board configuration to a list of candidate
//! moves in which repetition encodes weight. The learning agent samples from
//! those lists and adjusts them after each game.

pub mod agent;
pub mod snapshot;
pub mod state_table;

pub use agent::LearningAgent;
pub use snapshot::Snapshot;
pub use state_table::{DRAW_COPIES, StateTable, TableStats, WIN_COPIES};
