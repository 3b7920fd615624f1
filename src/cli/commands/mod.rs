//! Subcommand implementations

pub mod play;
pub mod rebuild;
pub mod stats;
pub mod train;
