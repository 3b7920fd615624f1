//! Command-line interface for the naughts binary

pub mod commands;
pub mod output;

use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::{Context, Result};
use clap::Args;

use crate::config::SessionConfig;

/// Options shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Snapshot file to load and save the learned table
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// JSON config file; flags given on the command line take precedence
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Random seed for reproducible computer play
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Save the snapshot after every N completed games
    #[arg(long, global = true)]
    pub save_interval: Option<usize>,

    /// Rebuild the table instead of failing when the snapshot is corrupt
    #[arg(long, global = true, default_value_t = false)]
    pub rebuild_on_corrupt: bool,

    /// Verbose (debug) logging
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Defaults, then the config file, then flags
    pub fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::from_file(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?,
            None => SessionConfig::default(),
        };

        if let Some(path) = &self.snapshot {
            config = config.with_snapshot_path(path);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(interval) = self.save_interval {
            config = config.with_save_interval(interval);
        }
        if self.rebuild_on_corrupt {
            config = config.with_rebuild_on_corrupt(true);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Exit status after a second termination signal (128 + SIGINT)
const FORCED_EXIT_CODE: i32 = 130;

/// Route SIGINT, SIGTERM and SIGHUP to the session's shutdown flag so the
/// snapshot is saved on exit.
///
/// A second signal while the flag is already set exits immediately, dropping
/// anything learned since the last save.
pub fn install_interrupt_handler(shutdown: Arc<AtomicBool>) -> Result<()> {
    ctrlc::set_handler(move || {
        if request_stop(&shutdown) {
            eprintln!(
                "\nStopping after the current move and saving the snapshot. \
                 At a move prompt press Enter to continue; signal again to quit without saving."
            );
        } else {
            eprintln!("\nForced exit, progress since the last save is lost.");
            std::process::exit(FORCED_EXIT_CODE);
        }
    })
    .context("Failed to set termination signal handler")
}

/// Raise the flag; true only for the first request
fn request_stop(shutdown: &AtomicBool) -> bool {
    !shutdown.swap(true, Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = CommonArgs {
            snapshot: Some(PathBuf::from("other.msgpack")),
            seed: Some(3),
            save_interval: Some(5),
            ..CommonArgs::default()
        };
        let config = args.session_config().unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from("other.msgpack"));
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.save_interval, 5);
        assert!(!config.rebuild_on_corrupt);
    }

    #[test]
    fn test_only_first_stop_request_is_graceful() {
        let shutdown = AtomicBool::new(false);
        assert!(request_stop(&shutdown));
        assert!(shutdown.load(Ordering::SeqCst));
        assert!(!request_stop(&shutdown));
    }

    #[test]
    fn test_zero_interval_flag_rejected() {
        let args = CommonArgs {
            save_interval: Some(0),
            ..CommonArgs::default()
        };
        assert!(args.session_config().is_err());
    }
}
