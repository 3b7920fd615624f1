//! Session configuration
//!
//! Values come from [`SessionConfig::default`], optionally overlaid by a JSON
//! file, and finally by command-line flags.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, players::PlayerKind};

/// Default location of the snapshot file
pub const DEFAULT_SNAPSHOT_PATH: &str = "GAMESTATES.msgpack";

/// Default number of completed games between periodic saves
pub const DEFAULT_SAVE_INTERVAL: usize = 100;

/// Configuration for a play or training session.
///
/// # Examples
///
/// ```
/// use naughts::config::SessionConfig;
/// use naughts::players::PlayerKind;
///
/// let config = SessionConfig::default()
///     .with_snapshot_path("trained.msgpack")
///     .with_save_interval(50)
///     .with_seed(42)
///     .with_players(PlayerKind::Human, PlayerKind::Computer);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the snapshot is loaded from and saved to
    pub snapshot_path: PathBuf,
    /// Save after every this many completed games
    pub save_interval: usize,
    /// Random seed for reproducible computer play
    pub seed: Option<u64>,
    /// Controller of the crosses (first mover)
    pub cross: PlayerKind,
    /// Controller of the naughts
    pub naught: PlayerKind,
    /// Rebuild by full enumeration instead of failing on a corrupt snapshot
    pub rebuild_on_corrupt: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            save_interval: DEFAULT_SAVE_INTERVAL,
            seed: None,
            cross: PlayerKind::Computer,
            naught: PlayerKind::Computer,
            rebuild_on_corrupt: false,
        }
    }
}

impl SessionConfig {
    /// Read a JSON config file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config file {}", path.display()),
            source,
        })?;
        let config: SessionConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = path.into();
        self
    }

    pub fn with_save_interval(mut self, interval: usize) -> Self {
        self.save_interval = interval;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_players(mut self, cross: PlayerKind, naught: PlayerKind) -> Self {
        self.cross = cross;
        self.naught = naught;
        self
    }

    pub fn with_rebuild_on_corrupt(mut self, rebuild: bool) -> Self {
        self.rebuild_on_corrupt = rebuild;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.save_interval == 0 {
            return Err(Error::InvalidConfiguration {
                message: "save_interval must be at least 1".to_string(),
            });
        }
        if self.snapshot_path.as_os_str().is_empty() {
            return Err(Error::InvalidConfiguration {
                message: "snapshot_path must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Whether no side needs a person at the keyboard
    pub fn is_automated(&self) -> bool {
        self.cross == PlayerKind::Computer && self.naught == PlayerKind::Computer
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.save_interval, 100);
        assert_eq!(config.snapshot_path, PathBuf::from("GAMESTATES.msgpack"));
        assert!(config.is_automated());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = SessionConfig::default().with_save_interval(0);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"save_interval": 10, "cross": "human"}}"#).unwrap();

        let config = SessionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.save_interval, 10);
        assert_eq!(config.cross, PlayerKind::Human);
        assert_eq!(config.naught, PlayerKind::Computer);
        assert!(!config.is_automated());
    }

    #[test]
    fn test_from_file_rejects_bad_kind() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"naught": "robot"}}"#).unwrap();
        assert!(SessionConfig::from_file(file.path()).is_err());
    }
}
