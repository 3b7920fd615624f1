//! Repository port for snapshot persistence.

use std::path::Path;

use crate::{Result, menace::Snapshot};

/// Port for persisting and loading state-table snapshots.
///
/// # Examples
///
/// ```no_run
/// use naughts::menace::Snapshot;
/// use naughts::ports::SnapshotRepository;
/// use std::path::Path;
///
/// fn persist<R: SnapshotRepository>(repo: &R, snapshot: &Snapshot) -> naughts::Result<()> {
///     repo.save(snapshot, Path::new("GAMESTATES.msgpack"))
/// }
/// ```
pub trait SnapshotRepository {
    /// Save a snapshot, replacing whatever is stored at `path`.
    ///
    /// Implementations must never leave a partially written snapshot behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written or serialization fails.
    fn save(&self, snapshot: &Snapshot, path: &Path) -> Result<()>;

    /// Load a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CorruptSnapshot`] if the stored data does not have
    /// the expected shape, and an I/O error if it cannot be read.
    fn load(&self, path: &Path) -> Result<Snapshot>;

    /// Whether anything is stored at `path`
    fn exists(&self, path: &Path) -> bool;
}
