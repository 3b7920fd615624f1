//! In-memory snapshot repository for testing.
//!
//! Stores encoded snapshots in a shared map so that tests exercise the same
//! encode/validate path as the file repository without touching the disk.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, error::Error, menace::Snapshot, ports::SnapshotRepository};

/// In-memory repository for testing.
///
/// All clones share the same underlying storage, so a test can keep one clone
/// to inspect what a session saved.
///
/// # Examples
///
/// ```
/// use naughts::adapters::InMemoryRepository;
/// use naughts::menace::Snapshot;
/// use naughts::ports::SnapshotRepository;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// repo.save(&Snapshot::build(), Path::new("snapshot"))?;
/// assert_eq!(repo.save_calls(), 1);
/// let loaded = repo.load(Path::new("snapshot"))?;
/// # Ok::<(), naughts::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<Storage>>,
}

#[derive(Default)]
struct Storage {
    blobs: HashMap<String, Vec<u8>>,
    save_calls: usize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, Storage> {
        // A poisoned lock only means another test thread panicked mid-save.
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of successful `save` calls so far
    pub fn save_calls(&self) -> usize {
        self.storage().save_calls
    }

    /// Store raw bytes, bypassing encoding. Used to plant corrupt data.
    pub fn insert_raw(&self, path: &Path, bytes: Vec<u8>) {
        let key = path.to_string_lossy().to_string();
        self.storage().blobs.insert(key, bytes);
    }
}

impl SnapshotRepository for InMemoryRepository {
    fn save(&self, snapshot: &Snapshot, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();
        let bytes = snapshot.to_bytes()?;

        let mut storage = self.storage();
        storage.blobs.insert(key, bytes);
        storage.save_calls += 1;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Snapshot> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage();

        let bytes = storage.blobs.get(&key).ok_or_else(|| Error::Io {
            operation: format!("load snapshot from in-memory storage at {}", path.display()),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        Snapshot::from_bytes(bytes)
    }

    fn exists(&self, path: &Path) -> bool {
        let key = path.to_string_lossy().to_string();
        self.storage().blobs.contains_key(&key)
    }
}
