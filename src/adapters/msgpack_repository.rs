//! MessagePack file repository for snapshots.
//!
//! Saves go to a sibling temporary file which is flushed, synced and then
//! renamed over the destination, so readers only ever see a complete snapshot.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{Result, error::Error, menace::Snapshot, ports::SnapshotRepository};

/// MessagePack-based snapshot repository.
///
/// # Examples
///
/// ```no_run
/// use naughts::adapters::MsgPackRepository;
/// use naughts::menace::Snapshot;
/// use naughts::ports::SnapshotRepository;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let snapshot = Snapshot::build();
/// repo.save(&snapshot, Path::new("GAMESTATES.msgpack"))?;
/// let loaded = repo.load(Path::new("GAMESTATES.msgpack"))?;
/// # Ok::<(), naughts::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("snapshot"));
        name.push(format!(".{}.tmp", std::process::id()));
        path.with_file_name(name)
    }

    fn write_file(snapshot: &Snapshot, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {}", path.display()),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        snapshot.write_to(&mut writer)?;

        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush {}", path.display()),
            source,
        })?;
        let file = writer.into_inner().map_err(|e| Error::Io {
            operation: format!("finish writing {}", path.display()),
            source: e.into_error(),
        })?;
        file.sync_all().map_err(|source| Error::Io {
            operation: format!("sync {}", path.display()),
            source,
        })
    }
}

impl SnapshotRepository for MsgPackRepository {
    fn save(&self, snapshot: &Snapshot, path: &Path) -> Result<()> {
        let tmp = Self::temp_path(path);

        if let Err(err) = Self::write_file(snapshot, &tmp) {
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }

        #[cfg(windows)]
        if path.exists() {
            let _ = fs::remove_file(path);
        }
        fs::rename(&tmp, path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            Error::Io {
                operation: format!("move snapshot into place at {}", path.display()),
                source,
            }
        })
    }

    fn load(&self, path: &Path) -> Result<Snapshot> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {}", path.display()),
            source,
        })?;

        Snapshot::read_from(BufReader::new(file))
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
