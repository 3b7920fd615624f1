use std::fs;

use naughts::{
    Error, Snapshot,
    adapters::MsgPackRepository,
    ports::SnapshotRepository,
    tictactoe::Configuration,
};
use tempfile::TempDir;

#[test]
fn trained_snapshot_survives_a_file_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("GAMESTATES.msgpack");
    let repo = MsgPackRepository::new();

    let mut snapshot = Snapshot::build();
    let opening: Configuration = ".........".parse().unwrap();
    let reply: Configuration = "....X...O".parse().unwrap();
    snapshot.table_mut().reinforce_win(&opening, 4).unwrap();
    snapshot.table_mut().reinforce_loss(&reply, 0).unwrap();
    snapshot.table_mut().reinforce_draw(&reply, 2).unwrap();
    snapshot.record_save();
    snapshot.record_save();

    repo.save(&snapshot, &path).unwrap();
    let loaded = repo.load(&path).unwrap();

    assert_eq!(loaded.save_count(), 2);
    assert_eq!(loaded.table().weight_of(&opening, 4).unwrap(), 4);
    assert_eq!(loaded.table().weight_of(&reply, 0).unwrap(), 0);
    assert_eq!(loaded.table().weight_of(&reply, 2).unwrap(), 2);
    assert_eq!(loaded, snapshot);
}

#[test]
fn truncated_file_is_reported_as_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("GAMESTATES.msgpack");
    let repo = MsgPackRepository::new();

    repo.save(&Snapshot::build(), &path).unwrap();
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    assert!(matches!(
        repo.load(&path),
        Err(Error::CorruptSnapshot { .. })
    ));
}

#[test]
fn failed_save_keeps_the_previous_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("GAMESTATES.msgpack");
    let repo = MsgPackRepository::new();

    let mut snapshot = Snapshot::build();
    snapshot.record_save();
    repo.save(&snapshot, &path).unwrap();

    // A directory where the file should be makes the rename fail
    let blocked = temp_dir.path().join("blocked");
    fs::create_dir(&blocked).unwrap();
    fs::write(blocked.join("child"), b"x").unwrap();
    assert!(repo.save(&snapshot, &blocked).is_err());

    assert_eq!(repo.load(&path).unwrap().save_count(), 1);
    let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}
