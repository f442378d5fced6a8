//! Integration tests for the undo log store and undo executor.
//!
//! Tests cover:
//! - Store persistence and error classes
//! - Restoring files on the real file system
//! - Halting on the first failed restore

use forg::core::executor::Executor;
use forg::core::undo::UndoExecutor;
use forg::core::undo_store::{UndoStore, UNDO_FILE};
use forg::models::config::ConflictStrategy;
use forg::models::plan::MoveOperation;
use forg::models::undo::{ReversalEntry, UndoLog};
use std::fs;
use tempfile::TempDir;

// ========== STORE ==========

#[test]
fn test_store_write_read_delete() {
    let temp_dir = TempDir::new().unwrap();
    let store = UndoStore::at(temp_dir.path().join(".forg"));

    let log = UndoLog::new(
        "/home/user/.forg.toml",
        vec![ReversalEntry::new("/src/a.txt", "/dst/a.txt")],
    );
    store.write(&log).unwrap();

    assert!(store.exists());
    assert_eq!(store.path(), temp_dir.path().join(".forg").join(UNDO_FILE));

    let loaded = store.read().unwrap();
    assert_eq!(loaded.config, "/home/user/.forg.toml");
    assert_eq!(loaded.operations, log.operations);
    assert_eq!(loaded.timestamp, log.timestamp);

    store.delete().unwrap();
    assert!(!store.exists());
    // Deleting twice is fine
    store.delete().unwrap();
}

#[test]
fn test_store_write_replaces_previous_log() {
    let temp_dir = TempDir::new().unwrap();
    let store = UndoStore::at(temp_dir.path());

    store
        .write(&UndoLog::new("first", vec![ReversalEntry::new("/a", "/b")]))
        .unwrap();
    store
        .write(&UndoLog::new("second", vec![ReversalEntry::new("/c", "/d")]))
        .unwrap();

    let loaded = store.read().unwrap();
    assert_eq!(loaded.config, "second");
    assert_eq!(loaded.len(), 1);
}

#[test]
fn test_store_read_missing_is_no_undo_log() {
    let temp_dir = TempDir::new().unwrap();
    let store = UndoStore::at(temp_dir.path().join("never-created"));

    assert!(matches!(store.read(), Err(forg::Error::NoUndoLog(_))));
}

#[test]
fn test_store_read_corrupt_is_invalid_undo_log() {
    let temp_dir = TempDir::new().unwrap();
    let store = UndoStore::at(temp_dir.path());
    fs::write(store.path(), "{ not json").unwrap();

    assert!(matches!(
        store.read(),
        Err(forg::Error::InvalidUndoLog { .. })
    ));
}

#[test]
fn test_store_file_layout() {
    let temp_dir = TempDir::new().unwrap();
    let store = UndoStore::at(temp_dir.path());
    store
        .write(&UndoLog::new("cfg", vec![ReversalEntry::new("/from", "/to")]))
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert!(value["timestamp"].is_string());
    assert_eq!(value["config"], "cfg");
    assert_eq!(value["operations"][0]["from"], "/from");
    assert_eq!(value["operations"][0]["to"], "/to");
}

// ========== UNDO EXECUTION ==========

#[test]
fn test_move_then_undo_restores_contents() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("inbox");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("a.pdf"), b"%PDF-a").unwrap();
    fs::write(source.join("b.jpg"), b"\xff\xd8jpeg").unwrap();

    let ops = vec![
        MoveOperation::new(source.join("a.pdf"), temp_dir.path().join("Documents"), "docs"),
        MoveOperation::new(source.join("b.jpg"), temp_dir.path().join("Pictures"), "images"),
    ];
    let (report, reversals) = Executor::new(ConflictStrategy::Skip, false).execute(&ops, false);
    assert_eq!(report.moved, 2);
    assert!(!source.join("a.pdf").exists());

    let restored = UndoExecutor::new(false)
        .execute(&UndoLog::new("cfg", reversals))
        .unwrap();

    assert_eq!(restored, 2);
    assert_eq!(fs::read(source.join("a.pdf")).unwrap(), b"%PDF-a");
    assert_eq!(fs::read(source.join("b.jpg")).unwrap(), b"\xff\xd8jpeg");
    assert!(!temp_dir.path().join("Documents").join("a.pdf").exists());
}

#[test]
fn test_undo_of_renamed_file_leaves_existing_destination() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("dest");
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("report.txt"), "older").unwrap();
    let source = temp_dir.path().join("report.txt");
    fs::write(&source, "newer").unwrap();

    let ops = vec![MoveOperation::new(&source, &dest, "docs")];
    let (_, reversals) = Executor::new(ConflictStrategy::Rename, false).execute(&ops, false);
    assert_eq!(reversals[0].to, dest.join("report-1.txt"));

    UndoExecutor::new(false)
        .execute(&UndoLog::new("cfg", reversals))
        .unwrap();

    assert_eq!(fs::read_to_string(&source).unwrap(), "newer");
    assert_eq!(fs::read_to_string(dest.join("report.txt")).unwrap(), "older");
    assert!(!dest.join("report-1.txt").exists());
}

#[test]
fn test_undo_halts_at_first_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dst).unwrap();
    fs::write(dst.join("first.txt"), "1").unwrap();
    fs::write(dst.join("third.txt"), "3").unwrap();

    let log = UndoLog::new(
        "cfg",
        vec![
            ReversalEntry::new(src.join("first.txt"), dst.join("first.txt")),
            ReversalEntry::new(src.join("second.txt"), dst.join("second.txt")),
            ReversalEntry::new(src.join("third.txt"), dst.join("third.txt")),
        ],
    );

    let err = UndoExecutor::new(false).execute(&log).unwrap_err();
    assert!(matches!(
        err,
        forg::Error::UndoHalted {
            position: 2,
            total: 3,
            restored: 1,
            ..
        }
    ));

    // The most recent move was reversed, the oldest was never attempted
    assert!(src.join("third.txt").exists());
    assert!(dst.join("first.txt").exists());
    assert!(!src.join("first.txt").exists());
}
