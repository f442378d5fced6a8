//! Undo execution module.
//!
//! Moves files recorded in an [`UndoLog`] back to where they came from, last
//! move first. The first entry that cannot be restored halts the undo; entries
//! restored before it stay restored. Deleting the log afterwards is the
//! caller's job.

use crate::models::undo::{ReversalEntry, UndoLog};
use crate::utils::fs::{FileSystem, OsFileSystem};
use crate::Result;
use std::path::Path;

/// Undo executor.
pub struct UndoExecutor<F: FileSystem = OsFileSystem> {
    fs: F,
    verbose: bool,
}

impl UndoExecutor<OsFileSystem> {
    /// Create an undo executor on the real file system.
    pub fn new(verbose: bool) -> Self {
        Self::with_fs(OsFileSystem, verbose)
    }
}

impl<F: FileSystem> UndoExecutor<F> {
    /// Create an undo executor backed by the given file system.
    pub fn with_fs(fs: F, verbose: bool) -> Self {
        Self { fs, verbose }
    }

    /// Reverse every entry of `log`, returning how many were restored.
    pub fn execute(&self, log: &UndoLog) -> Result<usize> {
        let total = log.len();
        tracing::info!("Undoing {} move(s) recorded at {}", total, log.timestamp);

        for (restored, entry) in log.operations.iter().rev().enumerate() {
            if let Err(reason) = self.restore(entry) {
                return Err(crate::Error::UndoHalted {
                    position: restored + 1,
                    total,
                    from: entry.from.clone(),
                    to: entry.to.clone(),
                    restored,
                    reason,
                });
            }

            if self.verbose {
                tracing::info!("restored {} -> {}", entry.to.display(), entry.from.display());
            } else {
                tracing::debug!("restored {} -> {}", entry.to.display(), entry.from.display());
            }
        }

        Ok(total)
    }

    /// Move one file back.
    fn restore(&self, entry: &ReversalEntry) -> std::result::Result<(), String> {
        if !self.exists(&entry.to)? {
            return Err("file is no longer at its recorded location".to_string());
        }
        if self.exists(&entry.from)? {
            return Err("original location is occupied".to_string());
        }

        if let Some(parent) = entry.from.parent() {
            if !parent.as_os_str().is_empty() && !self.exists(parent)? {
                self.fs
                    .create_dir_all(parent)
                    .map_err(|e| format!("recreating {}: {}", parent.display(), e))?;
            }
        }

        self.fs.rename(&entry.to, &entry.from).map_err(|e| e.to_string())
    }

    fn exists(&self, path: &Path) -> std::result::Result<bool, String> {
        self.fs
            .exists(path)
            .map_err(|e| format!("stat {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fs::MemoryFs;
    use std::path::PathBuf;

    fn log(entries: Vec<ReversalEntry>) -> UndoLog {
        UndoLog::new("test.toml", entries)
    }

    #[test]
    fn test_undo_restores_in_reverse_order() {
        let fs = MemoryFs::new()
            .with_file("/dst/a.txt", "a")
            .with_file("/dst/b.txt", "b");
        let undo = UndoExecutor::with_fs(&fs, false);

        let restored = undo
            .execute(&log(vec![
                ReversalEntry::new("/src/a.txt", "/dst/a.txt"),
                ReversalEntry::new("/src/b.txt", "/dst/b.txt"),
            ]))
            .unwrap();

        assert_eq!(restored, 2);
        assert_eq!(
            fs.renames(),
            vec![
                (PathBuf::from("/dst/b.txt"), PathBuf::from("/src/b.txt")),
                (PathBuf::from("/dst/a.txt"), PathBuf::from("/src/a.txt")),
            ]
        );
    }

    #[test]
    fn test_undo_halts_on_missing_file() {
        let fs = MemoryFs::new()
            .with_file("/dst/a.txt", "a")
            .with_file("/dst/c.txt", "c");
        let undo = UndoExecutor::with_fs(&fs, false);

        let result = undo.execute(&log(vec![
            ReversalEntry::new("/src/a.txt", "/dst/a.txt"),
            ReversalEntry::new("/src/b.txt", "/dst/b.txt"),
            ReversalEntry::new("/src/c.txt", "/dst/c.txt"),
        ]));

        match result {
            Err(crate::Error::UndoHalted {
                position,
                total,
                to,
                restored,
                ..
            }) => {
                assert_eq!((position, total, restored), (2, 3, 1));
                assert_eq!(to, PathBuf::from("/dst/b.txt"));
            }
            other => panic!("expected UndoHalted, got {:?}", other),
        }

        // c was restored, a is still pending
        assert_eq!(fs.content(Path::new("/src/c.txt")).as_deref(), Some("c"));
        assert_eq!(fs.content(Path::new("/dst/a.txt")).as_deref(), Some("a"));
    }

    #[test]
    fn test_undo_refuses_to_clobber_original_location() {
        let fs = MemoryFs::new()
            .with_file("/dst/a.txt", "moved")
            .with_file("/src/a.txt", "new file");
        let undo = UndoExecutor::with_fs(&fs, false);

        let result = undo.execute(&log(vec![ReversalEntry::new("/src/a.txt", "/dst/a.txt")]));

        assert!(matches!(result, Err(crate::Error::UndoHalted { restored: 0, .. })));
        assert_eq!(fs.content(Path::new("/src/a.txt")).as_deref(), Some("new file"));
    }

    #[test]
    fn test_undo_recreates_missing_parent() {
        let fs = MemoryFs::new().with_file("/dst/a.txt", "a");
        let undo = UndoExecutor::with_fs(&fs, false);

        undo.execute(&log(vec![ReversalEntry::new("/gone/src/a.txt", "/dst/a.txt")]))
            .unwrap();

        assert!(fs.has_dir(Path::new("/gone/src")));
        assert_eq!(fs.content(Path::new("/gone/src/a.txt")).as_deref(), Some("a"));
    }

    #[test]
    fn test_undo_empty_log() {
        let fs = MemoryFs::new();
        let undo = UndoExecutor::with_fs(&fs, true);
        assert_eq!(undo.execute(&log(vec![])).unwrap(), 0);
    }
}
