//! Undo log persistence.
//!
//! Exactly one undo log is kept, at `~/.forg/undo.json`. Writing a new log
//! replaces the previous one.

use crate::models::undo::UndoLog;
use crate::Result;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Directory under the home directory that holds undo state.
pub const UNDO_DIR: &str = ".forg";

/// File name of the undo log.
pub const UNDO_FILE: &str = "undo.json";

/// Reads, writes and deletes the single persisted undo log.
#[derive(Debug, Clone)]
pub struct UndoStore {
    dir: PathBuf,
}

impl UndoStore {
    /// Store at the default location in the user's home directory.
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().ok_or(crate::Error::HomeDirNotFound)?;
        Ok(Self::at(home.join(UNDO_DIR)))
    }

    /// Store in a specific directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the undo log file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(UNDO_FILE)
    }

    /// Persist `log`, replacing any existing log.
    ///
    /// The log is written to a temporary file first and renamed into place,
    /// so a reader never sees a half-written log.
    pub fn write(&self, log: &UndoLog) -> Result<()> {
        let json = serde_json::to_string_pretty(log)?;

        crate::utils::fs::create_dir_all(&self.dir)?;

        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;

        tracing::info!("Undo log saved to {:?} ({} entries)", path, log.len());
        Ok(())
    }

    /// Load the persisted log.
    ///
    /// Fails with [`crate::Error::NoUndoLog`] when nothing has been recorded
    /// and [`crate::Error::InvalidUndoLog`] when the file cannot be parsed.
    pub fn read(&self) -> Result<UndoLog> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(crate::Error::NoUndoLog(path));
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| crate::Error::InvalidUndoLog {
            path,
            reason: e.to_string(),
        })
    }

    /// Remove the persisted log. Succeeds if there is none.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(self.path()) {
            Ok(()) => {
                tracing::debug!("Undo log removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a log is currently stored.
    pub fn exists(&self) -> bool {
        self.path().is_file()
    }
}
