//! Error types for forg.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for forg.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid rule {rule:?}: {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("Invalid size {0:?}: expected a number followed by B, KB, MB, GB or TB")]
    InvalidSize(String),

    #[error("Invalid duration {0:?}: expected a whole number followed by d, w, m or y")]
    InvalidDuration(String),

    #[error("Cannot find home directory")]
    HomeDirNotFound,

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    #[error("Could not find a free name for {path} after {attempts} attempts")]
    RenameExhausted { path: PathBuf, attempts: u32 },

    // Undo errors
    #[error("Nothing to undo (no undo log at {})", .0.display())]
    NoUndoLog(PathBuf),

    #[error("Invalid undo log {}: {reason}", .path.display())]
    InvalidUndoLog { path: PathBuf, reason: String },

    #[error(
        "Undo halted at entry {position} of {total} ({} -> {}): {reason}; {restored} file(s) already restored",
        .to.display(),
        .from.display()
    )]
    UndoHalted {
        position: usize,
        total: usize,
        from: PathBuf,
        to: PathBuf,
        restored: usize,
        reason: String,
    },

    #[error("Moved {moved} file(s) but could not save the undo log: {reason}")]
    UndoLogNotSaved { moved: usize, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // TOML errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create an invalid-rule error.
    pub fn invalid_rule<R: Into<String>, S: Into<String>>(rule: R, reason: S) -> Self {
        Error::InvalidRule {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}
