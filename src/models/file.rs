//! Scanned file model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File information collected by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name without path.
    pub name: String,
    /// Lowercased extension without the leading dot, empty if none.
    pub extension: String,
    /// File size in bytes.
    pub size: u64,
    /// Last modified time.
    pub modified: chrono::DateTime<chrono::Utc>,
}

impl FileRecord {
    /// Build a record for a path with the given size and modification time.
    pub fn new(path: impl Into<PathBuf>, size: u64, modified: chrono::DateTime<chrono::Utc>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = crate::utils::fs::get_extension(&path).unwrap_or_default();

        Self {
            path,
            name,
            extension,
            size,
            modified,
        }
    }
}
