//! Directory scanner module.
//!
//! Collects file records from a source directory, optionally recursing and
//! optionally including hidden files.

use crate::models::file::FileRecord;
use crate::Result;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Scanner options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Walk subdirectories instead of only the top level.
    pub recursive: bool,
    /// Include entries whose name starts with a dot.
    pub include_hidden: bool,
}

/// Check if an entry's name starts with a dot.
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Create a FileRecord from a walked entry.
fn create_file_record(entry: &DirEntry) -> Result<FileRecord> {
    let metadata = entry.metadata().map_err(std::io::Error::from)?;
    let modified = metadata
        .modified()
        .map(chrono::DateTime::<chrono::Utc>::from)
        .unwrap_or_else(|_| chrono::Utc::now());

    Ok(FileRecord::new(entry.path(), metadata.len(), modified))
}

/// Scan a directory for files.
///
/// Directories themselves never appear in the result. Hidden directories are
/// pruned entirely unless `include_hidden` is set. Entries are returned in
/// file-name order within each directory.
///
/// # Arguments
/// * `path` - The directory path to scan
/// * `options` - Recursion and hidden-file settings
pub fn scan_directory(path: &Path, options: ScanOptions) -> Result<Vec<FileRecord>> {
    crate::utils::fs::ensure_directory(path)?;

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(path)
        .follow_links(false)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || options.include_hidden || !is_hidden(e));

    let mut files = Vec::new();
    let mut dirs_scanned = 0usize;

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(std::io::Error::from(e).into()),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            dirs_scanned += 1;
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        match create_file_record(&entry) {
            Ok(record) => files.push(record),
            Err(e) => tracing::warn!("Failed to read file {:?}: {}", entry.path(), e),
        }
    }

    tracing::info!(
        "Scanned {} directories under {}: {} files",
        dirs_scanned,
        path.display(),
        files.len()
    );

    Ok(files)
}
