//! File system utilities.
//!
//! The executor and the undo executor only touch the disk through the
//! [`FileSystem`] trait, so both can run against [`MemoryFs`] in tests.

use crate::Result;
use std::io;
use std::path::{Path, PathBuf};

/// Permission mode for directories created by forg.
pub const DIR_MODE: u32 = 0o750;

/// The narrow set of file system capabilities needed to move files.
pub trait FileSystem {
    /// Rename `from` to `to`, replacing any file already at `to`.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Create a directory and all missing ancestors.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Report whether anything exists at `path`.
    ///
    /// A missing path is `Ok(false)`; any other stat failure is an error.
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).rename(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        (**self).exists(path)
    }
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        create_dir_all(path)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        match std::fs::symlink_metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Create a directory and all parent directories with [`DIR_MODE`].
pub fn create_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path)
}

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_path(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return dirs::home_dir().ok_or(crate::Error::HomeDirNotFound);
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or(crate::Error::HomeDirNotFound)?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(path))
}

/// Expand `~` and anchor relative paths at the current directory.
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    absolute_path(&expand_path(path)?)
}

/// Make `path` absolute without touching the file system.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

/// Replace the home directory prefix with `~` for display.
pub fn short_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rel) = path.strip_prefix(&home) {
            return Path::new("~").join(rel).display().to_string();
        }
    }
    path.display().to_string()
}

/// Get file extension in lowercase, without the leading dot.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

#[cfg(test)]
pub use memory::MemoryFs;
