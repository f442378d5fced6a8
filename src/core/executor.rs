//! Move executor module.
//!
//! Executes a plan of moves one at a time:
//! - creates destination directories as needed
//! - resolves destination conflicts (skip, rename, overwrite)
//! - renames each file into place, or only reports it in a dry run
//!
//! Every move that actually happened yields a [`ReversalEntry`]. A failed or
//! skipped operation leaves its source untouched and is never retried.

use crate::models::config::ConflictStrategy;
use crate::models::plan::{ExecutionReport, MoveOperation};
use crate::models::undo::ReversalEntry;
use crate::utils::fs::{FileSystem, OsFileSystem};
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Upper bound on numbered names tried by the rename strategy.
pub const MAX_RENAME_ATTEMPTS: u32 = 1000;

/// Move executor.
pub struct Executor<F: FileSystem = OsFileSystem> {
    fs: F,
    strategy: ConflictStrategy,
    verbose: bool,
    show_progress: bool,
}

/// How the final destination of one move was decided.
enum Resolution {
    Free(PathBuf),
    Overwrite(PathBuf),
    Renamed(PathBuf),
    Skip,
}

impl Executor<OsFileSystem> {
    /// Create an executor on the real file system.
    pub fn new(strategy: ConflictStrategy, verbose: bool) -> Self {
        Self::with_fs(OsFileSystem, strategy, verbose)
    }
}

impl<F: FileSystem> Executor<F> {
    /// Create an executor backed by the given file system.
    pub fn with_fs(fs: F, strategy: ConflictStrategy, verbose: bool) -> Self {
        Self {
            fs,
            strategy,
            verbose,
            show_progress: false,
        }
    }

    /// Show a progress bar while executing.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Execute the operations in order.
    ///
    /// With `simulate` set nothing is touched and every operation is reported
    /// as moved. Individual failures are counted in the report, never
    /// returned as an error.
    pub fn execute(
        &self,
        operations: &[MoveOperation],
        simulate: bool,
    ) -> (ExecutionReport, Vec<ReversalEntry>) {
        let mut report = ExecutionReport::new(simulate);
        let mut reversals = Vec::new();

        if simulate {
            for op in operations {
                let target = op.target_path();
                self.narrate(format_args!(
                    "[dry-run] {} -> {} (rule: {})",
                    op.source.display(),
                    target.display(),
                    op.rule_name
                ));
                report.record_moved(op, target);
            }
            return (report, reversals);
        }

        tracing::info!(
            "Executing {} move(s) with conflict strategy {}",
            operations.len(),
            self.strategy
        );

        let pb = self.progress_bar(operations.len());

        for op in operations {
            pb.set_message(
                op.source
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
            );
            pb.inc(1);

            match self.execute_move(op) {
                Ok(Some(entry)) => {
                    self.narrate(format_args!(
                        "moved {} -> {} (rule: {})",
                        entry.from.display(),
                        entry.to.display(),
                        op.rule_name
                    ));
                    report.record_moved(op, entry.to.clone());
                    reversals.push(entry);
                }
                Ok(None) => {
                    let target = op.target_path();
                    self.narrate(format_args!(
                        "skipped {} (conflict at {})",
                        op.source.display(),
                        target.display()
                    ));
                    report.record_skipped(op, target);
                }
                Err(e) => {
                    tracing::warn!("Failed to move {}: {}", op.source.display(), e);
                    report.record_failed(op, e.to_string());
                }
            }
        }

        pb.finish_and_clear();

        tracing::info!(
            "Moved {}, skipped {}, {} conflict(s), {} error(s)",
            report.moved,
            report.skipped,
            report.conflicts,
            report.errors
        );

        (report, reversals)
    }

    /// Perform one move. `Ok(None)` means it was skipped on conflict.
    fn execute_move(&self, op: &MoveOperation) -> Result<Option<ReversalEntry>> {
        self.fs.create_dir_all(&op.destination).map_err(|e| {
            crate::Error::other(format!(
                "creating directory {}: {}",
                op.destination.display(),
                e
            ))
        })?;

        let target = op.target_path();
        let final_dest = match self.resolve_conflict(&target, &op.source)? {
            Resolution::Free(path) => path,
            Resolution::Overwrite(path) => {
                tracing::debug!("Overwriting existing {}", path.display());
                path
            }
            Resolution::Renamed(path) => {
                self.narrate(format_args!(
                    "conflict resolved for {} -> {}",
                    target.display(),
                    path.display()
                ));
                path
            }
            Resolution::Skip => return Ok(None),
        };

        self.fs.rename(&op.source, &final_dest).map_err(|e| {
            crate::Error::other(format!(
                "moving {} to {}: {}",
                op.source.display(),
                final_dest.display(),
                e
            ))
        })?;

        Ok(Some(ReversalEntry::new(&op.source, final_dest)))
    }

    /// Decide the final destination when `target` may already be occupied.
    fn resolve_conflict(&self, target: &Path, source: &Path) -> Result<Resolution> {
        if !self.stat(target)? {
            return Ok(Resolution::Free(target.to_path_buf()));
        }

        // A file already sitting at its own destination is left alone.
        if target == source {
            return Ok(Resolution::Skip);
        }

        match self.strategy {
            ConflictStrategy::Skip => Ok(Resolution::Skip),
            ConflictStrategy::Overwrite => Ok(Resolution::Overwrite(target.to_path_buf())),
            ConflictStrategy::Rename => self.find_unique_name(target).map(Resolution::Renamed),
        }
    }

    /// Probe `stem-1.ext`, `stem-2.ext`, ... for a free name.
    fn find_unique_name(&self, target: &Path) -> Result<PathBuf> {
        let dir = target.parent().unwrap_or_else(|| Path::new(""));
        let stem = target
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let ext = target
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        for i in 1..=MAX_RENAME_ATTEMPTS {
            let candidate = dir.join(format!("{}-{}{}", stem, i, ext));
            if !self.stat(&candidate)? {
                return Ok(candidate);
            }
        }

        Err(crate::Error::RenameExhausted {
            path: target.to_path_buf(),
            attempts: MAX_RENAME_ATTEMPTS,
        })
    }

    fn stat(&self, path: &Path) -> Result<bool> {
        self.fs
            .exists(path)
            .map_err(|e| crate::Error::other(format!("stat {}: {}", path.display(), e)))
    }

    fn narrate(&self, message: std::fmt::Arguments<'_>) {
        if self.verbose {
            tracing::info!("{}", message);
        } else {
            tracing::debug!("{}", message);
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        pb.set_style(style);
        pb
    }
}
