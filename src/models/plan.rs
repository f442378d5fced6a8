//! Plan and execution report models.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A proposed move of one file into a rule's destination directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOperation {
    /// Absolute path of the file to move.
    pub source: PathBuf,
    /// Destination directory (not the full target path).
    pub destination: PathBuf,
    /// Name of the rule that matched.
    pub rule_name: String,
}

impl MoveOperation {
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        rule_name: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            rule_name: rule_name.into(),
        }
    }

    /// The destination directory joined with the source's file name.
    pub fn target_path(&self) -> PathBuf {
        match self.source.file_name() {
            Some(name) => self.destination.join(name),
            None => self.destination.clone(),
        }
    }
}

/// What happened to a single operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Outcome {
    /// Moved (or, in a dry run, would be moved) to `to`.
    Moved { to: PathBuf },
    /// Left in place because `conflict_at` was already occupied.
    Skipped { conflict_at: PathBuf },
    /// Left in place because something went wrong.
    Failed { reason: String },
}

/// An operation paired with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub operation: MoveOperation,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Aggregate outcome of one executor run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Files moved (or that would be moved in a dry run).
    pub moved: usize,
    /// Files skipped because of a conflict.
    pub skipped: usize,
    /// Destination conflicts encountered.
    pub conflicts: usize,
    /// Operations that failed.
    pub errors: usize,
    /// Whether this was a simulated run.
    pub dry_run: bool,
    /// Operations that were (or would be) moved, in input order.
    pub operations: Vec<MoveOperation>,
    /// Every operation with its outcome, in input order.
    pub results: Vec<OperationResult>,
}

impl ExecutionReport {
    /// Create an empty report.
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Total number of operations considered.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Check if every operation ended without error.
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }

    /// Operations that failed, with their reasons.
    pub fn failures(&self) -> impl Iterator<Item = (&MoveOperation, &str)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            Outcome::Failed { reason } => Some((&r.operation, reason.as_str())),
            _ => None,
        })
    }

    pub(crate) fn record_moved(&mut self, operation: &MoveOperation, to: PathBuf) {
        self.moved += 1;
        self.operations.push(operation.clone());
        self.push(operation, Outcome::Moved { to });
    }

    pub(crate) fn record_skipped(&mut self, operation: &MoveOperation, conflict_at: PathBuf) {
        self.skipped += 1;
        self.conflicts += 1;
        self.push(operation, Outcome::Skipped { conflict_at });
    }

    pub(crate) fn record_failed(&mut self, operation: &MoveOperation, reason: String) {
        self.errors += 1;
        self.push(operation, Outcome::Failed { reason });
    }

    fn push(&mut self, operation: &MoveOperation, outcome: Outcome) {
        self.results.push(OperationResult {
            operation: operation.clone(),
            outcome,
        });
    }
}
