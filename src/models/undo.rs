//! Undo log data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One completed move, sufficient to reverse it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversalEntry {
    /// Original location.
    pub from: PathBuf,
    /// Location actually written to.
    pub to: PathBuf,
}

impl ReversalEntry {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Undo log file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoLog {
    /// When the run finished.
    pub timestamp: DateTime<Utc>,
    /// Config file the run used.
    pub config: String,
    /// Moves performed, in execution order.
    pub operations: Vec<ReversalEntry>,
}

impl UndoLog {
    /// Create a log stamped with the current time.
    pub fn new(config: impl Into<String>, operations: Vec<ReversalEntry>) -> Self {
        Self {
            timestamp: Utc::now(),
            config: config.into(),
            operations,
        }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
