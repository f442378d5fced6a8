//! Organize workflow.
//!
//! Scans the configured source, plans moves from the rules, executes them,
//! and records an undo log when anything was actually moved.

use crate::core::executor::Executor;
use crate::core::planner;
use crate::core::rules::RuleEngine;
use crate::core::scanner::{self, ScanOptions};
use crate::core::undo_store::UndoStore;
use crate::models::config::Config;
use crate::models::plan::ExecutionReport;
use crate::models::undo::UndoLog;
use crate::utils::fs;
use crate::Result;

/// Options for a single organize run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Report what would happen without moving anything.
    pub dry_run: bool,
    /// Narrate every operation.
    pub verbose: bool,
    /// Walk subdirectories of the source.
    pub recursive: bool,
    /// Include hidden files and directories.
    pub include_hidden: bool,
    /// Show a progress bar during real runs.
    pub show_progress: bool,
    /// Label stored in the undo log, usually the config file path.
    pub config_label: String,
}

/// Run the full organize workflow.
///
/// Config, scan and rule errors abort the run. Per-file failures are only
/// counted in the returned report.
pub fn run(config: &Config, options: &RunOptions, store: &UndoStore) -> Result<ExecutionReport> {
    let engine = RuleEngine::from_config(&config.rules)?;

    let source = fs::resolve_path(&config.source)?;
    let files = scanner::scan_directory(
        &source,
        ScanOptions {
            recursive: options.recursive,
            include_hidden: options.include_hidden,
        },
    )?;

    let plan = planner::build_plan(&files, &engine);

    let executor = Executor::new(config.conflict_strategy(), options.verbose)
        .with_progress(options.show_progress);
    let (report, reversals) = executor.execute(&plan, options.dry_run);

    if !options.dry_run && !reversals.is_empty() {
        let log = UndoLog::new(options.config_label.clone(), reversals);
        store.write(&log).map_err(|e| {
            tracing::error!("Could not save undo log to {:?}: {}", store.path(), e);
            crate::Error::UndoLogNotSaved {
                moved: report.moved,
                reason: e.to_string(),
            }
        })?;
    }

    Ok(report)
}
