//! Undo command implementation.
//!
//! Reads the undo log and moves every recorded file back to its original
//! location. The log is deleted only after a complete undo.

use super::Context;
use crate::cli::output::{self, TIME_FORMAT};
use crate::core::undo::UndoExecutor;
use crate::core::undo_store::UndoStore;
use crate::Result;
use colored::Colorize;

/// Reverse the most recent run.
pub fn undo(ctx: &Context, dry_run: bool) -> Result<()> {
    let store = UndoStore::new()?;
    undo_with_store(ctx, &store, dry_run)
}

/// Reverse the log held by `store`.
pub fn undo_with_store(ctx: &Context, store: &UndoStore, dry_run: bool) -> Result<()> {
    let log = match store.read() {
        Ok(log) => log,
        Err(crate::Error::NoUndoLog(_)) => {
            if !ctx.quiet {
                println!("{}", "Nothing to undo.".yellow());
            }
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if !ctx.quiet {
        println!("{}", "[UNDO] Undo command".bold().cyan());
        println!("  {} {}", "Config:".bold(), log.config);
        println!(
            "  {} {}",
            "Executed at:".bold(),
            log.timestamp
                .with_timezone(&chrono::Local)
                .format(TIME_FORMAT)
        );
        println!("  {} {}", "Operations:".bold(), log.len());
        println!();
    }

    if dry_run {
        if !ctx.quiet {
            output::print_undo_preview(&log);
            println!();
            println!("{}", "[OK] Dry run complete - no changes were made".green());
        }
        return Ok(());
    }

    let executor = UndoExecutor::new(ctx.verbose);
    match executor.execute(&log) {
        Ok(restored) => {
            store.delete()?;
            if !ctx.quiet {
                println!(
                    "{} {} file(s) restored.",
                    "[OK] Undo complete:".bold().green(),
                    restored
                );
            }
            Ok(())
        }
        Err(e) => {
            // main reports the error itself
            eprintln!(
                "{}",
                format!(
                    "The undo log at {} was NOT deleted; fix the problem and run 'forg undo' again.",
                    store.path().display()
                )
                .yellow()
            );
            Err(e)
        }
    }
}
