//! Run command implementation.
//!
//! Loads the config, moves matching files and records an undo log.

use super::Context;
use crate::cli::args::ScanArgs;
use crate::cli::output;
use crate::core::organizer::{self, RunOptions};
use crate::core::undo_store::UndoStore;
use crate::models::config::Config;
use crate::utils::fs;
use crate::Result;
use colored::Colorize;

/// Execute the configured rules.
pub fn run(ctx: &Context, dry_run: bool, scan: ScanArgs) -> Result<()> {
    let store = UndoStore::new()?;
    run_with_store(ctx, &store, dry_run, scan)
}

/// Execute the configured rules, recording the undo log in `store`.
pub fn run_with_store(ctx: &Context, store: &UndoStore, dry_run: bool, scan: ScanArgs) -> Result<()> {
    let config = Config::load(&ctx.config)?;

    if !ctx.quiet && !dry_run {
        println!("{}", "[RUN] Organizing files...".bold().cyan());
        println!("  {} {}", "Source:".bold(), config.source);
        println!("  {} {}", "Conflict:".bold(), config.conflict_strategy());
        println!("  {} {}", "Rules:".bold(), config.rules.len());
        println!();
    }

    let options = RunOptions {
        dry_run,
        verbose: ctx.verbose,
        recursive: scan.recursive,
        include_hidden: scan.include_hidden,
        show_progress: !ctx.verbose && !ctx.quiet,
        config_label: fs::resolve_path(&ctx.config.to_string_lossy())?
            .display()
            .to_string(),
    };

    let report = organizer::run(&config, &options, store)?;

    if !ctx.quiet {
        output::print_report(&report);
    }

    Ok(())
}
