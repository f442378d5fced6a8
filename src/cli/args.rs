//! Command line argument definitions.

use crate::models::config::DEFAULT_CONFIG_FILE;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// forg - Organize files into folders by rule
#[derive(Parser, Debug)]
#[command(name = "forg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute organizing rules and move files
    Run {
        /// Show what would happen without moving files
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Show what forg would do without moving any files
    Preview {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Reverse the most recent run
    Undo {
        /// Dry run - list what would be restored
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate a sample configuration file
    Init,
}

/// Source scanning flags shared by `run` and `preview`.
#[derive(Args, Debug, Clone, Copy)]
pub struct ScanArgs {
    /// Scan directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Include hidden files and directories
    #[arg(long)]
    pub include_hidden: bool,
}
