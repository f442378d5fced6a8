//! CLI command implementations.

pub mod init;
pub mod preview;
pub mod run;
pub mod undo;

use std::path::PathBuf;

/// Global flags shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration file path as given on the command line.
    pub config: PathBuf,
    pub verbose: bool,
    pub quiet: bool,
}

impl From<&crate::cli::args::Cli> for Context {
    fn from(cli: &crate::cli::args::Cli) -> Self {
        Self {
            config: cli.config.clone(),
            verbose: cli.verbose,
            quiet: cli.quiet,
        }
    }
}
