//! forg CLI
//!
//! A command-line tool for organizing files into folders by rule.

use clap::Parser;
use forg::cli::{
    args::{Cli, Commands},
    commands::{init, preview, run, undo, Context},
};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    let ctx = Context::from(&cli);

    // Run the appropriate command
    match cli.command {
        Commands::Run { dry_run, scan } => {
            run::run(&ctx, dry_run, scan)?;
        }

        Commands::Preview { scan } => {
            preview::preview(&ctx, scan)?;
        }

        Commands::Undo { dry_run } => {
            undo::undo(&ctx, dry_run)?;
        }

        Commands::Init => {
            init::init(&ctx)?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("forg=debug")
    } else if quiet {
        EnvFilter::new("forg=warn")
    } else {
        EnvFilter::new("forg=info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
