//! Init command implementation.

use super::Context;
use crate::models::config;
use crate::Result;
use colored::Colorize;
use std::fs;
use std::io::Write;

/// Write a sample configuration file to the config path.
pub fn init(ctx: &Context) -> Result<()> {
    let path = &ctx.config;

    // create_new never replaces an existing file
    let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(crate::Error::FileAlreadyExists(format!(
                "{} (remove it first or edit it directly)",
                path.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };
    file.write_all(config::sample_config().as_bytes())?;

    tracing::debug!("Wrote sample config to {:?}", path);

    if !ctx.quiet {
        println!("{} {}", "[OK] Created".bold().green(), path.display());
        println!("  Edit it to define your rules, then run: {}", "forg preview".cyan());
    }

    Ok(())
}
