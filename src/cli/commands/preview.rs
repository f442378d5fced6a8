//! Preview command implementation.

use super::Context;
use crate::cli::args::ScanArgs;
use crate::Result;

/// Show what a run would do without moving anything.
pub fn preview(ctx: &Context, scan: ScanArgs) -> Result<()> {
    super::run::run(ctx, true, scan)
}
