//! Report rendering.

use crate::models::plan::{ExecutionReport, MoveOperation};
use crate::models::undo::UndoLog;
use crate::utils::fs::short_path;
use colored::Colorize;

/// Timestamp layout used when displaying undo metadata.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Print the outcome of a run or preview.
pub fn print_report(report: &ExecutionReport) {
    if report.dry_run {
        println!("{}", "--- Dry Run ---".bold().yellow());
        if report.operations.is_empty() {
            println!("No files matched.");
            return;
        }
        print_table(&report.operations);
        println!();
        println!("{} file(s) would be moved.", report.operations.len());
        return;
    }

    if report.total() == 0 {
        println!("No files matched.");
        return;
    }

    println!("{}", "[Summary]".bold().green());
    println!("  {} {}", "Moved:".bold(), report.moved);
    println!("  {} {}", "Skipped:".bold(), report.skipped);
    println!("  {} {}", "Conflicts:".bold(), report.conflicts);
    println!("  {} {}", "Errors:".bold(), report.errors);

    if !report.is_success() {
        println!();
        println!("{}", "[FAILED]".bold().red());
        for (op, reason) in report.failures() {
            println!("  - {}: {}", short_path(&op.source), reason);
        }
    }

    if report.moved > 0 {
        println!();
        println!("  To undo these moves: {}", "forg undo".cyan());
    }
}

/// Print a File / Rule / Destination table.
pub fn print_table(operations: &[MoveOperation]) {
    let rows: Vec<(String, &str, String)> = operations
        .iter()
        .map(|op| {
            (
                short_path(&op.source),
                op.rule_name.as_str(),
                short_path(&op.destination),
            )
        })
        .collect();

    let file_width = column_width("File", rows.iter().map(|r| r.0.as_str()));
    let rule_width = column_width("Rule", rows.iter().map(|r| r.1));
    let dest_width = column_width("Destination", rows.iter().map(|r| r.2.as_str()));

    println!(
        "  {}  {}  {}",
        format!("{:<w$}", "File", w = file_width).bold(),
        format!("{:<w$}", "Rule", w = rule_width).bold(),
        format!("{:<w$}", "Destination", w = dest_width).bold()
    );
    println!(
        "  {}  {}  {}",
        "─".repeat(file_width),
        "─".repeat(rule_width),
        "─".repeat(dest_width)
    );
    for (file, rule, dest) in &rows {
        println!(
            "  {:<fw$}  {}  {}",
            file,
            format!("{:<w$}", rule, w = rule_width).cyan(),
            dest,
            fw = file_width
        );
    }
}

/// Print the entries an undo would restore, most recent first.
pub fn print_undo_preview(log: &UndoLog) {
    println!("{}", "[DRY-RUN] Would restore:".bold().yellow());
    for entry in log.operations.iter().rev() {
        println!(
            "  {} {} {}",
            short_path(&entry.to),
            "->".yellow(),
            short_path(&entry.from)
        );
    }
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_width() {
        assert_eq!(column_width("File", ["a.txt", "longer-name.txt"].into_iter()), 15);
        assert_eq!(column_width("Destination", std::iter::empty()), 11);
        assert_eq!(column_width("Rule", ["é"].into_iter()), 4);
    }
}
