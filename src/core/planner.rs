//! Plan builder.
//!
//! Pairs each scanned file with the first rule that matches it.

use crate::core::rules::RuleEngine;
use crate::models::file::FileRecord;
use crate::models::plan::MoveOperation;

/// Build the ordered list of moves for the scanned files.
///
/// Files that match no rule are left out and stay where they are.
pub fn build_plan(files: &[FileRecord], engine: &RuleEngine) -> Vec<MoveOperation> {
    let plan: Vec<MoveOperation> = files
        .iter()
        .filter_map(|file| {
            engine.find_match(file).map(|rule| {
                tracing::debug!("{} matched rule {:?}", file.path.display(), rule.name);
                MoveOperation::new(&file.path, &rule.destination, &rule.name)
            })
        })
        .collect();

    tracing::info!(
        "Planned {} move(s) for {} scanned file(s)",
        plan.len(),
        files.len()
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::{Matcher, Rule};
    use std::path::PathBuf;

    fn rule(name: &str, ext: &str, destination: &str) -> Rule {
        Rule {
            name: name.to_string(),
            destination: PathBuf::from(destination),
            matchers: vec![Matcher::extensions(&[ext])],
        }
    }

    #[test]
    fn test_build_plan_keeps_scan_order_and_drops_unmatched() {
        let engine = RuleEngine::new(vec![
            rule("images", ".jpg", "/images"),
            rule("docs", ".pdf", "/docs"),
        ]);
        let now = chrono::Utc::now();
        let files = vec![
            FileRecord::new("/src/b.pdf", 1, now),
            FileRecord::new("/src/random.xyz", 1, now),
            FileRecord::new("/src/a.jpg", 1, now),
        ];

        let plan = build_plan(&files, &engine);

        assert_eq!(
            plan,
            vec![
                MoveOperation::new("/src/b.pdf", "/docs", "docs"),
                MoveOperation::new("/src/a.jpg", "/images", "images"),
            ]
        );
    }

    #[test]
    fn test_build_plan_empty() {
        let engine = RuleEngine::new(vec![rule("images", ".jpg", "/images")]);
        assert!(build_plan(&[], &engine).is_empty());
    }
}
