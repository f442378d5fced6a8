//! Rule matching engine.
//!
//! A rule holds an ordered list of matchers and applies only when every one
//! of them matches. The engine returns the first applicable rule.

use crate::models::config::RuleConfig;
use crate::models::file::FileRecord;
use crate::utils::{fs, units};
use crate::Result;
use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;

/// A single predicate over a file record.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Lowercased extensions without the leading dot (`jpg`, `tar.gz`).
    Extension(Vec<String>),
    /// Shell glob over the file name.
    Pattern(glob::Pattern),
    /// Size at least this many bytes.
    MinSize(u64),
    /// Size at most this many bytes.
    MaxSize(u64),
    /// Modified more than this many seconds ago.
    OlderThan(u64),
    /// Modified less than this many seconds ago.
    NewerThan(u64),
}

impl Matcher {
    /// Build an extension matcher; accepts `.jpg`, `jpg` or `JPG`.
    pub fn extensions<S: AsRef<str>>(extensions: &[S]) -> Self {
        Matcher::Extension(
            extensions
                .iter()
                .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        )
    }

    /// Check the matcher against the current time.
    pub fn matches(&self, file: &FileRecord) -> bool {
        self.matches_at(file, Utc::now())
    }

    /// Check the matcher, evaluating age criteria relative to `now`.
    pub fn matches_at(&self, file: &FileRecord, now: DateTime<Utc>) -> bool {
        match self {
            Matcher::Extension(extensions) => {
                let name = file.name.to_lowercase();
                extensions
                    .iter()
                    .any(|ext| *ext == file.extension || name.ends_with(&format!(".{}", ext)))
            }
            Matcher::Pattern(pattern) => pattern.matches(&file.name),
            Matcher::MinSize(min) => file.size >= *min,
            Matcher::MaxSize(max) => file.size <= *max,
            Matcher::OlderThan(secs) => file.modified < threshold(now, *secs),
            Matcher::NewerThan(secs) => file.modified > threshold(now, *secs),
        }
    }
}

fn threshold(now: DateTime<Utc>, secs: u64) -> DateTime<Utc> {
    let age = Duration::try_seconds(i64::try_from(secs).unwrap_or(i64::MAX))
        .unwrap_or(Duration::MAX);
    now.checked_sub_signed(age).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// A named rule mapping matching files to a destination directory.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub destination: PathBuf,
    pub matchers: Vec<Matcher>,
}

impl Rule {
    /// Check if every matcher matches. A rule without matchers never matches.
    pub fn matches(&self, file: &FileRecord) -> bool {
        self.matches_at(file, Utc::now())
    }

    pub fn matches_at(&self, file: &FileRecord, now: DateTime<Utc>) -> bool {
        !self.matchers.is_empty() && self.matchers.iter().all(|m| m.matches_at(file, now))
    }

    /// Build a rule from its configuration.
    pub fn from_config(config: &RuleConfig) -> Result<Self> {
        let invalid = |field: &str, e: crate::Error| {
            crate::Error::invalid_rule(&config.name, format!("{}: {}", field, e))
        };
        let criteria = &config.criteria;
        let mut matchers = Vec::new();

        if !criteria.extensions.is_empty() {
            matchers.push(Matcher::extensions(&criteria.extensions));
        }

        if let Some(ref pattern) = criteria.pattern {
            let pattern = glob::Pattern::new(pattern).map_err(|e| {
                crate::Error::invalid_rule(&config.name, format!("pattern: {}", e))
            })?;
            matchers.push(Matcher::Pattern(pattern));
        }

        if let Some(ref size) = criteria.min_size {
            let bytes = units::parse_size(size).map_err(|e| invalid("min_size", e))?;
            matchers.push(Matcher::MinSize(bytes));
        }

        if let Some(ref size) = criteria.max_size {
            let bytes = units::parse_size(size).map_err(|e| invalid("max_size", e))?;
            matchers.push(Matcher::MaxSize(bytes));
        }

        if let Some(ref age) = criteria.older_than {
            let secs = units::parse_duration(age).map_err(|e| invalid("older_than", e))?;
            matchers.push(Matcher::OlderThan(secs));
        }

        if let Some(ref age) = criteria.newer_than {
            let secs = units::parse_duration(age).map_err(|e| invalid("newer_than", e))?;
            matchers.push(Matcher::NewerThan(secs));
        }

        Ok(Self {
            name: config.name.clone(),
            destination: fs::resolve_path(&config.destination)?,
            matchers,
        })
    }
}

/// Ordered rule set with first-match-wins semantics.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Build the engine from configured rules, in order.
    pub fn from_config(configs: &[RuleConfig]) -> Result<Self> {
        let rules = configs
            .iter()
            .map(Rule::from_config)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Return the first rule that matches the file.
    pub fn find_match(&self, file: &FileRecord) -> Option<&Rule> {
        let now = Utc::now();
        self.rules.iter().find(|rule| rule.matches_at(file, now))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}
