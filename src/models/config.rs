//! Configuration model.
//!
//! Rules live in a TOML file (`.forg.toml` by default):
//!
//! ```toml
//! source = "~/Downloads"
//! conflict = "rename"
//!
//! [[rules]]
//! name = "images"
//! destination = "~/Pictures/Sorted"
//! [rules.match]
//! extensions = [".jpg", ".png"]
//! ```

use crate::utils::{fs, units};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = ".forg.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory to organize.
    pub source: String,
    /// Conflict strategy name; empty means skip.
    #[serde(default)]
    pub conflict: String,
    /// Rules, in priority order.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// A single organization rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    #[serde(rename = "match", default)]
    pub criteria: MatchConfig,
    pub destination: String,
}

/// Match criteria for a rule. All configured criteria must hold.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub older_than: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newer_than: Option<String>,
}

impl MatchConfig {
    /// Check if at least one criterion is configured.
    pub fn has_criteria(&self) -> bool {
        !self.extensions.is_empty()
            || self.pattern.is_some()
            || self.min_size.is_some()
            || self.max_size.is_some()
            || self.older_than.is_some()
            || self.newer_than.is_some()
    }
}

/// What to do when a file already exists at the destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictStrategy {
    /// Leave the source where it is.
    #[default]
    Skip,
    /// Move under a numbered name such as `file-1.txt`.
    Rename,
    /// Replace the existing destination file.
    Overwrite,
}

impl ConflictStrategy {
    /// Parse a strategy name, or `None` if it is not recognised.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Some(ConflictStrategy::Skip),
            "rename" => Some(ConflictStrategy::Rename),
            "overwrite" => Some(ConflictStrategy::Overwrite),
            _ => None,
        }
    }
}

/// Unrecognised or empty names fall back to [`ConflictStrategy::Skip`].
impl From<&str> for ConflictStrategy {
    fn from(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

impl fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictStrategy::Skip => write!(f, "skip"),
            ConflictStrategy::Rename => write!(f, "rename"),
            ConflictStrategy::Overwrite => write!(f, "overwrite"),
        }
    }
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let expanded = fs::expand_path(&path.to_string_lossy())?;
        if !expanded.exists() {
            return Err(crate::Error::ConfigNotFound(expanded.display().to_string()));
        }

        let content = std::fs::read_to_string(&expanded)?;
        let config = Self::parse(&content)?;

        tracing::debug!("Loaded {} rule(s) from {:?}", config.rules.len(), expanded);
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The conflict strategy this config selects.
    pub fn conflict_strategy(&self) -> ConflictStrategy {
        ConflictStrategy::from(self.conflict.as_str())
    }

    /// Check that the config is well-formed and its source directory exists.
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(crate::Error::InvalidConfig(
                "source directory is required".to_string(),
            ));
        }

        let source = fs::expand_path(&self.source)?;
        fs::ensure_directory(&source)?;

        if !self.conflict.is_empty() && ConflictStrategy::parse(&self.conflict).is_none() {
            return Err(crate::Error::InvalidConfig(format!(
                "invalid conflict strategy {:?}: must be skip, rename, or overwrite",
                self.conflict
            )));
        }

        if self.rules.is_empty() {
            return Err(crate::Error::InvalidConfig(
                "at least one rule is required".to_string(),
            ));
        }

        for (index, rule) in self.rules.iter().enumerate() {
            rule.validate(index)?;
        }

        Ok(())
    }
}

impl RuleConfig {
    fn validate(&self, index: usize) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::Error::invalid_rule(
                format!("#{}", index + 1),
                "name is required",
            ));
        }
        if self.destination.trim().is_empty() {
            return Err(crate::Error::invalid_rule(&self.name, "destination is required"));
        }

        let criteria = &self.criteria;
        if !criteria.has_criteria() {
            return Err(crate::Error::invalid_rule(
                &self.name,
                "at least one match criterion is required",
            ));
        }

        if let Some(ref pattern) = criteria.pattern {
            glob::Pattern::new(pattern).map_err(|e| {
                crate::Error::invalid_rule(&self.name, format!("invalid pattern {:?}: {}", pattern, e))
            })?;
        }

        let sizes = [("min_size", &criteria.min_size), ("max_size", &criteria.max_size)];
        for (field, value) in sizes {
            if let Some(value) = value {
                units::parse_size(value).map_err(|e| {
                    crate::Error::invalid_rule(&self.name, format!("{}: {}", field, e))
                })?;
            }
        }

        let ages = [
            ("older_than", &criteria.older_than),
            ("newer_than", &criteria.newer_than),
        ];
        for (field, value) in ages {
            if let Some(value) = value {
                units::parse_duration(value).map_err(|e| {
                    crate::Error::invalid_rule(&self.name, format!("{}: {}", field, e))
                })?;
            }
        }

        Ok(())
    }
}

/// A sample configuration, written by `forg init`.
pub fn sample_config() -> &'static str {
    r#"# forg configuration file
#
# Rules are checked in order; the first rule whose criteria all match wins.
# conflict: skip | rename | overwrite

source = "~/Downloads"
conflict = "rename"

[[rules]]
name = "images"
destination = "~/Pictures/Sorted"
[rules.match]
extensions = [".jpg", ".jpeg", ".png", ".gif", ".webp"]

[[rules]]
name = "documents"
destination = "~/Documents/Sorted"
[rules.match]
extensions = [".pdf", ".doc", ".docx", ".txt"]

[[rules]]
name = "large-videos"
destination = "~/Videos/Large"
[rules.match]
extensions = [".mp4", ".mov", ".avi"]
min_size = "100MB"

[[rules]]
name = "old-archives"
destination = "~/Archives/Old"
[rules.match]
extensions = [".zip", ".tar.gz", ".rar"]
older_than = "30d"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_text(source: &Path, extra: &str) -> String {
        format!(
            "source = {:?}\n{}\n[[rules]]\nname = \"images\"\ndestination = \"/dest\"\n[rules.match]\nextensions = [\".jpg\"]\n",
            source.display().to_string(),
            extra
        )
    }

    #[test]
    fn test_parse_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::parse(&config_text(temp_dir.path(), "conflict = \"rename\"")).unwrap();

        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.rules[0].criteria.extensions, vec![".jpg"]);
        assert_eq!(config.conflict_strategy(), ConflictStrategy::Rename);
    }

    #[test]
    fn test_conflict_defaults_to_skip() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::parse(&config_text(temp_dir.path(), "")).unwrap();
        assert_eq!(config.conflict_strategy(), ConflictStrategy::Skip);
    }

    #[test]
    fn test_invalid_conflict_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::parse(&config_text(temp_dir.path(), "conflict = \"merge\""));
        assert!(matches!(result, Err(crate::Error::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_source_rejected() {
        let result = Config::parse("source = \"/nonexistent/forg/source\"\n");
        assert!(matches!(result, Err(crate::Error::PathNotFound(_))));

        let result = Config::parse("source = \"\"\n");
        assert!(matches!(result, Err(crate::Error::InvalidConfig(_))));
    }

    #[test]
    fn test_no_rules_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let text = format!("source = {:?}\n", temp_dir.path().display().to_string());
        assert!(matches!(Config::parse(&text), Err(crate::Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rule_without_criteria_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let text = format!(
            "source = {:?}\n[[rules]]\nname = \"empty\"\ndestination = \"/dest\"\n",
            temp_dir.path().display().to_string()
        );
        assert!(matches!(Config::parse(&text), Err(crate::Error::InvalidRule { .. })));
    }

    #[test]
    fn test_rule_with_bad_size_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let text = format!(
            "source = {:?}\n[[rules]]\nname = \"bad\"\ndestination = \"/dest\"\n[rules.match]\nmin_size = \"abc\"\n",
            temp_dir.path().display().to_string()
        );
        let err = Config::parse(&text).unwrap_err();
        assert!(err.to_string().contains("min_size"));
    }

    #[test]
    fn test_rule_with_bad_pattern_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let text = format!(
            "source = {:?}\n[[rules]]\nname = \"bad\"\ndestination = \"/dest\"\n[rules.match]\npattern = \"[abc\"\n",
            temp_dir.path().display().to_string()
        );
        assert!(matches!(Config::parse(&text), Err(crate::Error::InvalidRule { .. })));
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(ConflictStrategy::from("overwrite"), ConflictStrategy::Overwrite);
        assert_eq!(ConflictStrategy::from("RENAME"), ConflictStrategy::Rename);
        assert_eq!(ConflictStrategy::from(""), ConflictStrategy::Skip);
        assert_eq!(ConflictStrategy::from("bogus"), ConflictStrategy::Skip);
    }

    #[test]
    fn test_sample_config_parses() {
        let config: Config = toml::from_str(sample_config()).unwrap();
        assert_eq!(config.rules.len(), 4);
        assert_eq!(config.rules[2].criteria.min_size.as_deref(), Some("100MB"));
        assert!(config.rules.iter().all(|r| r.criteria.has_criteria()));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/.forg.toml"));
        assert!(matches!(result, Err(crate::Error::ConfigNotFound(_))));
    }
}
