//! Exclusion filter for noise tokens

use crate::config::{WordConfig, DEFAULT_MIN_LENGTH};
use crate::error::{EwopError, Result};
use regex::Regex;

/// Compiled set of exclusion rules
///
/// A token is noise when it is shorter than the minimum length or when any
/// pattern matches starting at its first character. Patterns are not
/// implicitly anchored at the end, so `"^de"` also drops `"desde"`.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    patterns: Vec<Regex>,
    min_length: usize,
}

impl ExclusionFilter {
    /// Compile patterns, failing on the first invalid one
    pub fn new<S: AsRef<str>>(patterns: &[S], min_length: usize) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let pattern = p.as_ref();
                Regex::new(pattern).map_err(|source| EwopError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            patterns,
            min_length,
        })
    }

    /// Build the filter from the `word` configuration section
    pub fn from_config(config: &WordConfig) -> Result<Self> {
        Self::new(&config.exclusions, config.min_length)
    }

    /// Whether the token should be discarded
    pub fn should_exclude(&self, token: &str) -> bool {
        // Zero-length tokens come from leading/trailing delimiters.
        if token.is_empty() || token.chars().count() < self.min_length {
            return true;
        }

        // Leftmost-first search returns a match at 0 whenever one exists.
        self.patterns
            .iter()
            .any(|re| re.find(token).is_some_and(|m| m.start() == 0))
    }

    /// Number of compiled patterns
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Minimum accepted token length
    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}
