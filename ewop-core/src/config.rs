//! Configuration record
//!
//! Loaded once at startup from a YAML (or TOML) file and never mutated
//! afterwards. Only the options below are recognised; unknown keys are
//! rejected so typos do not silently disable a processor.
//!
//! ```yaml
//! word:
//!   exclusions:
//!     - "^the$"
//!     - "^\\d+"
//! processors:
//!   basic: true
//!   stanza: false
//! ```

use crate::error::{EwopError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default minimum token length in characters
pub const DEFAULT_MIN_LENGTH: usize = 2;

/// Default dependency relation harvested for phrases
pub const DEFAULT_RELATION: &str = "amod";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Word filtering options
    pub word: WordConfig,

    /// Which aggregation pipelines run
    pub processors: ProcessorsConfig,

    /// External dependency parser
    #[serde(default)]
    pub parser: ParserConfig,

    /// Spreadsheet layout
    #[serde(default)]
    pub input: InputConfig,
}

/// Word filtering options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WordConfig {
    /// Regular expressions matched at the start of each token
    pub exclusions: Vec<String>,

    /// Tokens shorter than this (in characters) are discarded
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

/// Pipeline switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorsConfig {
    /// Count single words
    pub basic: bool,

    /// Count adjective-noun phrases through the dependency parser
    pub stanza: bool,
}

/// External dependency parser settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    /// Program and arguments; reads a sentence on stdin, prints CoNLL-U
    #[serde(default)]
    pub command: Vec<String>,

    /// Dependency relation whose (governor, dependent) pairs are counted
    #[serde(default = "default_relation")]
    pub relation: String,
}

/// Spreadsheet layout
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Rows skipped before the header row
    #[serde(default = "default_skip_rows")]
    pub skip_rows: usize,

    /// Whether the first row after the skipped ones holds column names
    #[serde(default = "default_header")]
    pub header: bool,

    /// Sheet to read; the first sheet when absent
    #[serde(default)]
    pub sheet: Option<String>,
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_relation() -> String {
    DEFAULT_RELATION.to_string()
}

fn default_skip_rows() -> usize {
    1
}

fn default_header() -> bool {
    true
}

impl Default for WordConfig {
    fn default() -> Self {
        Self {
            exclusions: Vec::new(),
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

impl Default for ProcessorsConfig {
    fn default() -> Self {
        Self {
            basic: true,
            stanza: false,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            relation: default_relation(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            skip_rows: default_skip_rows(),
            header: default_header(),
            sheet: None,
        }
    }
}

impl Config {
    /// Load configuration from a file, choosing the format by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EwopError::Config(format!("cannot read {}: {e}", path.display()))
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let config = if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
        .map_err(|e| match e {
            EwopError::Config(msg) => EwopError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate YAML configuration
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| EwopError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| EwopError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if self.processors.stanza && self.parser.command.is_empty() {
            return Err(EwopError::Config(
                "processors.stanza is enabled but parser.command is empty".to_string(),
            ));
        }

        if self.parser.relation.trim().is_empty() {
            return Err(EwopError::Config(
                "parser.relation must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
