//! Error types for frequency extraction

use thiserror::Error;

/// Errors raised while configuring or running the extraction pipeline
#[derive(Error, Debug)]
pub enum EwopError {
    /// Missing, unreadable or inconsistent configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// An exclusion pattern failed to compile
    #[error("invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as written in the configuration
        pattern: String,
        /// The underlying compile error
        #[source]
        source: regex::Error,
    },

    /// The dependency-parsing collaborator failed on a sentence
    #[error("dependency parser failed on \"{sentence}\": {reason}")]
    Parser {
        /// Leading part of the sentence that was being parsed
        sentence: String,
        /// What went wrong
        reason: String,
    },
}

impl EwopError {
    /// Build a parser error, keeping only a short prefix of the sentence
    pub fn parser(sentence: &str, reason: impl Into<String>) -> Self {
        const MAX_CHARS: usize = 40;

        let mut prefix: String = sentence.chars().take(MAX_CHARS).collect();
        if sentence.chars().count() > MAX_CHARS {
            prefix.push_str("...");
        }

        EwopError::Parser {
            sentence: prefix,
            reason: reason.into(),
        }
    }
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, EwopError>;
