//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file missing, unparsable or holding an invalid pattern
    ConfigError(String),
    /// Input workbook could not be read
    InputRead(String),
    /// Processing failed, e.g. the dependency parser crashed
    ProcessingError(String),
    /// Results could not be written
    OutputWrite(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::InputRead(msg) => write!(f, "Cannot read input: {msg}"),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
            CliError::OutputWrite(msg) => write!(f, "Cannot write output: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
