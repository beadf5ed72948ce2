//! ewop CLI library
//!
//! Reads free-text answers from a workbook, counts words and adjective-noun
//! phrases with `ewop-core`, and writes the ranked tables back out.

pub mod cli;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use cli::Cli;
pub use error::{CliError, CliResult};
