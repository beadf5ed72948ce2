//! Word and phrase frequency extraction
//!
//! Free-text records are lowercased, split into word candidates, filtered
//! against configurable exclusion patterns and counted. Optionally, the same
//! text is handed to a dependency parser and every adjectival-modifier
//! relation is counted as a `"<noun> <adjective>"` phrase. Each enabled
//! count is finally ranked by descending frequency.
//!
//! # Example
//!
//! ```rust
//! use ewop_core::{Config, Pipeline, Row, WORD_COUNT_LABEL};
//!
//! let config = Config::from_yaml_str(
//!     "word:\n  exclusions: ['^the$']\nprocessors:\n  basic: true\n  stanza: false\n",
//! )
//! .unwrap();
//!
//! let pipeline = Pipeline::new(&config).unwrap();
//! let rows = vec![Row::from_text("The fox"), Row::from_text("the FOX and the hen")];
//! let tables = pipeline.run(&rows).unwrap();
//!
//! assert_eq!(tables[0].label, WORD_COUNT_LABEL);
//! assert_eq!(tables[0].table.iter().next(), Some(("fox", 2)));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod filter;
pub mod frequency;
pub mod parser;
pub mod pipeline;
pub mod processor;
pub mod rank;
pub mod tokenizer;

// Re-export key types
pub use config::Config;
pub use error::{EwopError, Result};
pub use filter::ExclusionFilter;
pub use frequency::{FrequencyAggregator, FrequencyMap};
pub use parser::{CommandParser, Dependency, DependencyParser};
pub use pipeline::{
    LabeledTable, Pipeline, PipelineOutput, PipelineReport, RunOptions, PHRASE_COUNT_LABEL,
    WORD_COUNT_LABEL,
};
pub use processor::{Row, RowProcessor};
pub use rank::{rank, LogObserver, NoopObserver, RankObserver, RankedEntry, RankedTable};
pub use tokenizer::Tokenizer;
