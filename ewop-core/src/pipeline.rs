//! Pipeline driver
//!
//! Runs every row through a [`RowProcessor`], then ranks each enabled
//! frequency map into a labelled table. Word counts always come first.

use crate::config::{Config, ProcessorsConfig};
use crate::error::Result;
use crate::filter::ExclusionFilter;
use crate::parser::{CommandParser, DependencyParser};
use crate::processor::{Row, RowCounts, RowProcessor};
use crate::rank::{rank_observed, NoopObserver, RankObserver, RankedTable};

/// Label of the single-word table
pub const WORD_COUNT_LABEL: &str = "WordCount";

/// Label of the adjective-noun phrase table
///
/// Kept from the first phrase backend so existing result workbooks keep
/// their sheet names.
pub const PHRASE_COUNT_LABEL: &str = "StanfordNLP";

/// A ranked table and the name it is published under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledTable {
    /// Sheet / section name
    pub label: &'static str,
    /// Ranked rows
    pub table: RankedTable,
}

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Rows read from the input
    pub rows: usize,
    /// Distinct words counted, when enabled
    pub distinct_words: Option<usize>,
    /// Distinct phrases counted, when enabled
    pub distinct_phrases: Option<usize>,
}

/// Tables and report produced by a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Labelled tables, word counts first
    pub tables: Vec<LabeledTable>,
    /// Run summary
    pub report: PipelineReport,
}

/// Per-run knobs
pub struct RunOptions<'o> {
    /// Partition rows across worker threads
    pub parallel: bool,
    /// Notified with each ranked table
    pub observer: &'o dyn RankObserver,
    /// Called once per processed row
    pub progress: Option<&'o (dyn Fn() + Sync)>,
}

impl Default for RunOptions<'_> {
    fn default() -> Self {
        Self {
            parallel: false,
            observer: &NoopObserver,
            progress: None,
        }
    }
}

/// Owns the compiled filter and the optional dependency parser
pub struct Pipeline {
    filter: ExclusionFilter,
    processors: ProcessorsConfig,
    parser: Option<Box<dyn DependencyParser>>,
    relation: String,
}

impl Pipeline {
    /// Build from configuration, spawning the configured parser command for phrases
    pub fn new(config: &Config) -> Result<Self> {
        let parser: Option<Box<dyn DependencyParser>> = if config.processors.stanza {
            Some(Box::new(CommandParser::from_config(&config.parser)?))
        } else {
            None
        };

        Self::build(config, parser)
    }

    /// Build from configuration with an injected dependency parser
    ///
    /// The parser is only used when `processors.stanza` is enabled.
    pub fn with_parser(config: &Config, parser: Box<dyn DependencyParser>) -> Result<Self> {
        let parser = config.processors.stanza.then_some(parser);
        Self::build(config, parser)
    }

    fn build(config: &Config, parser: Option<Box<dyn DependencyParser>>) -> Result<Self> {
        let filter = ExclusionFilter::from_config(&config.word)?;
        log::debug!(
            "Compiled {} exclusion patterns (min length {})",
            filter.pattern_count(),
            filter.min_length()
        );

        Ok(Self {
            filter,
            processors: config.processors,
            parser,
            relation: config.parser.relation.clone(),
        })
    }

    /// Which pipelines are enabled
    pub fn processors(&self) -> ProcessorsConfig {
        self.processors
    }

    fn row_processor(&self) -> RowProcessor<'_> {
        let processor = RowProcessor::new(&self.filter, self.processors.basic);
        match (self.processors.stanza, self.parser.as_deref()) {
            (true, Some(parser)) => processor.with_phrases(parser, &self.relation),
            _ => processor,
        }
    }

    /// Run sequentially with no observer and return the labelled tables
    pub fn run(&self, rows: &[Row]) -> Result<Vec<LabeledTable>> {
        Ok(self.run_with(rows, &RunOptions::default())?.tables)
    }

    /// Run with explicit options
    pub fn run_with(&self, rows: &[Row], options: &RunOptions<'_>) -> Result<PipelineOutput> {
        let counts = if options.parallel {
            self.count_parallel(rows, options.progress)?
        } else {
            self.count_sequential(rows, options.progress)?
        };

        Ok(self.finish(counts, options.observer))
    }

    fn count_sequential(
        &self,
        rows: &[Row],
        progress: Option<&(dyn Fn() + Sync)>,
    ) -> Result<RowCounts> {
        let mut processor = self.row_processor();
        for row in rows {
            processor.process(row)?;
            if let Some(tick) = progress {
                tick();
            }
        }
        Ok(processor.finish(rows.len()))
    }

    #[cfg(feature = "parallel")]
    fn count_parallel(
        &self,
        rows: &[Row],
        progress: Option<&(dyn Fn() + Sync)>,
    ) -> Result<RowCounts> {
        use rayon::prelude::*;

        let processor = rows
            .par_iter()
            .try_fold(
                || self.row_processor(),
                |mut processor, row| {
                    processor.process(row)?;
                    if let Some(tick) = progress {
                        tick();
                    }
                    Ok::<_, crate::error::EwopError>(processor)
                },
            )
            .try_reduce(
                || self.row_processor(),
                |mut left, right| {
                    left.merge(right);
                    Ok(left)
                },
            )?;

        Ok(processor.finish(rows.len()))
    }

    #[cfg(not(feature = "parallel"))]
    fn count_parallel(
        &self,
        rows: &[Row],
        progress: Option<&(dyn Fn() + Sync)>,
    ) -> Result<RowCounts> {
        log::warn!("Built without the `parallel` feature; processing rows sequentially");
        self.count_sequential(rows, progress)
    }

    fn finish(&self, counts: RowCounts, observer: &dyn RankObserver) -> PipelineOutput {
        let mut tables = Vec::new();
        let mut report = PipelineReport {
            rows: counts.rows,
            ..PipelineReport::default()
        };

        if let Some(words) = counts.words {
            log::info!("=== Basic processing ===");
            log::debug!("Word occurrences: {}", words.total());
            let table = rank_observed(WORD_COUNT_LABEL, &words, observer);
            log::info!("Words count: {}", table.len());
            report.distinct_words = Some(table.len());
            tables.push(LabeledTable {
                label: WORD_COUNT_LABEL,
                table,
            });
        }

        if let Some(phrases) = counts.phrases {
            log::info!("=== Stanza processing ===");
            log::debug!("Phrase occurrences: {}", phrases.total());
            let table = rank_observed(PHRASE_COUNT_LABEL, &phrases, observer);
            log::info!("Phrases count: {}", table.len());
            report.distinct_phrases = Some(table.len());
            tables.push(LabeledTable {
                label: PHRASE_COUNT_LABEL,
                table,
            });
        }

        if tables.is_empty() {
            log::warn!("No processors enabled; nothing to report");
        }

        PipelineOutput { tables, report }
    }
}
