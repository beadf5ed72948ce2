//! Per-row processing

use crate::error::Result;
use crate::filter::ExclusionFilter;
use crate::frequency::{FrequencyAggregator, FrequencyMap};
use crate::parser::{adjectival_pairs, DependencyParser};
use crate::tokenizer::Tokenizer;

/// One input record
///
/// Only the first column carries the analysed text; further columns are
/// kept so callers can inspect them, but processing ignores them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    columns: Vec<Option<String>>,
}

impl Row {
    /// Create a row from its cells; `None` marks an empty cell
    pub fn new(columns: Vec<Option<String>>) -> Self {
        Self { columns }
    }

    /// Single-column row
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            columns: vec![Some(text.into())],
        }
    }

    /// Row whose text cell is empty
    pub fn blank() -> Self {
        Self {
            columns: vec![None],
        }
    }

    /// The free-text field, if present
    pub fn text(&self) -> Option<&str> {
        self.columns.first().and_then(|cell| cell.as_deref())
    }

    /// Cell at `index`, if present and non-empty
    pub fn column(&self, index: usize) -> Option<&str> {
        self.columns.get(index).and_then(|cell| cell.as_deref())
    }
}

/// Phrase counting collaborator and the relation it harvests
#[derive(Clone, Copy)]
struct PhraseStage<'a> {
    parser: &'a dyn DependencyParser,
    relation: &'a str,
}

/// Feeds rows into the word and phrase aggregators
///
/// Each enabled stage owns its own aggregator; the two never share state.
pub struct RowProcessor<'a> {
    filter: &'a ExclusionFilter,
    tokenizer: Tokenizer,
    phrase_stage: Option<PhraseStage<'a>>,
    words: Option<FrequencyAggregator>,
    phrases: Option<FrequencyAggregator>,
}

/// Final counts of a processing pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowCounts {
    /// Word counts, when word counting was enabled
    pub words: Option<FrequencyMap>,
    /// Phrase counts, when phrase counting was enabled
    pub phrases: Option<FrequencyMap>,
    /// Rows seen
    pub rows: usize,
}

impl<'a> RowProcessor<'a> {
    /// Create a processor; word counting runs only when `count_words` is set
    pub fn new(filter: &'a ExclusionFilter, count_words: bool) -> Self {
        Self {
            filter,
            tokenizer: Tokenizer::new(),
            phrase_stage: None,
            words: count_words.then(FrequencyAggregator::new),
            phrases: None,
        }
    }

    /// Enable phrase counting through `parser`
    pub fn with_phrases(mut self, parser: &'a dyn DependencyParser, relation: &'a str) -> Self {
        self.phrase_stage = Some(PhraseStage { parser, relation });
        self.phrases = Some(FrequencyAggregator::new());
        self
    }

    /// Whether word counting is enabled
    pub fn counts_words(&self) -> bool {
        self.words.is_some()
    }

    /// Whether phrase counting is enabled
    pub fn counts_phrases(&self) -> bool {
        self.phrases.is_some()
    }

    /// Process one record
    pub fn process(&mut self, row: &Row) -> Result<()> {
        self.process_text(row.text().unwrap_or_default())
    }

    /// Process one free-text value
    pub fn process_text(&mut self, text: &str) -> Result<()> {
        let sentence = text.to_lowercase();

        if let Some(words) = self.words.as_mut() {
            let tokens = self.tokenizer.tokenize(&sentence);
            log::debug!("{tokens:?}");

            for token in tokens {
                if !self.filter.should_exclude(token) {
                    words.record(token);
                }
            }
        }

        if let (Some(stage), Some(phrases)) = (self.phrase_stage, self.phrases.as_mut()) {
            if sentence.trim().is_empty() {
                return Ok(());
            }

            let dependencies = stage.parser.parse(&sentence)?;
            for phrase in adjectival_pairs(&dependencies, stage.relation) {
                phrases.record(&phrase);
            }
        }

        Ok(())
    }

    /// Current word counts
    pub fn words(&self) -> Option<&FrequencyMap> {
        self.words.as_ref().map(FrequencyAggregator::snapshot)
    }

    /// Current phrase counts
    pub fn phrases(&self) -> Option<&FrequencyMap> {
        self.phrases.as_ref().map(FrequencyAggregator::snapshot)
    }

    /// Absorb the counts of a processor configured the same way
    pub fn merge(&mut self, other: RowProcessor<'a>) {
        if let (Some(mine), Some(theirs)) = (self.words.as_mut(), other.words) {
            mine.merge(theirs);
        }
        if let (Some(mine), Some(theirs)) = (self.phrases.as_mut(), other.phrases) {
            mine.merge(theirs);
        }
    }

    /// Finish the pass and hand over the counts
    pub fn finish(self, rows: usize) -> RowCounts {
        RowCounts {
            words: self.words.map(FrequencyAggregator::into_map),
            phrases: self.phrases.map(FrequencyAggregator::into_map),
            rows,
        }
    }
}
