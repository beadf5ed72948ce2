//! Ranked output tables

use crate::frequency::FrequencyMap;
use serde::Serialize;
use std::fmt;

/// One row of a ranked table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// Word or phrase
    pub key: String,
    /// Number of occurrences
    pub count: u64,
}

/// Entries ordered by descending count, ties by ascending key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedTable {
    entries: Vec<RankedEntry>,
}

impl RankedTable {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows in rank order
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// Iterate (key, count) in rank order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|e| (e.key.as_str(), e.count))
    }
}

impl fmt::Display for RankedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': {}", entry.key, entry.count)?;
        }
        write!(f, "}}")
    }
}

/// Hook notified with every table right after ranking
pub trait RankObserver {
    /// Called once per ranked table
    fn on_ranked(&self, label: &str, table: &RankedTable);
}

/// Observer that ignores every table
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RankObserver for NoopObserver {
    fn on_ranked(&self, _label: &str, _table: &RankedTable) {}
}

/// Observer that dumps the sorted table at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl RankObserver for LogObserver {
    fn on_ranked(&self, label: &str, table: &RankedTable) {
        log::debug!("{label}: {table}");
    }
}

/// Sort a frequency map into a ranked table
pub fn rank(map: &FrequencyMap) -> RankedTable {
    let mut entries: Vec<RankedEntry> = map
        .iter()
        .map(|(key, &count)| RankedEntry {
            key: key.clone(),
            count,
        })
        .collect();

    entries.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));

    RankedTable { entries }
}

/// Rank and notify an observer
pub fn rank_observed(label: &str, map: &FrequencyMap, observer: &dyn RankObserver) -> RankedTable {
    let table = rank(map);
    observer.on_ranked(label, &table);
    table
}
