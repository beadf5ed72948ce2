//! JSON output writer

use super::TableWriter;
use anyhow::Result;
use ewop_core::RankedTable;
use serde::ser::{Serialize, Serializer};
use std::io::Write;

/// JSON writer - outputs `{label: [{"key", "count"}, ...]}` in table order
pub struct JsonWriter<W: Write> {
    writer: W,
    tables: Vec<(String, RankedTable)>,
}

/// Serializes tables as a map without reordering keys
struct OrderedTables<'a>(&'a [(String, RankedTable)]);

impl Serialize for OrderedTables<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(label, table)| (label, table)))
    }
}

impl<W: Write> JsonWriter<W> {
    /// Create a new JSON writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            tables: Vec::new(),
        }
    }

    /// Consume the writer, returning the underlying sink
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TableWriter for JsonWriter<W> {
    fn write_table(&mut self, label: &str, table: &RankedTable) -> Result<()> {
        self.tables.push((label.to_string(), table.clone()));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &OrderedTables(&self.tables))?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ewop_core::{rank, FrequencyMap};

    #[test]
    fn test_tables_keep_order() {
        let words: FrequencyMap = [("fox", 2), ("hen", 5)].into_iter().collect();
        let phrases: FrequencyMap = [("casa blanca", 1)].into_iter().collect();

        let mut writer = JsonWriter::new(Vec::new());
        writer.write_table("WordCount", &rank(&words)).unwrap();
        writer.write_table("StanfordNLP", &rank(&phrases)).unwrap();
        writer.finish().unwrap();

        let text = String::from_utf8(writer.into_inner()).unwrap();
        let word_pos = text.find("WordCount").unwrap();
        let phrase_pos = text.find("StanfordNLP").unwrap();
        assert!(word_pos < phrase_pos);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["WordCount"][0]["key"], "hen");
        assert_eq!(value["WordCount"][0]["count"], 5);
        assert_eq!(value["WordCount"][1]["key"], "fox");
        assert_eq!(value["StanfordNLP"][0]["key"], "casa blanca");
    }

    #[test]
    fn test_no_tables_is_empty_object() {
        let mut writer = JsonWriter::new(Vec::new());
        writer.finish().unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text.trim(), "{}");
    }
}
