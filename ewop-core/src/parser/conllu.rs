//! CoNLL-U decoding
//!
//! Only the columns needed to rebuild dependency triples are kept: ID, FORM,
//! HEAD and DEPREL. Multi-word token ranges (`3-4`) and empty nodes (`5.1`)
//! carry no basic dependency and are skipped.

use super::{Dependency, ROOT_TEXT};
use thiserror::Error;

const COLUMNS: usize = 10;
const COL_ID: usize = 0;
const COL_FORM: usize = 1;
const COL_HEAD: usize = 6;
const COL_DEPREL: usize = 7;

/// Malformed CoNLL-U input
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConlluError {
    /// Wrong number of tab-separated columns
    #[error("line {line}: expected 10 columns, found {found}")]
    ColumnCount {
        /// 1-based line number
        line: usize,
        /// Columns actually present
        found: usize,
    },

    /// ID or HEAD is not a number
    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidNumber {
        /// 1-based line number
        line: usize,
        /// Column name
        column: &'static str,
        /// Offending text
        value: String,
    },

    /// HEAD points at a word that does not exist in the sentence
    #[error("line {line}: head {head} is outside the sentence")]
    DanglingHead {
        /// 1-based line number
        line: usize,
        /// The head index
        head: usize,
    },
}

/// A syntactic word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConlluWord {
    /// 1-based position in the sentence
    pub id: usize,
    /// Surface form
    pub form: String,
    /// ID of the head word, 0 for the root
    pub head: usize,
    /// Universal dependency relation
    pub deprel: String,
}

/// Words of one sentence, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConlluSentence {
    /// Syntactic words
    pub words: Vec<ConlluWord>,
}

impl ConlluSentence {
    /// Resolve head indices into (governor, relation, dependent) triples
    pub fn dependencies(&self) -> Vec<Dependency> {
        self.words
            .iter()
            .map(|word| {
                let governor = match word.head {
                    0 => ROOT_TEXT,
                    head => self
                        .word(head)
                        .map(|w| w.form.as_str())
                        .unwrap_or(ROOT_TEXT),
                };
                Dependency::new(governor, word.deprel.as_str(), word.form.as_str())
            })
            .collect()
    }

    fn word(&self, id: usize) -> Option<&ConlluWord> {
        self.words.iter().find(|w| w.id == id)
    }
}

/// Decode a CoNLL-U document into sentences
pub fn parse(input: &str) -> Result<Vec<ConlluSentence>, ConlluError> {
    let mut sentences = Vec::new();
    let mut current = ConlluSentence::default();
    // Line of each word in `current`, for head validation errors
    let mut word_lines = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_end_matches('\r');

        if line.trim().is_empty() {
            finish_sentence(&mut sentences, &mut current, &mut word_lines)?;
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != COLUMNS {
            return Err(ConlluError::ColumnCount {
                line: line_no,
                found: fields.len(),
            });
        }

        let id = fields[COL_ID];
        if id.contains('-') || id.contains('.') {
            continue;
        }

        let word = ConlluWord {
            id: parse_number(id, "ID", line_no)?,
            form: fields[COL_FORM].to_string(),
            head: parse_number(fields[COL_HEAD], "HEAD", line_no)?,
            deprel: fields[COL_DEPREL].to_string(),
        };
        current.words.push(word);
        word_lines.push(line_no);
    }

    finish_sentence(&mut sentences, &mut current, &mut word_lines)?;
    Ok(sentences)
}

fn parse_number(value: &str, column: &'static str, line: usize) -> Result<usize, ConlluError> {
    value.parse().map_err(|_| ConlluError::InvalidNumber {
        line,
        column,
        value: value.to_string(),
    })
}

fn finish_sentence(
    sentences: &mut Vec<ConlluSentence>,
    current: &mut ConlluSentence,
    word_lines: &mut Vec<usize>,
) -> Result<(), ConlluError> {
    if current.words.is_empty() {
        return Ok(());
    }

    for (word, &line) in current.words.iter().zip(word_lines.iter()) {
        if word.head != 0 && current.word(word.head).is_none() {
            return Err(ConlluError::DanglingHead {
                line,
                head: word.head,
            });
        }
    }

    sentences.push(std::mem::take(current));
    word_lines.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# sent_id = 1\n\
# text = la casa blanca\n\
1\tla\tel\tDET\t_\t_\t2\tdet\t_\t_\n\
2\tcasa\tcasa\tNOUN\t_\t_\t0\troot\t_\t_\n\
3\tblanca\tblanco\tADJ\t_\t_\t2\tamod\t_\t_\n";

    #[test]
    fn test_parse_words() {
        let doc = "1\tgato\tgato\tNOUN\t_\t_\t0\troot\t_\t_\n\
2\tnegro\tnegro\tADJ\t_\t_\t1\tamod\t_\t_\n";
        let sentences = parse(doc).unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].words.len(), 2);
        assert_eq!(sentences[0].words[1].form, "negro");
        assert_eq!(sentences[0].words[1].head, 1);
        assert_eq!(sentences[0].words[1].deprel, "amod");
    }

    #[test]
    fn test_dependencies_resolve_head_text() {
        let sentences = parse(SAMPLE).unwrap();
        let deps = sentences[0].dependencies();

        assert_eq!(
            deps,
            vec![
                Dependency::new("casa", "det", "la"),
                Dependency::new(ROOT_TEXT, "root", "casa"),
                Dependency::new("casa", "amod", "blanca"),
            ]
        );
    }

    #[test]
    fn test_multiword_ranges_and_empty_nodes_skipped() {
        let doc = "1-2\tdel\t_\t_\t_\t_\t_\t_\t_\t_\n\
1\tde\tde\tADP\t_\t_\t2\tcase\t_\t_\n\
2\tel\tel\tDET\t_\t_\t0\troot\t_\t_\n\
2.1\tvacío\t_\t_\t_\t_\t_\t_\t_\t_\n";
        let sentences = parse(doc).unwrap();
        assert_eq!(sentences[0].words.len(), 2);
    }

    #[test]
    fn test_multiple_sentences() {
        let doc = "1\tuno\t_\t_\t_\t_\t0\troot\t_\t_\n\n\n\
1\tdos\t_\t_\t_\t_\t0\troot\t_\t_\n";
        assert_eq!(parse(doc).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("# only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_column_count_error() {
        let err = parse("1\tsolo\t_\n").unwrap_err();
        assert_eq!(err, ConlluError::ColumnCount { line: 1, found: 3 });
    }

    #[test]
    fn test_invalid_head_error() {
        let err = parse("1\tx\t_\t_\t_\t_\t?\troot\t_\t_\n").unwrap_err();
        assert!(matches!(
            err,
            ConlluError::InvalidNumber { column: "HEAD", .. }
        ));
    }

    #[test]
    fn test_dangling_head_error() {
        let err = parse("1\tx\t_\t_\t_\t_\t7\tamod\t_\t_\n").unwrap_err();
        assert_eq!(err, ConlluError::DanglingHead { line: 1, head: 7 });
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = "1\tsol\t_\t_\t_\t_\t0\troot\t_\t_\r\n";
        let sentences = parse(doc).unwrap();
        assert_eq!(sentences[0].words[0].deprel, "root");
    }
}
