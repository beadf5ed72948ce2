//! Word tokenizer

use regex::Regex;
use std::sync::OnceLock;

static NON_WORD: OnceLock<Regex> = OnceLock::new();

fn non_word() -> &'static Regex {
    // Word characters are letters, numbers and underscore. Combining marks
    // and connector punctuation other than `_` are delimiters.
    NON_WORD.get_or_init(|| Regex::new(r"[^\p{L}\p{N}_]+").expect("static pattern is valid"))
}

/// Splits already-lowercased text on runs of non-word characters
///
/// Leading, trailing and adjacent delimiters yield empty tokens, exactly as
/// a plain regex split does; the exclusion filter's length rule removes
/// them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a tokenizer
    pub fn new() -> Self {
        Self
    }

    /// Borrowing iterator over raw word candidates
    pub fn split<'t>(&self, sentence: &'t str) -> impl Iterator<Item = &'t str> + 't {
        non_word().split(sentence)
    }

    /// Collect raw word candidates
    pub fn tokenize<'t>(&self, sentence: &'t str) -> Vec<&'t str> {
        self.split(sentence).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_runs() {
        let tokens = Tokenizer::new().tokenize("the quick, quick-fox!! fox");
        assert_eq!(tokens, vec!["the", "quick", "quick", "fox", "fox"]);
    }

    #[test]
    fn test_leading_and_trailing_delimiters_yield_empty_tokens() {
        let tokens = Tokenizer::new().tokenize("¡hola, mundo!");
        assert_eq!(tokens, vec!["", "hola", "mundo", ""]);
    }

    #[test]
    fn test_unicode_letters_are_word_characters() {
        let tokens = Tokenizer::new().tokenize("canción año_2024 niño");
        assert_eq!(tokens, vec!["canción", "año_2024", "niño"]);
    }

    #[test]
    fn test_marks_and_connectors_split_numbers_do_not() {
        let tokens = Tokenizer::new().tokenize("cafe\u{301} x\u{2040}y n\u{b2}");
        assert_eq!(tokens, vec!["cafe", "x", "y", "n\u{b2}"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Tokenizer::new().tokenize(""), vec![""]);
    }

    #[test]
    fn test_no_case_normalization() {
        assert_eq!(Tokenizer::new().tokenize("Quick FOX"), vec!["Quick", "FOX"]);
    }
}
