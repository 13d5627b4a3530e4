//! Whitespace tokenizer and token normaliser.

/// Punctuation stripped from the leading and trailing edges of each word.
const EDGE_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '"', '\'', '(', ')', '[', ']', '{', '}',
];

/// A tokenizer that splits text on whitespace and canonicalises each word.
///
/// The tokenizer is pure and deterministic: the same input always yields the
/// same token sequence. There is no stemming and no stopword removal, and
/// case folding uses ASCII semantics only, so non-ASCII bytes pass through
/// unchanged.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    min_word_length: usize,
}

impl Tokenizer {
    /// Create a tokenizer that drops tokens shorter than `min_word_length`
    /// bytes.
    pub fn new(min_word_length: usize) -> Self {
        Tokenizer { min_word_length }
    }

    /// The configured minimum token length, in bytes.
    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    /// Split `text` into normalised tokens, in order of appearance.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter_map(|word| self.normalize(word))
            .collect()
    }

    /// Canonicalise a single word: strip edge punctuation, fold ASCII
    /// uppercase to lowercase, and drop the word entirely when the result
    /// falls below the minimum length.
    pub fn normalize(&self, word: &str) -> Option<String> {
        let stripped = word.trim_matches(EDGE_PUNCTUATION);
        if stripped.is_empty() || stripped.len() < self.min_word_length {
            return None;
        }
        Some(stripped.to_ascii_lowercase())
    }

    /// Canonicalise a query word like [`Tokenizer::normalize`] but without
    /// the length filter: a query shorter than the indexed minimum can
    /// still match indexed tokens as a substring.
    pub fn fold(&self, word: &str) -> String {
        word.trim_matches(EDGE_PUNCTUATION).to_ascii_lowercase()
    }
}
