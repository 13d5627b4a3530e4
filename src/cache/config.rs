//! Full-text initialisation parameters.

use std::collections::HashSet;

use crate::error::{Result, ShrikeError};

/// Configuration for initialising the full-text index.
///
/// The schema names the fields eligible for indexing; everything else is
/// stored but never indexed. `max_words` bounds the number of distinct
/// tokens and `max_bytes` the retained byte cost of tokens plus posting
/// entries; `None` disables a cap. All settings are fixed for the lifetime
/// of the index.
///
/// # Examples
///
/// ```
/// use shrike::cache::FtConfig;
///
/// let config = FtConfig::new(["title", "body"])
///     .with_max_words(10_000)
///     .with_min_word_length(2);
///
/// assert_eq!(config.max_words(), Some(10_000));
/// assert_eq!(config.max_bytes(), None);
/// ```
#[derive(Debug, Clone)]
pub struct FtConfig {
    schema: HashSet<String>,
    max_words: Option<usize>,
    max_bytes: Option<usize>,
    min_word_length: usize,
}

impl FtConfig {
    /// Create a configuration indexing the given fields, with no caps and a
    /// minimum word length of 1.
    pub fn new<I, S>(schema: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FtConfig {
            schema: schema.into_iter().map(Into::into).collect(),
            max_words: None,
            max_bytes: None,
            min_word_length: 1,
        }
    }

    /// Cap the number of distinct indexed words.
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = Some(max_words);
        self
    }

    /// Cap the retained byte cost of the index.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    /// Drop words shorter than `min_word_length` bytes at index time.
    pub fn with_min_word_length(mut self, min_word_length: usize) -> Self {
        self.min_word_length = min_word_length;
        self
    }

    /// The indexable field names.
    pub fn schema(&self) -> &HashSet<String> {
        &self.schema
    }

    /// The distinct-word cap, when set.
    pub fn max_words(&self) -> Option<usize> {
        self.max_words
    }

    /// The byte-cost cap, when set.
    pub fn max_bytes(&self) -> Option<usize> {
        self.max_bytes
    }

    /// The minimum indexed word length, in bytes.
    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.min_word_length == 0 {
            return Err(ShrikeError::invalid_input(
                "minimum word length must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FtConfig::new(["name"]);

        assert!(config.schema().contains("name"));
        assert_eq!(config.max_words(), None);
        assert_eq!(config.max_bytes(), None);
        assert_eq!(config.min_word_length(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_min_word_length_is_invalid() {
        let config = FtConfig::new(["name"]).with_min_word_length(0);
        assert!(config.validate().is_err());
    }
}
