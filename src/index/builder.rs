//! Batch index construction for bulk initialisation.

use ahash::AHashMap;

use crate::error::{Result, ShrikeError};
use crate::index::inverted::InvertedIndex;
use crate::index::posting::Posting;

/// Accumulates a whole batch of token → key mappings before the index
/// exists, so cap checks and posting shapes are decided once per batch
/// instead of through repeated single→multi promotions.
///
/// The accounting mirrors [`InvertedIndex`] exactly: duplicates are dropped
/// on entry, and the caps are checked against precisely what the built
/// index will retain.
#[derive(Debug)]
pub struct IndexBuilder {
    entries: AHashMap<String, Vec<String>>,
    /// Tokens in first-seen order.
    order: Vec<String>,
    total_bytes: usize,
    max_words: Option<usize>,
    max_bytes: Option<usize>,
}

impl IndexBuilder {
    /// Create a builder enforcing the given caps (`None` disables one).
    pub fn new(max_words: Option<usize>, max_bytes: Option<usize>) -> Self {
        IndexBuilder {
            entries: AHashMap::new(),
            order: Vec::new(),
            total_bytes: 0,
            max_words,
            max_bytes,
        }
    }

    /// Record that the record at `key` contains `token`. Duplicate keys per
    /// token are dropped; cap rejections leave the builder unchanged.
    pub fn insert(&mut self, token: &str, key: &str) -> Result<()> {
        match self.entries.get_mut(token) {
            Some(keys) => {
                if keys.iter().any(|k| k == key) {
                    return Ok(());
                }
                Self::check_bytes(self.max_bytes, self.total_bytes, key.len(), token)?;
                keys.push(key.to_string());
                self.total_bytes += key.len();
            }
            None => {
                if let Some(max) = self.max_words {
                    if self.order.len() >= max {
                        return Err(ShrikeError::cap_exceeded(format!(
                            "word cap of {max} reached while indexing '{token}'"
                        )));
                    }
                }
                let delta = token.len() + key.len();
                Self::check_bytes(self.max_bytes, self.total_bytes, delta, token)?;
                self.entries.insert(token.to_string(), vec![key.to_string()]);
                self.order.push(token.to_string());
                self.total_bytes += delta;
            }
        }
        Ok(())
    }

    /// Number of distinct tokens accumulated so far.
    pub fn word_count(&self) -> usize {
        self.order.len()
    }

    /// Collapse singleton key lists to bare keys and produce the index in
    /// one pass.
    pub fn build(self) -> InvertedIndex {
        let mut words = AHashMap::with_capacity(self.entries.len());
        for (token, mut keys) in self.entries {
            let posting = if keys.len() == 1 {
                Posting::Single(keys.remove(0))
            } else {
                Posting::Multi(keys)
            };
            words.insert(token, posting);
        }
        InvertedIndex::from_parts(
            words,
            self.order,
            self.total_bytes,
            self.max_words,
            self.max_bytes,
        )
    }

    fn check_bytes(
        max_bytes: Option<usize>,
        total_bytes: usize,
        delta: usize,
        token: &str,
    ) -> Result<()> {
        if let Some(max) = max_bytes {
            if total_bytes + delta > max {
                return Err(ShrikeError::cap_exceeded(format!(
                    "byte cap of {max} reached while indexing '{token}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShrikeError;

    #[test]
    fn test_build_collapses_singletons() {
        let mut builder = IndexBuilder::new(None, None);
        builder.insert("red", "r1").unwrap();
        builder.insert("red", "r2").unwrap();
        builder.insert("car", "r1").unwrap();

        let index = builder.build();
        assert_eq!(
            index.lookup("red"),
            Some(&Posting::Multi(vec!["r1".to_string(), "r2".to_string()]))
        );
        assert_eq!(index.lookup("car"), Some(&Posting::single("r1")));
        assert_eq!(index.bytes(), index.recompute_bytes());
    }

    #[test]
    fn test_duplicate_keys_dropped() {
        let mut builder = IndexBuilder::new(None, None);
        builder.insert("red", "r1").unwrap();
        builder.insert("red", "r1").unwrap();

        let index = builder.build();
        assert_eq!(index.lookup("red"), Some(&Posting::single("r1")));
    }

    #[test]
    fn test_token_order_is_first_seen() {
        let mut builder = IndexBuilder::new(None, None);
        builder.insert("tristan", "u1").unwrap();
        builder.insert("tris", "u2").unwrap();
        builder.insert("tristan", "u3").unwrap();

        let index = builder.build();
        let tokens: Vec<&str> = index.tokens().collect();
        assert_eq!(tokens, vec!["tristan", "tris"]);
    }

    #[test]
    fn test_word_cap() {
        let mut builder = IndexBuilder::new(Some(1), None);
        builder.insert("red", "r1").unwrap();
        builder.insert("red", "r2").unwrap();

        let err = builder.insert("car", "r1").unwrap_err();
        assert!(matches!(err, ShrikeError::CapExceeded(_)));
    }

    #[test]
    fn test_byte_cap() {
        // "red" + "r1" costs 5 bytes.
        let mut builder = IndexBuilder::new(None, Some(5));
        builder.insert("red", "r1").unwrap();

        let err = builder.insert("red", "r2").unwrap_err();
        assert!(matches!(err, ShrikeError::CapExceeded(_)));

        let index = builder.build();
        assert_eq!(index.bytes(), 5);
        assert_eq!(index.bytes(), index.recompute_bytes());
    }
}
