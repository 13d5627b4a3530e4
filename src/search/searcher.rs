//! The four search operations.
//!
//! Everything here runs under the shared lock held by the public wrappers
//! in [`crate::cache::cache`] and therefore observes a consistent store and
//! index pair. Results are snapshots owned by the caller.

use std::collections::HashSet;

use ahash::AHashSet;

use crate::cache::inner::{CacheInner, FullText};
use crate::document::{extractor, Record};
use crate::error::{Result, ShrikeError};

/// A single search result: the record key and a snapshot of the record.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// The record's key.
    pub key: String,
    /// Snapshot copy of the record.
    pub record: Record,
}

impl CacheInner {
    /// Strict or non-strict search over the whole query string; see
    /// [`crate::cache::Cache::search`].
    pub(crate) fn search(&self, query: &str, limit: usize, strict: bool) -> Result<Vec<SearchHit>> {
        let ft = self.full_text()?;
        let query = query.trim();
        if query.is_empty() {
            return Err(ShrikeError::invalid_input("query must not be empty"));
        }
        if strict {
            return Ok(self.strict_lookup(ft, query, limit));
        }

        let words: Vec<&str> = query.split_whitespace().collect();
        if words.len() == 1 {
            return Ok(self.scan_one_word(ft, words[0], limit));
        }

        // Gather candidates per word; a record qualifies when every word
        // matched it. Order follows the first word's discovery order.
        let mut first_order: Vec<String> = Vec::new();
        let mut other_sets: Vec<AHashSet<String>> = Vec::with_capacity(words.len() - 1);
        for (i, word) in words.iter().enumerate() {
            let keys = self.gather_keys(ft, word, limit);
            if keys.is_empty() {
                return Ok(Vec::new());
            }
            if i == 0 {
                first_order = keys;
            } else {
                other_sets.push(keys.into_iter().collect());
            }
        }

        let mut hits = Vec::new();
        for key in first_order {
            if limit > 0 && hits.len() >= limit {
                break;
            }
            if other_sets.iter().all(|set| set.contains(&key)) {
                if let Some(record) = self.records.get(&key) {
                    hits.push(SearchHit {
                        record: record.clone(),
                        key,
                    });
                }
            }
        }
        Ok(hits)
    }

    /// Single-word search; see [`crate::cache::Cache::search_one_word`].
    pub(crate) fn search_one_word(
        &self,
        word: &str,
        limit: usize,
        strict: bool,
    ) -> Result<Vec<SearchHit>> {
        let ft = self.full_text()?;
        let word = word.trim();
        if word.is_empty() {
            return Err(ShrikeError::invalid_input("query must not be empty"));
        }
        if word.split_whitespace().nth(1).is_some() {
            return Err(ShrikeError::invalid_input("query must be a single word"));
        }
        if strict {
            Ok(self.strict_lookup(ft, word, limit))
        } else {
            Ok(self.scan_one_word(ft, word, limit))
        }
    }

    /// Store scan across the fields named in `schema`; see
    /// [`crate::cache::Cache::search_values`].
    pub(crate) fn search_values(
        &self,
        query: &str,
        limit: usize,
        schema: &HashSet<String>,
    ) -> Result<Vec<SearchHit>> {
        self.full_text()?;
        let query = query.trim();
        if query.is_empty() {
            return Err(ShrikeError::invalid_input("query must not be empty"));
        }
        let needle = query.to_ascii_lowercase();

        let mut hits = Vec::new();
        for key in &self.record_order {
            if limit > 0 && hits.len() >= limit {
                break;
            }
            let Some(record) = self.records.get(key) else {
                continue;
            };
            if schema.iter().any(|field| field_matches(record, field, &needle)) {
                hits.push(SearchHit {
                    key: key.clone(),
                    record: record.clone(),
                });
            }
        }
        Ok(hits)
    }

    /// Store scan over a single schema field; see
    /// [`crate::cache::Cache::search_with_key`].
    pub(crate) fn search_with_key(
        &self,
        query: &str,
        field: &str,
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let ft = self.full_text()?;
        let query = query.trim();
        if query.is_empty() {
            return Err(ShrikeError::invalid_input("query must not be empty"));
        }
        if field.is_empty() {
            return Err(ShrikeError::invalid_input("field name must not be empty"));
        }
        // Names outside the index schema match nothing.
        if !ft.schema.contains(field) {
            return Ok(Vec::new());
        }
        let needle = query.to_ascii_lowercase();

        let mut hits = Vec::new();
        for key in &self.record_order {
            if limit > 0 && hits.len() >= limit {
                break;
            }
            let Some(record) = self.records.get(key) else {
                continue;
            };
            if field_matches(record, field, &needle) {
                hits.push(SearchHit {
                    key: key.clone(),
                    record: record.clone(),
                });
            }
        }
        Ok(hits)
    }

    /// Exact-token lookup: the whole query canonicalised as one word.
    fn strict_lookup(&self, ft: &FullText, query: &str, limit: usize) -> Vec<SearchHit> {
        let folded = ft.tokenizer.fold(query);
        if folded.is_empty() {
            return Vec::new();
        }
        let Some(posting) = ft.index.lookup(&folded) else {
            return Vec::new();
        };
        let mut hits = Vec::new();
        for key in posting.keys() {
            if limit > 0 && hits.len() >= limit {
                break;
            }
            if let Some(record) = self.records.get(key) {
                hits.push(SearchHit {
                    key: key.to_string(),
                    record: record.clone(),
                });
            }
        }
        hits
    }

    /// Non-strict single-word search: substring scan plus materialisation.
    fn scan_one_word(&self, ft: &FullText, word: &str, limit: usize) -> Vec<SearchHit> {
        self.gather_keys(ft, word, limit)
            .into_iter()
            .filter_map(|key| {
                self.records.get(&key).map(|record| SearchHit {
                    record: record.clone(),
                    key,
                })
            })
            .collect()
    }

    /// Collect the distinct record keys whose tokens contain `word`, in
    /// discovery order: token insertion order first, posting order within a
    /// token. Stops once `limit` keys are gathered (0 = unbounded).
    fn gather_keys(&self, ft: &FullText, word: &str, limit: usize) -> Vec<String> {
        let folded = ft.tokenizer.fold(word);
        if folded.is_empty() {
            return Vec::new();
        }
        let mut seen = AHashSet::new();
        let mut keys = Vec::new();
        for (_, posting) in ft.index.scan_containing(&folded, limit) {
            for key in posting.keys() {
                if limit > 0 && keys.len() >= limit {
                    return keys;
                }
                if seen.insert(key.to_string()) {
                    keys.push(key.to_string());
                }
            }
        }
        keys
    }
}

/// Whether any string reachable through `record`'s `field` contains the
/// already-folded `needle`, ignoring ASCII case.
fn field_matches(record: &Record, field: &str, needle: &str) -> bool {
    let Some(value) = record.get_field(field) else {
        return false;
    };
    let mut strings = Vec::new();
    extractor::collect_strings(value, &mut strings);
    strings
        .iter()
        .any(|text| text.to_ascii_lowercase().contains(needle))
}
