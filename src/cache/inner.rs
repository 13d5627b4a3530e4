//! Lock-free engine state: the record store and the live full-text index.
//!
//! Every method here assumes the caller holds the cache lock in the
//! appropriate mode. The public locking wrappers live in
//! [`crate::cache::cache`]; the search operations are implemented in
//! [`crate::search::searcher`].

use std::collections::HashSet;

use ahash::{AHashMap, AHashSet};
use log::debug;

use crate::analysis::Tokenizer;
use crate::cache::config::FtConfig;
use crate::cache::info::CacheInfo;
use crate::document::{extractor, Record};
use crate::error::{Result, ShrikeError};
use crate::index::{IndexBuilder, IndexJournal, InvertedIndex};

/// Live full-text state: the index plus the analysis configuration fixed at
/// init time.
#[derive(Debug)]
pub(crate) struct FullText {
    pub(crate) index: InvertedIndex,
    pub(crate) schema: HashSet<String>,
    pub(crate) tokenizer: Tokenizer,
}

/// The engine state behind the cache lock.
#[derive(Debug, Default)]
pub(crate) struct CacheInner {
    pub(crate) records: AHashMap<String, Record>,
    /// Record keys in first-insertion order.
    pub(crate) record_order: Vec<String>,
    pub(crate) ft: Option<FullText>,
}

impl CacheInner {
    pub(crate) fn new() -> Self {
        CacheInner::default()
    }

    /// The live full-text state, or [`ShrikeError::NotInitialized`].
    pub(crate) fn full_text(&self) -> Result<&FullText> {
        self.ft.as_ref().ok_or(ShrikeError::NotInitialized)
    }

    // ---- store views ----

    pub(crate) fn get(&self, key: &str) -> Option<Record> {
        self.records.get(key).cloned()
    }

    pub(crate) fn exists(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.record_order.clone()
    }

    pub(crate) fn values(&self) -> Vec<Record> {
        self.record_order
            .iter()
            .filter_map(|key| self.records.get(key))
            .cloned()
            .collect()
    }

    pub(crate) fn info(&self) -> CacheInfo {
        match &self.ft {
            Some(ft) => CacheInfo {
                records: self.records.len(),
                ft_initialized: true,
                words: ft.index.word_count(),
                index_bytes: ft.index.bytes(),
                max_words: ft.index.max_words(),
                max_bytes: ft.index.max_bytes(),
                min_word_length: ft.tokenizer.min_word_length(),
            },
            None => CacheInfo {
                records: self.records.len(),
                ft_initialized: false,
                words: 0,
                index_bytes: 0,
                max_words: None,
                max_bytes: None,
                min_word_length: 0,
            },
        }
    }

    // ---- store mutations ----

    /// Insert or fully replace the record at `key`, keeping store and index
    /// in step. The index is updated first and rolled back on failure, so a
    /// cap rejection leaves both structures exactly as they were.
    pub(crate) fn set(&mut self, key: &str, record: Record) -> Result<()> {
        if key.is_empty() {
            return Err(ShrikeError::invalid_input("record key must not be empty"));
        }
        if let Some(ft) = &mut self.ft {
            let mut journal = ft.index.begin_journal();
            ft.index.remove_key_logged(key, &mut journal);
            if let Err(e) = index_record(ft, key, &record, &mut journal) {
                ft.index.rollback(journal);
                debug!("set({key}) rejected: {e}");
                return Err(e);
            }
        }
        if !self.records.contains_key(key) {
            self.record_order.push(key.to_string());
        }
        self.records.insert(key.to_string(), record);
        Ok(())
    }

    /// Remove the record at `key` and purge it from every posting. Deleting
    /// a missing key is a no-op.
    pub(crate) fn delete(&mut self, key: &str) {
        if self.records.remove(key).is_none() {
            return;
        }
        self.record_order.retain(|k| k != key);
        if let Some(ft) = &mut self.ft {
            ft.index.remove_key(key);
        }
    }

    // ---- full-text lifecycle ----

    /// Initialise the full-text index over the records already in the
    /// store. On failure the index stays uninitialised and the store is
    /// untouched.
    pub(crate) fn ft_init(&mut self, config: FtConfig) -> Result<()> {
        if self.ft.is_some() {
            return Err(ShrikeError::AlreadyInitialized);
        }
        config.validate()?;

        let records = self
            .record_order
            .iter()
            .filter_map(|key| self.records.get(key).map(|record| (key.as_str(), record)));
        self.ft = Some(build_full_text(&config, records)?);
        debug!(
            "full-text index initialized over {} records",
            self.record_order.len()
        );
        Ok(())
    }

    /// Initialise the full-text index and load `data` into the store in one
    /// step. Existing records are indexed first, then the batch in order.
    /// Any key collision fails the whole operation before state changes.
    pub(crate) fn ft_init_with_map(
        &mut self,
        data: Vec<(String, Record)>,
        config: FtConfig,
    ) -> Result<()> {
        if self.ft.is_some() {
            return Err(ShrikeError::AlreadyInitialized);
        }
        config.validate()?;

        let mut incoming: AHashSet<&str> = AHashSet::with_capacity(data.len());
        for (key, _) in &data {
            if key.is_empty() {
                return Err(ShrikeError::invalid_input("record key must not be empty"));
            }
            if self.records.contains_key(key) {
                return Err(ShrikeError::key_collision(format!(
                    "key '{key}' already exists in cache"
                )));
            }
            if !incoming.insert(key.as_str()) {
                return Err(ShrikeError::key_collision(format!(
                    "key '{key}' appears twice in batch"
                )));
            }
        }

        let existing = self
            .record_order
            .iter()
            .filter_map(|key| self.records.get(key).map(|record| (key.as_str(), record)));
        let batch = data.iter().map(|(key, record)| (key.as_str(), record));
        let ft = build_full_text(&config, existing.chain(batch))?;

        for (key, record) in data {
            self.record_order.push(key.clone());
            self.records.insert(key, record);
        }
        self.ft = Some(ft);
        debug!("full-text index initialized, store now {} records", self.records.len());
        Ok(())
    }

    /// Drop the full-text index, returning it to the uninitialised state.
    /// The record store is untouched.
    pub(crate) fn ft_reset(&mut self) -> Result<()> {
        if self.ft.take().is_none() {
            return Err(ShrikeError::NotInitialized);
        }
        debug!("full-text index reset");
        Ok(())
    }

    pub(crate) fn ft_is_initialized(&self) -> bool {
        self.ft.is_some()
    }
}

/// Feed every schema-selected token of `record` into the live index,
/// logging each mutation. The caller rolls the journal back on error.
fn index_record(
    ft: &mut FullText,
    key: &str,
    record: &Record,
    journal: &mut IndexJournal,
) -> Result<()> {
    for (field, value) in record.iter() {
        if !ft.schema.contains(field) {
            continue;
        }
        let mut strings = Vec::new();
        extractor::collect_strings(value, &mut strings);
        for text in strings {
            for token in ft.tokenizer.tokenize(text) {
                ft.index.add(&token, key, journal)?;
            }
        }
    }
    Ok(())
}

/// Index a whole batch of records through the temp builder and assemble the
/// full-text state in one pass.
fn build_full_text<'a, I>(config: &FtConfig, records: I) -> Result<FullText>
where
    I: Iterator<Item = (&'a str, &'a Record)>,
{
    let tokenizer = Tokenizer::new(config.min_word_length());
    let mut builder = IndexBuilder::new(config.max_words(), config.max_bytes());
    for (key, record) in records {
        for (field, value) in record.iter() {
            if !config.schema().contains(field) {
                continue;
            }
            let mut strings = Vec::new();
            extractor::collect_strings(value, &mut strings);
            for text in strings {
                for token in tokenizer.tokenize(text) {
                    builder.insert(&token, key)?;
                }
            }
        }
    }
    Ok(FullText {
        index: builder.build(),
        schema: config.schema().clone(),
        tokenizer,
    })
}
