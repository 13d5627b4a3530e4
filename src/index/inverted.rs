//! The inverted index: canonical tokens mapped to owning record keys.

use ahash::{AHashMap, AHashSet};

use crate::error::{Result, ShrikeError};
use crate::index::posting::{Posting, PostingRemoval};

/// Incrementally maintained map from token to [`Posting`], with optional
/// word-count and byte-size caps.
///
/// Tokens keep their insertion order: substring scans walk tokens oldest
/// first, which gives searches their stable discovery order. The byte
/// accounting counts token bytes plus posting-entry bytes and always equals
/// a from-scratch recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvertedIndex {
    words: AHashMap<String, Posting>,
    /// Tokens in the order they were first indexed; parallel to `words`.
    order: Vec<String>,
    total_bytes: usize,
    max_words: Option<usize>,
    max_bytes: Option<usize>,
}

/// One primitive mutation applied to the index, recorded for rollback.
#[derive(Debug)]
enum JournalOp {
    /// A token entry was created at the end of the insertion order.
    Inserted { token: String, position: usize },
    /// An existing posting was overwritten in place.
    Modified { token: String, prior: Posting },
    /// A token entry was removed from `position` in the insertion order.
    Removed {
        token: String,
        position: usize,
        prior: Posting,
    },
}

/// Undo log covering one mutating operation against the index.
///
/// Replaying the journal in reverse restores the exact prior state: posting
/// shapes, token order, and the running byte count.
#[derive(Debug)]
pub struct IndexJournal {
    ops: Vec<JournalOp>,
    prior_bytes: usize,
}

impl InvertedIndex {
    /// Create an empty index. `None` disables the corresponding cap.
    pub fn new(max_words: Option<usize>, max_bytes: Option<usize>) -> Self {
        InvertedIndex {
            words: AHashMap::new(),
            order: Vec::new(),
            total_bytes: 0,
            max_words,
            max_bytes,
        }
    }

    /// Assemble an index from pre-built parts; the builder is the only
    /// caller and has already enforced the caps and accounting.
    pub(crate) fn from_parts(
        words: AHashMap<String, Posting>,
        order: Vec<String>,
        total_bytes: usize,
        max_words: Option<usize>,
        max_bytes: Option<usize>,
    ) -> Self {
        InvertedIndex {
            words,
            order,
            total_bytes,
            max_words,
            max_bytes,
        }
    }

    /// Number of distinct tokens.
    pub fn word_count(&self) -> usize {
        self.order.len()
    }

    /// Running byte cost of retained tokens and posting entries.
    pub fn bytes(&self) -> usize {
        self.total_bytes
    }

    /// The distinct-token cap, when set.
    pub fn max_words(&self) -> Option<usize> {
        self.max_words
    }

    /// The byte-cost cap, when set.
    pub fn max_bytes(&self) -> Option<usize> {
        self.max_bytes
    }

    /// Read-only posting view; a missing token yields `None`.
    pub fn lookup(&self, token: &str) -> Option<&Posting> {
        self.words.get(token)
    }

    /// Tokens in insertion order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Start an undo log for a mutating operation.
    pub fn begin_journal(&self) -> IndexJournal {
        IndexJournal {
            ops: Vec::new(),
            prior_bytes: self.total_bytes,
        }
    }

    /// Map `token` to `key`, creating or promoting the posting as needed.
    ///
    /// Re-adding a key already in the posting is a no-op. Cap checks run
    /// before any mutation, so a [`ShrikeError::CapExceeded`] rejection
    /// leaves the index untouched.
    pub fn add(&mut self, token: &str, key: &str, journal: &mut IndexJournal) -> Result<()> {
        match self.words.get(token) {
            None => {
                if let Some(max) = self.max_words {
                    if self.order.len() >= max {
                        return Err(ShrikeError::cap_exceeded(format!(
                            "word cap of {max} reached while indexing '{token}'"
                        )));
                    }
                }
                let delta = token.len() + key.len();
                self.check_bytes(delta, token)?;

                self.words.insert(token.to_string(), Posting::single(key));
                journal.ops.push(JournalOp::Inserted {
                    token: token.to_string(),
                    position: self.order.len(),
                });
                self.order.push(token.to_string());
                self.total_bytes += delta;
            }
            Some(posting) => {
                if posting.contains(key) {
                    return Ok(());
                }
                self.check_bytes(key.len(), token)?;

                let prior = posting.clone();
                if let Some(posting) = self.words.get_mut(token) {
                    posting.push(key);
                    journal.ops.push(JournalOp::Modified {
                        token: token.to_string(),
                        prior,
                    });
                    self.total_bytes += key.len();
                }
            }
        }
        Ok(())
    }

    /// Remove `key` from every posting, demoting two-owner postings that
    /// lose one and dropping tokens whose posting becomes empty. Linear in
    /// the total number of posting entries.
    pub fn remove_key(&mut self, key: &str) {
        let mut journal = self.begin_journal();
        self.remove_key_logged(key, &mut journal);
    }

    /// [`InvertedIndex::remove_key`], recording every mutation in `journal`
    /// so the caller can roll the whole operation back.
    pub fn remove_key_logged(&mut self, key: &str, journal: &mut IndexJournal) {
        let mut position = 0;
        while position < self.order.len() {
            let token = &self.order[position];
            let Some(posting) = self.words.get(token) else {
                position += 1;
                continue;
            };
            if !posting.contains(key) {
                position += 1;
                continue;
            }

            let token = token.clone();
            let prior = posting.clone();
            let removal = match self.words.get_mut(&token) {
                Some(posting) => posting.remove(key),
                None => PostingRemoval::NotPresent,
            };
            match removal {
                PostingRemoval::Empty => {
                    self.words.remove(&token);
                    self.order.remove(position);
                    self.total_bytes -= token.len() + key.len();
                    journal.ops.push(JournalOp::Removed {
                        token,
                        position,
                        prior,
                    });
                    // The next token shifted into this position.
                }
                PostingRemoval::Removed => {
                    self.total_bytes -= key.len();
                    journal.ops.push(JournalOp::Modified { token, prior });
                    position += 1;
                }
                PostingRemoval::NotPresent => {
                    position += 1;
                }
            }
        }
    }

    /// Replay `journal` in reverse, restoring the state from before the
    /// operation that produced it.
    pub fn rollback(&mut self, journal: IndexJournal) {
        for op in journal.ops.into_iter().rev() {
            match op {
                JournalOp::Inserted { token, position } => {
                    self.words.remove(&token);
                    self.order.remove(position);
                }
                JournalOp::Modified { token, prior } => {
                    self.words.insert(token, prior);
                }
                JournalOp::Removed {
                    token,
                    position,
                    prior,
                } => {
                    self.order.insert(position, token.clone());
                    self.words.insert(token, prior);
                }
            }
        }
        self.total_bytes = journal.prior_bytes;
    }

    /// Walk tokens in insertion order and collect those containing `query`
    /// (already case folded), stopping once `limit` distinct record keys
    /// have accumulated across the matched postings. A `limit` of 0 is
    /// unbounded.
    pub fn scan_containing(&self, query: &str, limit: usize) -> Vec<(&str, &Posting)> {
        let mut matched = Vec::new();
        let mut seen: AHashSet<&str> = AHashSet::new();
        for token in &self.order {
            if limit > 0 && seen.len() >= limit {
                break;
            }
            if !token.contains(query) {
                continue;
            }
            if let Some(posting) = self.words.get(token) {
                for key in posting.keys() {
                    seen.insert(key);
                }
                matched.push((token.as_str(), posting));
            }
        }
        matched
    }

    /// Recompute the byte cost from scratch: the sum of token byte lengths
    /// plus posting-entry byte lengths. The running count must always equal
    /// this.
    pub fn recompute_bytes(&self) -> usize {
        self.words
            .iter()
            .map(|(token, posting)| token.len() + posting.byte_len())
            .sum()
    }

    fn check_bytes(&self, delta: usize, token: &str) -> Result<()> {
        if let Some(max) = self.max_bytes {
            if self.total_bytes + delta > max {
                return Err(ShrikeError::cap_exceeded(format!(
                    "byte cap of {max} reached while indexing '{token}'"
                )));
            }
        }
        Ok(())
    }
}
