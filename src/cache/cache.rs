//! The public cache API and its locking discipline.

use std::collections::HashSet;
use std::path::Path;

use parking_lot::RwLock;

use crate::cache::config::FtConfig;
use crate::cache::info::CacheInfo;
use crate::cache::inner::CacheInner;
use crate::document::Record;
use crate::error::Result;
use crate::search::SearchHit;
use crate::snapshot;

/// An embedded, in-memory key/value cache with an optional full-text index.
///
/// One reader/writer lock covers the record store and the index: any number
/// of searches and reads run concurrently, mutations are serialised, and a
/// read always observes a consistent pair. Within a mutation, store and
/// index updates are applied together or not at all.
///
/// Public methods acquire the lock and never call each other; all engine
/// logic lives in lock-free internal methods.
///
/// # Examples
///
/// ```
/// use shrike::cache::{Cache, FtConfig};
/// use shrike::document::Record;
///
/// let cache = Cache::new();
/// cache.ft_init(FtConfig::new(["title"])).unwrap();
///
/// let record = Record::builder().add_text("title", "Hello World").build();
/// cache.set("doc1", record).unwrap();
///
/// let hits = cache.search("hello", 10, false).unwrap();
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].key, "doc1");
/// ```
#[derive(Debug, Default)]
pub struct Cache {
    inner: RwLock<CacheInner>,
}

impl Cache {
    /// Create an empty cache with an uninitialised full-text index.
    pub fn new() -> Self {
        Cache {
            inner: RwLock::new(CacheInner::new()),
        }
    }

    // ---- full-text lifecycle (exclusive lock) ----

    /// Initialise the full-text index over the records already in the
    /// store. Fails with [`crate::error::ShrikeError::AlreadyInitialized`]
    /// when the index is live; a failed load leaves it uninitialised.
    pub fn ft_init(&self, config: FtConfig) -> Result<()> {
        self.inner.write().ft_init(config)
    }

    /// Initialise the full-text index and load `data` into the store in one
    /// step. A key colliding with a live record fails the whole operation
    /// before any state changes.
    pub fn ft_init_with_map(&self, data: Vec<(String, Record)>, config: FtConfig) -> Result<()> {
        self.inner.write().ft_init_with_map(data, config)
    }

    /// Initialise the full-text index from a JSON snapshot file: an object
    /// mapping record keys to field objects. The file is read and parsed
    /// before the lock is taken.
    pub fn ft_init_with_snapshot<P: AsRef<Path>>(&self, path: P, config: FtConfig) -> Result<()> {
        let data = snapshot::load_snapshot(path.as_ref())?;
        self.inner.write().ft_init_with_map(data, config)
    }

    /// Drop the full-text index, returning the cache to the uninitialised
    /// state. The record store is untouched, and a later
    /// [`Cache::ft_init`] behaves like a first initialisation.
    pub fn ft_reset(&self) -> Result<()> {
        self.inner.write().ft_reset()
    }

    /// Whether the full-text index is initialised.
    pub fn ft_is_initialized(&self) -> bool {
        self.inner.read().ft_is_initialized()
    }

    // ---- store mutations (exclusive lock) ----

    /// Insert or fully replace the record at `key`. With a live full-text
    /// index the record's old postings are purged and the new contents
    /// indexed atomically: a cap rejection leaves store and index exactly
    /// as they were.
    pub fn set(&self, key: &str, record: Record) -> Result<()> {
        self.inner.write().set(key, record)
    }

    /// Remove the record at `key` and purge it from every posting.
    /// Deleting a missing key is a no-op.
    pub fn delete(&self, key: &str) {
        self.inner.write().delete(key)
    }

    // ---- store views (shared lock) ----

    /// Snapshot copy of the record at `key`, or `None` when absent.
    pub fn get(&self, key: &str) -> Option<Record> {
        self.inner.read().get(key)
    }

    /// Whether a record exists at `key`.
    pub fn exists(&self, key: &str) -> bool {
        self.inner.read().exists(key)
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.inner.read().len() == 0
    }

    /// Record keys in first-insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().keys()
    }

    /// Record snapshots in first-insertion order.
    pub fn values(&self) -> Vec<Record> {
        self.inner.read().values()
    }

    /// Point-in-time statistics for the store and the index.
    pub fn info(&self) -> CacheInfo {
        self.inner.read().info()
    }

    // ---- search (shared lock) ----

    /// Search the full-text index. Strict mode looks the whole query up as
    /// one exact token. Non-strict mode splits the query on whitespace,
    /// matches each word as a substring of indexed tokens, and returns the
    /// records satisfying every word, in the first word's discovery order.
    /// A `limit` of 0 is unbounded.
    pub fn search(&self, query: &str, limit: usize, strict: bool) -> Result<Vec<SearchHit>> {
        self.inner.read().search(query, limit, strict)
    }

    /// [`Cache::search`] for a single already-split word; whitespace in
    /// `word` is rejected as invalid input.
    pub fn search_one_word(&self, word: &str, limit: usize, strict: bool) -> Result<Vec<SearchHit>> {
        self.inner.read().search_one_word(word, limit, strict)
    }

    /// Scan stored records directly, bypassing the index: a record matches
    /// when any string content of any field named in `schema` contains
    /// `query` case-insensitively. Fields outside the index schema are
    /// allowed; names no record has simply match nothing.
    pub fn search_values(
        &self,
        query: &str,
        limit: usize,
        schema: &HashSet<String>,
    ) -> Result<Vec<SearchHit>> {
        self.inner.read().search_values(query, limit, schema)
    }

    /// Like [`Cache::search_values`] for the single field `key`, which must
    /// belong to the index schema; other names match nothing.
    pub fn search_with_key(&self, query: &str, key: &str, limit: usize) -> Result<Vec<SearchHit>> {
        self.inner.read().search_with_key(query, key, limit)
    }
}
