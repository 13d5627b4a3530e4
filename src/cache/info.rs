//! Point-in-time cache statistics.

use serde::Serialize;

/// A snapshot of cache and index statistics.
///
/// Index-related fields read as zero/`None` while the full-text index is
/// uninitialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheInfo {
    /// Number of live records.
    pub records: usize,
    /// Whether the full-text index is initialised.
    pub ft_initialized: bool,
    /// Number of distinct indexed words.
    pub words: usize,
    /// Retained byte cost of the index (tokens plus posting entries).
    pub index_bytes: usize,
    /// Distinct-word cap, when set.
    pub max_words: Option<usize>,
    /// Byte-cost cap, when set.
    pub max_bytes: Option<usize>,
    /// Minimum indexed word length, in bytes.
    pub min_word_length: usize,
}
