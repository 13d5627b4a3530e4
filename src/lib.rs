//! # Shrike
//!
//! An embedded, in-memory key/value cache with an incrementally maintained
//! full-text index.
//!
//! ## Features
//!
//! - Record store: flat maps from field names to heterogeneous values
//! - Inverted index over schema-selected string fields
//! - Strict (exact token) and non-strict (substring, multi-word) search
//! - Word-count and byte-size caps with atomic rejection
//! - Many concurrent readers, serialised writers behind one lock
//!
//! ## Example
//!
//! ```
//! use shrike::cache::{Cache, FtConfig};
//! use shrike::document::Record;
//!
//! let cache = Cache::new();
//! cache.ft_init(FtConfig::new(["name"])).unwrap();
//!
//! let record = Record::builder()
//!     .add_text("name", "Tristan")
//!     .add_integer("age", 17)
//!     .build();
//! cache.set("user1", record).unwrap();
//!
//! let hits = cache.search("tris", 10, false).unwrap();
//! assert_eq!(hits[0].key, "user1");
//! ```

pub mod analysis;
pub mod cache;
pub mod document;
pub mod error;
pub mod index;
pub mod search;
pub mod snapshot;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
