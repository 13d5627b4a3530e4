//! Query execution over the index and the record store.

pub mod searcher;

pub use searcher::SearchHit;
