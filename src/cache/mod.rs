//! The cache: record store, full-text state, and the lock that covers them.

#[allow(clippy::module_inception)]
pub mod cache;
pub mod config;
pub mod info;
pub(crate) mod inner;

pub use cache::Cache;
pub use config::FtConfig;
pub use info::CacheInfo;
