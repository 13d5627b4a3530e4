//! The token → record-keys inverted index.

pub mod builder;
pub mod inverted;
pub mod posting;

pub use builder::IndexBuilder;
pub use inverted::{IndexJournal, InvertedIndex};
pub use posting::{Posting, PostingRemoval};
