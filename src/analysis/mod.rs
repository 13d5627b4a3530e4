//! Text analysis for the full-text index.
//!
//! The index consumes the tokens produced here: whitespace-separated words
//! with edge punctuation stripped, ASCII uppercase folded to lowercase, and
//! words below the configured minimum length dropped.

pub mod tokenizer;

pub use tokenizer::Tokenizer;
