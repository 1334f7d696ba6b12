//! # triesearch - Trie-backed full-text search
//!
//! triesearch is a minimal full-text search engine: an in-memory inverted
//! index stored as a character trie, queried with a small boolean language
//! of literals, `&`, `|` and parentheses.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - The trie index, its statistics and JSON snapshots
//! - [`query`] - Query lexing, paren-level parsing and evaluation
//! - [`session`] - Command surface, session state and the interactive loop
//! - [`output`] - Response formatting
//! - [`utils`] - Configuration and document tokenization
//! - [`error`] - The crate error type
//!
//! ## Quick Start
//!
//! ```
//! use triesearch::index::TrieIndex;
//! use triesearch::query::query;
//!
//! let mut index = TrieIndex::new();
//! index.add_document(1, ["bread", "butter", "salt"]);
//! index.add_document(3, ["soup", "fish", "potato", "salt"]);
//!
//! let mut ids = query(&index, ["(butter", "|", "potato)", "&", "salt"]).unwrap();
//! ids.sort();
//! assert_eq!(ids, vec![1, 3]);
//! ```
//!
//! ## Query language
//!
//! Parentheses are the only way to combine more than two operands:
//! `a & b & c` is rejected, `(a & b) & c` is accepted. A literal with no
//! path in the trie fails the whole query rather than matching nothing.

pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod session;
pub mod utils;

pub use error::{Result, SearchError};
