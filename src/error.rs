//! Error types for triesearch.
//!
//! Every fallible operation in the crate returns [`SearchError`]. The
//! `Display` text of each variant is the upper-snake error code that the
//! command surface prints back to the user, e.g.
//! `SEARCH_QUERY_TOKEN_NOT_FOUND(soup)`.
//!
//! ```
//! use triesearch::error::SearchError;
//! use triesearch::index::TrieIndex;
//!
//! let index = TrieIndex::new();
//! match index.lookup("soup") {
//!     Err(SearchError::TokenNotIndexed(token)) => assert_eq!(token, "soup"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for triesearch operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A query chunk contained a character that is neither alphanumeric
    /// nor one of `(`, `)`, `|`, `&`.
    #[error("SEARCH_QUERY_INVALID_CHUNK({0})")]
    InvalidChunk(String),

    /// A parenthesized (or top-level) clause did not reduce to a single
    /// operand or an `operand OP operand` triple.
    #[error("SEARCH_QUERY_INVALID_CLAUSE({0})")]
    InvalidClause(String),

    /// The query ended with at least one `(` still open.
    #[error("SEARCH_QUERY_UNCLOSED_PAREN")]
    UnclosedParenthesis,

    /// A `)` appeared with no matching `(`.
    #[error("SEARCH_QUERY_UNEXPECTED_RPAREN")]
    UnexpectedClosingParenthesis,

    /// The query reduced to nothing.
    #[error("SEARCH_QUERY_UNKNOWN_ERROR")]
    UnknownParseError,

    /// No trie path exists for the token.
    #[error("SEARCH_QUERY_TOKEN_NOT_FOUND({0})")]
    TokenNotIndexed(String),

    /// The document id argument is not a non-negative integer.
    #[error("SEARCH_INDEX_INVALID_DOC_ID({0})")]
    InvalidDocumentId(String),

    /// A command was given fewer arguments than it needs.
    #[error("SEARCH_TOO_FEW_ARGS({0:?})")]
    TooFewArguments(Vec<String>),

    /// A snapshot record was malformed.
    #[error("SEARCH_PARSE_FAILED({0})")]
    DeserializationFailed(#[source] serde_json::Error),

    /// The command name is not registered.
    #[error("COMMAND_NOT_FOUND({0})")]
    UnknownCommand(String),

    /// Snapshot file I/O failed.
    #[error("SEARCH_IO_ERROR({0})")]
    Io(#[from] io::Error),
}

/// Result type alias for operations that may fail with [`SearchError`].
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Create an invalid-clause error describing the offending fragments.
    pub fn invalid_clause<S: Into<String>>(fragments: S) -> Self {
        SearchError::InvalidClause(fragments.into())
    }

    /// Create a too-few-arguments error from the raw argument list.
    pub fn too_few_arguments(args: &[&str]) -> Self {
        SearchError::TooFewArguments(args.iter().map(|a| a.to_string()).collect())
    }
}
