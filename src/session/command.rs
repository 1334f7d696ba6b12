//! Line-oriented commands and the responses they produce.

use crate::error::{Result, SearchError};
use crate::index::trie::TrieIndex;
use crate::index::types::{parse_doc_id, DocId};
use crate::query::query;
use crate::utils::tokenizer::extract_tokens;
use std::fmt;

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `index <doc_id> <text>...` - replace a document's tokens
    Index { doc_id: DocId, tokens: Vec<String> },
    /// `query <chunk>...` - evaluate a boolean query
    Query { chunks: Vec<String> },
    /// `save` - write the snapshot file
    Save,
    /// `load` - reload the snapshot file
    Load,
    /// `clear` - reset to an empty index
    Clear,
    /// `exit` - end the session
    Exit,
}

impl Command {
    /// Parse a whitespace-separated command line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();
        Self::from_parts(name, &args).map(Some)
    }

    /// Build a command from its name and arguments.
    ///
    /// Arguments are fully validated here, so a command that parses never
    /// fails half way through mutating the index.
    pub fn from_parts(name: &str, args: &[&str]) -> Result<Command> {
        match name {
            "index" => {
                if args.len() < 2 {
                    return Err(SearchError::too_few_arguments(args));
                }
                let doc_id = parse_doc_id(args[0])
                    .ok_or_else(|| SearchError::InvalidDocumentId(args[0].to_string()))?;
                Ok(Command::Index {
                    doc_id,
                    tokens: extract_tokens(&args[1..]),
                })
            }
            "query" => {
                if args.is_empty() {
                    return Err(SearchError::too_few_arguments(args));
                }
                Ok(Command::Query {
                    chunks: args.iter().map(|a| a.to_string()).collect(),
                })
            }
            "save" => Ok(Command::Save),
            "load" => Ok(Command::Load),
            "clear" => Ok(Command::Clear),
            "exit" | "quit" => Ok(Command::Exit),
            other => Err(SearchError::UnknownCommand(other.to_string())),
        }
    }

    /// Whether running the command changes the index
    pub fn mutates_index(&self) -> bool {
        matches!(self, Command::Index { .. } | Command::Load | Command::Clear)
    }
}

/// Outcome of a command, rendered the way the shell prints it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Indexed(DocId),
    Results(Vec<DocId>),
    Saved,
    Loaded,
    /// The snapshot could not be read; the session fell back to an empty index
    LoadFailed,
    Cleared,
    Bye,
    Failure(String),
}

impl Response {
    pub fn is_failure(&self) -> bool {
        matches!(self, Response::Failure(_) | Response::LoadFailed)
    }

    pub fn ends_session(&self) -> bool {
        matches!(self, Response::Bye)
    }
}

impl From<SearchError> for Response {
    fn from(err: SearchError) -> Self {
        Response::Failure(err.to_string())
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Indexed(doc_id) => write!(f, "index ok {}", doc_id),
            Response::Results(doc_ids) => {
                write!(f, "query results")?;
                for doc_id in doc_ids {
                    write!(f, " {}", doc_id)?;
                }
                Ok(())
            }
            Response::Saved => write!(f, "JSON file saved"),
            Response::Loaded => write!(f, "Loaded index.json successfully"),
            Response::LoadFailed => write!(
                f,
                "WARNING - Unable to load index file! Defaulting to empty index..."
            ),
            Response::Cleared => write!(f, "Index cleared"),
            Response::Bye => write!(f, "Bye!"),
            Response::Failure(message) => write!(f, "index error {}", message),
        }
    }
}

/// Run `index` against the given trie
pub fn handle_index(index: &mut TrieIndex, doc_id: DocId, tokens: &[String]) -> Response {
    index.add_document(doc_id, tokens);
    Response::Indexed(doc_id)
}

/// Run `query` against the given trie
pub fn handle_query(index: &TrieIndex, chunks: &[String]) -> Result<Response> {
    Ok(Response::Results(query(index, chunks)?))
}
