//! Command session around a single index.
//!
//! A [`Session`] owns one [`TrieIndex`] and the [`AppConfig`] that locates
//! its snapshot file, and hands the index to each command handler by
//! reference. Nothing here is global: two sessions are fully independent.
//!
//! ```
//! use triesearch::session::Session;
//! use triesearch::utils::AppConfig;
//!
//! let mut session = Session::new(AppConfig::default());
//! session.handle_line("index 1 soup tomato");
//! let response = session.handle_line("query soup").unwrap();
//! assert_eq!(response.to_string(), "query results 1");
//! ```

pub mod command;
pub mod repl;

pub use command::{Command, Response};
pub use repl::run_repl;

use crate::error::Result;
use crate::index::snapshot;
use crate::index::trie::TrieIndex;
use crate::utils::AppConfig;

pub struct Session {
    index: TrieIndex,
    config: AppConfig,
}

impl Session {
    /// Start with an empty index
    pub fn new(config: AppConfig) -> Self {
        Self {
            index: TrieIndex::new(),
            config,
        }
    }

    /// Start a session, loading the snapshot when `autoload` is set.
    ///
    /// Returns the load outcome to show the user, or `None` when nothing
    /// was attempted (autoload off, or no snapshot file yet). An unreadable
    /// snapshot is reported and replaced by an empty index.
    pub fn open(config: AppConfig) -> (Self, Option<Response>) {
        let mut session = Self::new(config);
        if !session.config.autoload {
            return (session, None);
        }
        if !session.config.snapshot_path.exists() {
            log::debug!(
                "no snapshot at {}, starting empty",
                session.config.snapshot_path.display()
            );
            return (session, None);
        }
        let response = session.reload();
        (session, Some(response))
    }

    /// Start a session from the snapshot file for a one-shot command.
    ///
    /// A missing file yields an empty index, but a file that exists and
    /// cannot be parsed is an error so it is never silently overwritten.
    pub fn from_snapshot(config: AppConfig) -> Result<Self> {
        let index = if config.snapshot_path.exists() {
            snapshot::load(&config.snapshot_path)?
        } else {
            log::debug!(
                "no snapshot at {}, starting empty",
                config.snapshot_path.display()
            );
            TrieIndex::new()
        };
        Ok(Self { index, config })
    }

    pub fn index(&self) -> &TrieIndex {
        &self.index
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse and run one line. Blank lines produce no response.
    pub fn handle_line(&mut self, line: &str) -> Option<Response> {
        match Command::parse(line) {
            Ok(Some(cmd)) => Some(self.execute(cmd)),
            Ok(None) => None,
            Err(err) => {
                log::debug!("rejected {:?}: {}", line, err);
                Some(err.into())
            }
        }
    }

    /// Run a parsed command
    pub fn execute(&mut self, cmd: Command) -> Response {
        log::debug!("executing {:?}", cmd);
        match cmd {
            Command::Index { doc_id, tokens } => {
                command::handle_index(&mut self.index, doc_id, &tokens)
            }
            Command::Query { chunks } => {
                command::handle_query(&self.index, &chunks).unwrap_or_else(Response::from)
            }
            Command::Save => match self.save() {
                Ok(()) => Response::Saved,
                Err(err) => err.into(),
            },
            Command::Load => self.reload(),
            Command::Clear => {
                self.index.clear();
                Response::Cleared
            }
            Command::Exit => Response::Bye,
        }
    }

    /// Write the index to the configured snapshot file
    pub fn save(&self) -> Result<()> {
        snapshot::save(&self.index, &self.config.snapshot_path)
    }

    /// Replace the index with the snapshot file's contents, falling back to
    /// an empty index when it cannot be read
    pub fn reload(&mut self) -> Response {
        match snapshot::load(&self.config.snapshot_path) {
            Ok(index) => {
                self.index = index;
                Response::Loaded
            }
            Err(err) => {
                log::warn!(
                    "unable to load {}: {}",
                    self.config.snapshot_path.display(),
                    err
                );
                self.index = TrieIndex::new();
                Response::LoadFailed
            }
        }
    }
}
