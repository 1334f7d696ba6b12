pub mod snapshot;
pub mod stats;
pub mod trie;
pub mod types;

pub use snapshot::SnapshotNode;
pub use stats::IndexStats;
pub use trie::{TrieIndex, TrieNode};
pub use types::*;
