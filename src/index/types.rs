/// Unique identifier for a document in the index
pub type DocId = u32;

/// Slot of a node in the trie arena
pub type NodeId = usize;

/// Arena slot of the trie root. The root is allocated first and never freed.
pub const ROOT: NodeId = 0;

/// Parse a raw document id argument.
///
/// Only plain non-negative decimal integers are accepted: no sign, no
/// whitespace, no radix prefix.
pub fn parse_doc_id(raw: &str) -> Option<DocId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
