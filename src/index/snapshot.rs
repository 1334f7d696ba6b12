//! JSON snapshot of a [`TrieIndex`].
//!
//! The persisted schema is a recursive record:
//!
//! ```json
//! { "char": null, "doc_ids": [], "children": {
//!     "a": { "char": "a", "doc_ids": [1] } } }
//! ```
//!
//! `children` is omitted when a node has none. The root's `char` is `null`.
//!
//! Every trie level is one level of JSON nesting, so nothing here recurses
//! per level: the writer and the rebuild run over explicit stacks, parsing
//! goes through `serde_stacker`, and [`SnapshotNode`] drops iteratively.

use crate::error::{Result, SearchError};
use crate::index::trie::{TrieIndex, TrieNode};
use crate::index::types::{DocId, NodeId, ROOT};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::mem;
use std::path::Path;

/// One node of the snapshot tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode {
    #[serde(rename = "char", deserialize_with = "required_char")]
    pub character: Option<char>,
    pub doc_ids: Vec<DocId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<char, SnapshotNode>,
}

/// `char` may be null but must be present
fn required_char<'de, D>(deserializer: D) -> std::result::Result<Option<char>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<char>::deserialize(deserializer)
}

/// Capture the whole trie as a snapshot record
pub fn serialize(index: &TrieIndex) -> SnapshotNode {
    let mut root = SnapshotNode::detached(index.root());

    // Pre-order, so every node sits after its parent
    let mut nodes: Vec<SnapshotNode> = Vec::new();
    let mut parents: Vec<Option<usize>> = Vec::new();
    let mut stack: Vec<(NodeId, Option<usize>)> =
        index.root().children().map(|(_, id)| (id, None)).collect();
    while let Some((id, parent)) = stack.pop() {
        let node = index.node(id);
        let pos = nodes.len();
        nodes.push(SnapshotNode::detached(node));
        parents.push(parent);
        stack.extend(node.children().map(|(_, child)| (child, Some(pos))));
    }

    // Fold back to front: a node is complete before it moves into its parent
    while let Some(node) = nodes.pop() {
        let Some(ch) = node.character else { continue };
        let siblings = match parents[nodes.len()] {
            Some(parent) => &mut nodes[parent].children,
            None => &mut root.children,
        };
        siblings.insert(ch, node);
    }
    root
}

/// Rebuild a trie from an untyped JSON record
pub fn deserialize(record: serde_json::Value) -> Result<TrieIndex> {
    SnapshotNode::deserialize(serde_stacker::Deserializer::new(record))
        .map_err(SearchError::DeserializationFailed)?
        .into_index()
}

/// Stream the trie as snapshot JSON, byte-for-byte what serializing
/// [`serialize`]'s record with `serde_json` would produce
pub fn write_json<W: Write>(index: &TrieIndex, mut writer: W) -> Result<()> {
    enum Step {
        Node(NodeId),
        Key { ch: char, first: bool },
        Close,
    }

    let mut steps = vec![Step::Node(ROOT)];
    while let Some(step) = steps.pop() {
        match step {
            Step::Node(id) => {
                let node = index.node(id);
                writer.write_all(b"{\"char\":")?;
                serde_json::to_writer(&mut writer, &node.character()).map_err(io::Error::from)?;
                writer.write_all(b",\"doc_ids\":")?;
                serde_json::to_writer(&mut writer, node.doc_ids()).map_err(io::Error::from)?;

                let children: Vec<(char, NodeId)> = node.children().collect();
                if children.is_empty() {
                    writer.write_all(b"}")?;
                    continue;
                }
                writer.write_all(b",\"children\":{")?;
                steps.push(Step::Close);
                for (i, &(ch, child)) in children.iter().enumerate().rev() {
                    steps.push(Step::Node(child));
                    steps.push(Step::Key { ch, first: i == 0 });
                }
            }
            Step::Key { ch, first } => {
                if !first {
                    writer.write_all(b",")?;
                }
                serde_json::to_writer(&mut writer, &ch).map_err(io::Error::from)?;
                writer.write_all(b":")?;
            }
            // Closes the children map and the node holding it
            Step::Close => writer.write_all(b"}}")?,
        }
    }
    Ok(())
}

/// Serialize the trie to a JSON string
pub fn to_json_string(index: &TrieIndex) -> Result<String> {
    let mut buf = Vec::new();
    write_json(index, &mut buf)?;
    String::from_utf8(buf).map_err(|e| SearchError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Parse a JSON string produced by [`to_json_string`]
pub fn from_json_str(json: &str) -> Result<TrieIndex> {
    let mut de = serde_json::Deserializer::from_str(json);
    de.disable_recursion_limit();
    let root = SnapshotNode::deserialize(serde_stacker::Deserializer::new(&mut de))
        .map_err(SearchError::DeserializationFailed)?;
    de.end().map_err(SearchError::DeserializationFailed)?;
    root.into_index()
}

/// Load a snapshot file
pub fn load(path: &Path) -> Result<TrieIndex> {
    let content = fs::read_to_string(path)?;
    let index = from_json_str(&content)?;
    log::info!(
        "loaded snapshot {} ({} nodes)",
        path.display(),
        index.node_count()
    );
    Ok(index)
}

/// Write a snapshot file, replacing any previous contents
pub fn save(index: &TrieIndex, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(fs::File::create(path)?);
    write_json(index, &mut writer)?;
    writer.flush()?;
    log::info!(
        "saved snapshot {} ({} nodes)",
        path.display(),
        index.node_count()
    );
    Ok(())
}

impl SnapshotNode {
    /// Copy of a trie node without its children
    fn detached(node: &TrieNode) -> Self {
        SnapshotNode {
            character: node.character(),
            doc_ids: node.doc_ids().to_vec(),
            children: BTreeMap::new(),
        }
    }

    /// Rebuild the trie, restoring parent links.
    ///
    /// The root must have a null `char`; every other node must carry the
    /// same character as its key in the parent's `children` map.
    pub fn into_index(mut self) -> Result<TrieIndex> {
        if let Some(ch) = self.character {
            return Err(malformed(format!("root node has character {ch:?}")));
        }
        let mut index = TrieIndex::new();
        index.set_root_doc_ids(mem::take(&mut self.doc_ids));

        let mut pending = vec![(ROOT, mem::take(&mut self.children))];
        while let Some((parent, children)) = pending.pop() {
            for (key, mut child) in children {
                match child.character {
                    Some(ch) if ch == key => {}
                    other => {
                        return Err(malformed(format!(
                            "child under key {key:?} has character {other:?}"
                        )));
                    }
                }
                let id = index.attach_child(parent, key, mem::take(&mut child.doc_ids));
                pending.push((id, mem::take(&mut child.children)));
            }
        }
        Ok(index)
    }
}

impl Drop for SnapshotNode {
    fn drop(&mut self) {
        // Unnest before dropping so each node is dropped childless
        let mut pending: Vec<SnapshotNode> = mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(mem::take(&mut node.children).into_values());
        }
    }
}

fn malformed(msg: String) -> SearchError {
    SearchError::DeserializationFailed(serde_json::Error::custom(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_index() -> TrieIndex {
        let mut index = TrieIndex::new();
        index.add_document(1, ["soup", "tomato", "cream", "salt"]);
        index.add_document(2, ["cake", "sugar", "cream", "butter"]);
        index.add_document(1, ["bread", "butter", "salt"]);
        index.add_document(3, ["soup", "fish", "salt"]);
        index
    }

    #[test]
    fn test_serialize_shape() {
        let mut index = TrieIndex::new();
        index.add_document(7, ["ab"]);

        let value = serde_json::to_value(serialize(&index)).unwrap();
        assert_eq!(
            value,
            json!({
                "char": null,
                "doc_ids": [],
                "children": {
                    "a": {
                        "char": "a",
                        "doc_ids": [],
                        "children": {
                            "b": { "char": "b", "doc_ids": [7] }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_empty_index_has_no_children_key() {
        let value = serde_json::to_value(serialize(&TrieIndex::new())).unwrap();
        assert_eq!(value, json!({ "char": null, "doc_ids": [] }));
    }

    #[test]
    fn test_round_trip_preserves_lookups() {
        let index = sample_index();
        let value = serde_json::to_value(serialize(&index)).unwrap();
        let restored = deserialize(value).unwrap();

        assert_eq!(restored.tokens(), index.tokens());
        assert_eq!(restored.node_count(), index.node_count());
        assert_eq!(restored.lookup("butter").unwrap(), &[2, 1]);
        assert!(restored.lookup("tomato").is_err());
    }

    #[test]
    fn test_round_trip_through_string() {
        let index = sample_index();
        let json = to_json_string(&index).unwrap();
        let restored = from_json_str(&json).unwrap();
        assert_eq!(restored.tokens(), index.tokens());
    }

    #[test]
    fn test_restored_trie_prunes() {
        let mut restored = deserialize(serde_json::to_value(serialize(&sample_index())).unwrap()).unwrap();
        restored.add_document(3, Vec::<String>::new());
        assert!(restored.lookup("fish").is_err());
        assert_eq!(restored.lookup("salt").unwrap(), &[1]);
    }

    #[test]
    fn test_writer_matches_serde_output() {
        let index = sample_index();
        assert_eq!(
            to_json_string(&index).unwrap(),
            serde_json::to_string(&serialize(&index)).unwrap()
        );
    }

    #[test]
    fn test_long_token_round_trip() {
        let token = "a".repeat(100_000);
        let mut index = TrieIndex::new();
        index.add_document(1, [token.as_str()]);
        index.add_document(2, ["ab"]);

        let restored = from_json_str(&to_json_string(&index).unwrap()).unwrap();
        assert_eq!(restored.lookup(&token).unwrap(), &[1]);
        assert_eq!(restored.lookup("ab").unwrap(), &[2]);
        assert_eq!(restored.node_count(), index.node_count());

        let rebuilt = serialize(&index).into_index().unwrap();
        assert_eq!(rebuilt.lookup(&token).unwrap(), &[1]);
    }

    /// A chain of `depth` nodes spelling "a" repeatedly, ending in `leaf`
    fn nested_snapshot(depth: usize, leaf: &str) -> String {
        let mut json = String::from(r#"{"char":null,"doc_ids":[],"children":{"#);
        for _ in 1..depth {
            json.push_str(r#""a":{"char":"a","doc_ids":[],"children":{"#);
        }
        json.push_str(leaf);
        for _ in 1..depth {
            json.push_str("}}");
        }
        json.push_str("}}");
        json
    }

    #[test]
    fn test_deeply_nested_snapshot_loads() {
        let json = nested_snapshot(20_000, r#""a":{"char":"a","doc_ids":[7]}"#);
        let index = from_json_str(&json).unwrap();
        assert_eq!(index.lookup(&"a".repeat(20_000)).unwrap(), &[7]);
        assert_eq!(index.lookup("aaa").unwrap(), &[] as &[DocId]);
    }

    #[test]
    fn test_deeply_nested_mismatch_fails() {
        let json = nested_snapshot(20_000, r#""a":{"char":"b","doc_ids":[7]}"#);
        assert!(matches!(
            from_json_str(&json),
            Err(SearchError::DeserializationFailed(_))
        ));

        let truncated = nested_snapshot(20_000, r#""a":{"char":"a","doc_ids":[7]}"#);
        assert!(matches!(
            from_json_str(&truncated[..truncated.len() - 1]),
            Err(SearchError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn test_missing_fields_fail() {
        for bad in [
            json!({ "doc_ids": [] }),
            json!({ "char": null }),
            json!({ "char": null, "doc_ids": "nope" }),
            json!({ "char": null, "doc_ids": [-1] }),
            json!({ "char": null, "doc_ids": [], "children": { "a": { "char": "a" } } }),
            json!([]),
        ] {
            assert!(
                matches!(deserialize(bad.clone()), Err(SearchError::DeserializationFailed(_))),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn test_structural_mismatch_fails() {
        for bad in [
            json!({ "char": "x", "doc_ids": [] }),
            json!({ "char": null, "doc_ids": [], "children": { "a": { "char": "b", "doc_ids": [1] } } }),
            json!({ "char": null, "doc_ids": [], "children": { "a": { "char": null, "doc_ids": [1] } } }),
            json!({ "char": null, "doc_ids": [], "children": { "ab": { "char": "a", "doc_ids": [1] } } }),
            json!({ "char": "ab", "doc_ids": [] }),
        ] {
            assert!(
                matches!(deserialize(bad.clone()), Err(SearchError::DeserializationFailed(_))),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn test_duplicate_ids_collapse() {
        let index = deserialize(json!({
            "char": null,
            "doc_ids": [],
            "children": { "a": { "char": "a", "doc_ids": [2, 1, 2] } }
        }))
        .unwrap();
        assert_eq!(index.lookup("a").unwrap(), &[2, 1]);
    }

    #[test]
    fn test_trailing_garbage_fails() {
        assert!(matches!(
            from_json_str(r#"{"char":null,"doc_ids":[]} x"#),
            Err(SearchError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("index.json");

        save(&sample_index(), &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.lookup("salt").unwrap(), &[1, 3]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(&dir.path().join("missing.json")),
            Err(SearchError::Io(_))
        ));
    }
}
