//! Character trie mapping tokens to the documents that contain them.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Each node
//! is owned by exactly one entry in its parent's `children` map; the
//! `parent` link is a plain id used only to detach a node while pruning.

use crate::error::{Result, SearchError};
use crate::index::types::{DocId, NodeId, ROOT};
use std::collections::{BTreeMap, BTreeSet};

/// A single trie node. Every edge is labelled by one character.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    character: Option<char>,
    doc_ids: Vec<DocId>,
    children: BTreeMap<char, NodeId>,
    parent: Option<NodeId>,
}

impl TrieNode {
    fn new(character: char, parent: NodeId) -> Self {
        Self {
            character: Some(character),
            doc_ids: Vec::new(),
            children: BTreeMap::new(),
            parent: Some(parent),
        }
    }

    /// Edge character leading to this node, `None` for the root
    pub fn character(&self) -> Option<char> {
        self.character
    }

    /// Documents whose token ends at this node, in first-insertion order
    pub fn doc_ids(&self) -> &[DocId] {
        &self.doc_ids
    }

    /// Child ids keyed by edge character, in character order
    pub fn children(&self) -> impl Iterator<Item = (char, NodeId)> + '_ {
        self.children.iter().map(|(&c, &id)| (c, id))
    }

    /// A node that carries no documents and has no children must be pruned
    fn is_vacant(&self) -> bool {
        self.doc_ids.is_empty() && self.children.is_empty()
    }

    fn push_doc_id(&mut self, doc_id: DocId) {
        if !self.doc_ids.contains(&doc_id) {
            self.doc_ids.push(doc_id);
        }
    }
}

/// In-memory inverted index stored as a character trie.
#[derive(Debug, Clone)]
pub struct TrieIndex {
    nodes: Vec<TrieNode>,
    /// Slots released by pruning, reused before the arena grows
    free: Vec<NodeId>,
}

impl Default for TrieIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl TrieIndex {
    /// Create an index holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            free: Vec::new(),
        }
    }

    /// Index `tokens` under `doc_id`, replacing whatever the document held
    /// before. An empty token list simply deletes the document.
    pub fn add_document<I, S>(&mut self, doc_id: DocId, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.remove_document(doc_id);
        for token in tokens {
            self.insert_token(doc_id, token.as_ref());
        }
    }

    /// Add a single token for `doc_id` without touching its other tokens
    fn insert_token(&mut self, doc_id: DocId, token: &str) {
        let mut current = ROOT;
        for ch in token.chars() {
            current = match self.nodes[current].children.get(&ch) {
                Some(&child) => child,
                None => self.alloc_child(current, ch),
            };
        }
        self.nodes[current].push_doc_id(doc_id);
    }

    /// Erase every occurrence of `doc_id` and prune the nodes left empty
    pub fn remove_document(&mut self, doc_id: DocId) {
        self.remove_below(ROOT, doc_id);
    }

    /// Documents whose token is exactly `token`.
    ///
    /// Fails with [`SearchError::TokenNotIndexed`] when no trie path spells
    /// the token. A path that exists but currently holds no documents (an
    /// interior node) yields an empty slice.
    pub fn lookup(&self, token: &str) -> Result<&[DocId]> {
        self.find(token)
            .map(|id| self.nodes[id].doc_ids.as_slice())
            .ok_or_else(|| SearchError::TokenNotIndexed(token.to_string()))
    }

    /// Whether a trie path spells `token`
    pub fn contains_path(&self, token: &str) -> bool {
        self.find(token).is_some()
    }

    /// Drop every document, leaving only the root
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// True when nothing but an empty root remains
    pub fn is_empty(&self) -> bool {
        self.nodes[ROOT].is_vacant()
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Every token that currently resolves to at least one document,
    /// in lexicographic order, paired with its documents
    pub fn tokens(&self) -> Vec<(String, Vec<DocId>)> {
        let mut out = Vec::new();
        let mut prefix = String::new();
        // (node, byte length of the prefix spelled by its parent)
        let mut stack = vec![(ROOT, 0)];
        while let Some((id, parent_len)) = stack.pop() {
            let node = &self.nodes[id];
            prefix.truncate(parent_len);
            if let Some(ch) = node.character {
                prefix.push(ch);
            }
            if !node.doc_ids.is_empty() {
                out.push((prefix.clone(), node.doc_ids.clone()));
            }
            let len = prefix.len();
            stack.extend(node.children.values().rev().map(|&child| (child, len)));
        }
        out
    }

    /// Distinct document ids present anywhere in the index
    pub fn documents(&self) -> BTreeSet<DocId> {
        let mut docs = BTreeSet::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            docs.extend(node.doc_ids.iter().copied());
            stack.extend(node.children.values().copied());
        }
        docs
    }

    /// The root node
    pub fn root(&self) -> &TrieNode {
        &self.nodes[ROOT]
    }

    /// Node at `id`. Ids come from [`TrieNode::children`] of live nodes.
    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id]
    }

    /// Attach a new child under `parent` holding `doc_ids` as given.
    /// Used when rebuilding a trie from a snapshot.
    pub(crate) fn attach_child(
        &mut self,
        parent: NodeId,
        character: char,
        doc_ids: Vec<DocId>,
    ) -> NodeId {
        let id = self.alloc_child(parent, character);
        for doc_id in doc_ids {
            self.nodes[id].push_doc_id(doc_id);
        }
        id
    }

    /// Replace the root's documents. Used when rebuilding from a snapshot.
    pub(crate) fn set_root_doc_ids(&mut self, doc_ids: Vec<DocId>) {
        self.nodes[ROOT].doc_ids.clear();
        for doc_id in doc_ids {
            self.nodes[ROOT].push_doc_id(doc_id);
        }
    }

    fn find(&self, token: &str) -> Option<NodeId> {
        let mut current = ROOT;
        for ch in token.chars() {
            current = *self.nodes[current].children.get(&ch)?;
        }
        Some(current)
    }

    fn alloc_child(&mut self, parent: NodeId, character: char) -> NodeId {
        let node = TrieNode::new(character, parent);
        let id = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.nodes[parent].children.insert(character, id);
        id
    }

    /// Post-order removal over an explicit stack, so token length never
    /// bounds the call depth. A node is revisited only after its whole
    /// subtree has been pruned; its vacant children are collected first and
    /// detached afterwards, so the map is never mutated while it is walked.
    /// A chain of emptied ancestors therefore collapses up to the root.
    fn remove_below(&mut self, start: NodeId, doc_id: DocId) {
        // (node, whether its children have been handled)
        let mut stack = vec![(start, false)];
        while let Some((id, children_done)) = stack.pop() {
            if children_done {
                let vacant: Vec<NodeId> = self.nodes[id]
                    .children
                    .values()
                    .copied()
                    .filter(|&child| self.nodes[child].is_vacant())
                    .collect();
                for child in vacant {
                    self.detach(child);
                }
            } else {
                self.nodes[id].doc_ids.retain(|&d| d != doc_id);
                stack.push((id, true));
                stack.extend(self.nodes[id].children.values().map(|&child| (child, false)));
            }
        }
    }

    fn detach(&mut self, id: NodeId) {
        debug_assert_ne!(id, ROOT, "the root is never pruned");
        let node = std::mem::take(&mut self.nodes[id]);
        if let (Some(parent), Some(ch)) = (node.parent, node.character) {
            self.nodes[parent].children.remove(&ch);
        }
        self.free.push(id);
    }
}
