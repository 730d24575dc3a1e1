// --- File: src/core/trie.rs
use crate::core::types::{CodePoint, PhraseMatch, Reading};
use crate::error::{PinyinError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Index of a node inside the trie arena. The root is always 0.
pub type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Clone, Default, Serialize, Deserialize)]
struct TrieNode {
    children: HashMap<CodePoint, NodeId>,
    /// Candidate readings when this node ends a single-character key.
    candidates: Option<Vec<Reading>>,
    /// Pinned readings when this node ends a phrase key.
    phrase: Option<Vec<Reading>>,
}

impl TrieNode {
    fn new() -> Self {
        Self::default()
    }
}

/// A code point keyed trie holding single-character candidates and phrase overrides.
///
/// Nodes live in one arena and refer to each other by index, so the whole
/// structure is plain data: it can be shared across threads once built and
/// serialized as a snapshot.
#[derive(Clone, Serialize, Deserialize)]
pub struct PinyinTrie {
    nodes: Vec<TrieNode>,
    single_count: usize,
    phrase_count: usize,
}

impl Default for PinyinTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PinyinTrie {
    pub fn new() -> Self {
        Self { nodes: vec![TrieNode::new()], single_count: 0, phrase_count: 0 }
    }

    fn child(&self, node_idx: NodeId, cp: CodePoint) -> Option<NodeId> {
        self.nodes[node_idx].children.get(&cp).copied()
    }

    fn child_or_insert(&mut self, node_idx: NodeId, cp: CodePoint) -> NodeId {
        if let Some(id) = self.child(node_idx, cp) {
            return id;
        }
        let new_node_id = self.nodes.len();
        self.nodes.push(TrieNode::new());
        self.nodes[node_idx].children.insert(cp, new_node_id);
        new_node_id
    }

    /// Stores the candidate list for one code point. Last write wins.
    pub fn insert_single(&mut self, cp: CodePoint, readings: Vec<Reading>) {
        if readings.is_empty() {
            return;
        }
        let node_idx = self.child_or_insert(ROOT, cp);
        if self.nodes[node_idx].candidates.replace(readings).is_none() {
            self.single_count += 1;
        }
    }

    /// Stores a phrase override keyed by the full code point sequence.
    /// O(k) where k is the phrase length.
    pub fn insert_phrase(&mut self, key: &[CodePoint], readings: Vec<Reading>) -> Result<()> {
        if key.len() < 2 {
            return Err(PinyinError::PhraseTooShort(key.len()));
        }
        if key.len() != readings.len() {
            return Err(PinyinError::LengthMismatch {
                code_points: key.len(),
                readings: readings.len(),
            });
        }

        let mut node_idx = ROOT;
        for &cp in key {
            node_idx = self.child_or_insert(node_idx, cp);
        }
        if self.nodes[node_idx].phrase.replace(readings).is_none() {
            self.phrase_count += 1;
        }
        Ok(())
    }

    /// Candidate readings for one code point, most common first. Empty on a miss.
    pub fn lookup_single(&self, cp: CodePoint) -> &[Reading] {
        self.child(ROOT, cp)
            .and_then(|idx| self.nodes[idx].candidates.as_deref())
            .unwrap_or(&[])
    }

    /// Longest phrase override starting at `start`.
    ///
    /// Walks edge by edge while input remains and a child exists, remembering
    /// the deepest node that ends a phrase. There is no backtracking: once the
    /// walk stops, the deepest terminal seen is the answer. `None` means the
    /// caller should fall back to a single-character lookup.
    pub fn lookup_longest_phrase(&self, seq: &[CodePoint], start: usize) -> Option<PhraseMatch> {
        let mut node_idx = ROOT;
        let mut best: Option<(usize, NodeId)> = None;

        for (depth, &cp) in seq.get(start..)?.iter().enumerate() {
            match self.child(node_idx, cp) {
                Some(next_idx) => node_idx = next_idx,
                None => break,
            }
            if depth >= 1 && self.nodes[node_idx].phrase.is_some() {
                best = Some((depth + 1, node_idx));
            }
        }

        best.and_then(|(length, idx)| {
            self.nodes[idx]
                .phrase
                .clone()
                .map(|readings| PhraseMatch { length, readings })
        })
    }

    /// Checks that a root exists and every edge points inside the arena.
    /// Tries built through the insert methods always pass; a deserialized
    /// one may not.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(PinyinError::Snapshot("trie has no root node".to_string()));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            for (&cp, &child) in &node.children {
                if child == ROOT || child >= self.nodes.len() {
                    return Err(PinyinError::Snapshot(format!(
                        "node {} edge {:#x} points to {} of {} nodes",
                        idx,
                        cp,
                        child,
                        self.nodes.len()
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn single_count(&self) -> usize {
        self.single_count
    }

    pub fn phrase_count(&self) -> usize {
        self.phrase_count
    }

    pub fn is_empty(&self) -> bool {
        self.single_count == 0 && self.phrase_count == 0
    }
}
