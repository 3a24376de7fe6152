//! Character trie over external ids, for finding ids embedded in longer strings

use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, usize>,
    values: Vec<usize>,
}

/// Prefix trie keyed by case-folded strings.
///
/// Lookups report every stored key that occurs inside the query on token
/// boundaries, where a boundary is either end of the query or any
/// non-alphanumeric character.
#[derive(Debug)]
pub struct IdTrie<V> {
    nodes: Vec<TrieNode>,
    values: Vec<V>,
}

impl<V> Default for IdTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IdTrie<V> {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            values: Vec::new(),
        }
    }

    /// Insert a value under a key. Keys are folded to lower case.
    pub fn insert(&mut self, key: &str, value: V) {
        let mut current = 0;
        for ch in key.trim().to_lowercase().chars() {
            current = match self.nodes[current].children.get(&ch) {
                Some(&next) => next,
                None => {
                    self.nodes.push(TrieNode::default());
                    let next = self.nodes.len() - 1;
                    self.nodes[current].children.insert(ch, next);
                    next
                }
            };
        }
        if current == 0 {
            return;
        }
        self.values.push(value);
        let index = self.values.len() - 1;
        self.nodes[current].values.push(index);
    }

    /// Values whose key occurs in `text` on token boundaries and is at
    /// least `min_len` characters long, in order of occurrence.
    pub fn find_embedded(&self, text: &str, min_len: usize) -> Vec<&V> {
        let chars: Vec<char> = text.to_lowercase().chars().collect();
        let is_boundary = |i: usize| i == chars.len() || !chars[i].is_alphanumeric();
        let mut found = Vec::new();

        for start in 0..chars.len() {
            if start > 0 && chars[start - 1].is_alphanumeric() {
                continue;
            }
            let mut current = 0;
            for (offset, ch) in chars[start..].iter().enumerate() {
                match self.nodes[current].children.get(ch) {
                    Some(&next) => current = next,
                    None => break,
                }
                let end = start + offset + 1;
                if offset + 1 >= min_len && is_boundary(end) {
                    found.extend(self.nodes[current].values.iter().map(|&i| &self.values[i]));
                }
            }
        }

        found
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
