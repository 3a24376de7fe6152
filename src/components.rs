//! Equivalence classes of identifiers (connected components)
//!
//! Curated input declares groups of identifiers as interchangeable. The
//! groups are merged transitively into a partition with a union-find over
//! every identifier seen.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComponentsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Counts from loading a curation file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub lines: usize,
    pub groups: usize,
    pub skipped: usize,
}

/// Disjoint-set partition of identifiers.
///
/// Union by rank with path compression on writes. Each root keeps its member
/// list so class lookups do not scan the whole forest.
#[derive(Debug, Clone, Default)]
pub struct ConnectedComponents {
    index: HashMap<String, usize>,
    ids: Vec<String>,
    parent: Vec<usize>,
    rank: Vec<u8>,
    members: HashMap<usize, Vec<usize>>,
}

impl ConnectedComponents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a curation file: one tab-separated group per line.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, LoadStats), ComponentsError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read groups from any line source.
    ///
    /// Blank lines and `#` comments are ignored. Lines that are not valid
    /// UTF-8 are skipped with a warning.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<(Self, LoadStats), ComponentsError> {
        let mut ccs = Self::new();
        let mut stats = LoadStats::default();

        for (number, raw) in reader.split(b'\n').enumerate() {
            let raw = raw?;
            stats.lines += 1;
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(_) => {
                    tracing::warn!(line = number + 1, "skipping curation line: invalid UTF-8");
                    stats.skipped += 1;
                    continue;
                }
            };
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            ccs.add(line.split('\t').map(str::trim).filter(|id| !id.is_empty()));
            stats.groups += 1;
        }

        tracing::info!(
            groups = stats.groups,
            skipped = stats.skipped,
            identifiers = ccs.len(),
            components = ccs.component_count(),
            "loaded equivalence classes"
        );
        Ok((ccs, stats))
    }

    /// Declare a group of identifiers equivalent, merging every class they touch.
    pub fn add<I, S>(&mut self, group: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut first = None;
        for id in group {
            let node = self.node(id.as_ref());
            match first {
                None => first = Some(node),
                Some(head) => self.union(head, node),
            }
        }
    }

    /// The full class of an identifier; a singleton if never seen.
    pub fn class_of(&self, id: &str) -> BTreeSet<String> {
        match self.index.get(id) {
            Some(&node) => self.members[&self.root(node)]
                .iter()
                .map(|&m| self.ids[m].clone())
                .collect(),
            None => BTreeSet::from([id.to_string()]),
        }
    }

    pub fn same_class(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        match (self.index.get(a), self.index.get(b)) {
            (Some(&x), Some(&y)) => self.root(x) == self.root(y),
            _ => false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All classes, each sorted, ordered by their smallest member.
    pub fn components(&self) -> Vec<BTreeSet<String>> {
        let mut classes: Vec<BTreeSet<String>> = self
            .members
            .values()
            .map(|ms| ms.iter().map(|&m| self.ids[m].clone()).collect())
            .collect();
        classes.sort();
        classes
    }

    /// Number of identifiers seen.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn component_count(&self) -> usize {
        self.members.len()
    }

    fn node(&mut self, id: &str) -> usize {
        if let Some(&node) = self.index.get(id) {
            return node;
        }
        let node = self.ids.len();
        self.ids.push(id.to_string());
        self.parent.push(node);
        self.rank.push(0);
        self.members.insert(node, vec![node]);
        self.index.insert(id.to_string(), node);
        node
    }

    fn root(&self, mut node: usize) -> usize {
        while self.parent[node] != node {
            node = self.parent[node];
        }
        node
    }

    fn find(&mut self, node: usize) -> usize {
        let root = self.root(node);
        let mut current = node;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        let (keep, merge) = if self.rank[ra] >= self.rank[rb] { (ra, rb) } else { (rb, ra) };
        if self.rank[keep] == self.rank[merge] {
            self.rank[keep] += 1;
        }
        self.parent[merge] = keep;
        let moved = self.members.remove(&merge).unwrap_or_default();
        self.members.entry(keep).or_default().extend(moved);
    }
}
