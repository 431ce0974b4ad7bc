//! Order-statistics skip list
//!
//! A probabilistically balanced ordered index over `(key, value)` string
//! pairs. Besides point search/insert/delete it answers rank queries and
//! inclusive range deletes in O(log n) expected time.
//!
//! # Design
//!
//! - Arena: nodes live in a `Vec`, links are indices. Slot 0 is the head
//!   sentinel with [`MAX_LEVEL`] links. Freed slots are recycled.
//! - Spans: every link records how many level-0 steps it skips. A link with
//!   no successor spans to the last node of the list.
//! - Rank is the sum of spans taken while descending towards a key.
//! - Levels come from coin flips (p = 0.5) on an injected `StdRng`, so a
//!   seeded list is fully deterministic.
//!
//! # Thread Safety
//!
//! None. The list is mutated only while the owning domain's lock is held.

use domainkv_core::{Result, StoreError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::{smallvec, SmallVec};

/// Maximum tower height. `2^32` comfortably exceeds any in-memory list.
pub const MAX_LEVEL: usize = 32;

/// Arena slot of the head sentinel
const HEAD: NodeId = 0;

type NodeId = usize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Link {
    next: Option<NodeId>,
    span: usize,
}

#[derive(Debug)]
struct Node {
    key: String,
    value: String,
    links: SmallVec<[Link; 4]>,
}

impl Node {
    fn vacant() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
            links: SmallVec::new(),
        }
    }
}

/// Rightmost node strictly before a key at every level, plus the level-0
/// position of each of those nodes.
struct Path {
    update: [NodeId; MAX_LEVEL],
    rank: [usize; MAX_LEVEL],
}

/// Ordered, rank-aware index over unique string keys.
pub struct SkipList {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    /// Number of levels in use, always >= 1
    level: usize,
    len: usize,
    rng: StdRng,
}

impl SkipList {
    /// Create an empty list seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an empty list with a deterministic level generator
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let head = Node {
            key: String::new(),
            value: String::new(),
            links: smallvec![Link::default(); MAX_LEVEL],
        };
        Self {
            nodes: vec![head],
            free: Vec::new(),
            level: 1,
            len: 0,
            rng,
        }
    }

    /// Number of keys in the list
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list holds no keys
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Highest populated level count (1 for an empty list)
    pub fn level(&self) -> usize {
        self.level
    }

    /// Check if a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Insert a key or overwrite its value.
    ///
    /// Returns `true` when a new node was created and `false` when an
    /// existing key had its value replaced in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        let mut path = self.descend(&key);

        if let Some(existing) = self.nodes[path.update[0]].links[0].next {
            if self.nodes[existing].key == key {
                self.nodes[existing].value = value;
                return false;
            }
        }

        let height = self.random_level();
        if height > self.level {
            for i in self.level..height {
                path.rank[i] = 0;
                path.update[i] = HEAD;
                self.nodes[HEAD].links[i] = Link {
                    next: None,
                    span: self.len,
                };
            }
            self.level = height;
        }

        let id = self.alloc(key, value, height);
        for i in 0..height {
            let pred = path.update[i];
            let pred_link = self.nodes[pred].links[i];
            let walked = path.rank[0] - path.rank[i];
            self.nodes[id].links[i] = Link {
                next: pred_link.next,
                span: pred_link.span - walked,
            };
            self.nodes[pred].links[i] = Link {
                next: Some(id),
                span: walked + 1,
            };
        }

        // Links above the new tower now jump over one more node
        for i in height..self.level {
            self.nodes[path.update[i]].links[i].span += 1;
        }

        self.len += 1;
        true
    }

    /// Look up the value stored under `key`
    pub fn search(&self, key: &str) -> Result<&str> {
        self.find(key)
            .map(|id| self.nodes[id].value.as_str())
            .ok_or_else(|| StoreError::key_not_found(key))
    }

    /// Remove `key`, returning its value
    pub fn delete(&mut self, key: &str) -> Result<String> {
        let path = self.descend(key);
        match self.nodes[path.update[0]].links[0].next {
            Some(id) if self.nodes[id].key == key => Ok(self.unlink(id, &path).value),
            _ => Err(StoreError::key_not_found(key)),
        }
    }

    /// Remove every key `k` with `min <= k <= max`.
    ///
    /// Returns the number of removed keys. An empty or inverted range
    /// removes nothing and is not an error.
    pub fn delete_range(&mut self, min: &str, max: &str) -> usize {
        if min > max {
            return 0;
        }

        // Every node on the path sorts before `min`, so it survives the
        // whole sweep and stays a valid predecessor.
        let path = self.descend(min);
        let mut removed = 0;
        let mut cursor = self.nodes[path.update[0]].links[0].next;
        while let Some(id) = cursor {
            if self.nodes[id].key.as_str() > max {
                break;
            }
            cursor = self.nodes[id].links[0].next;
            self.unlink(id, &path);
            removed += 1;
        }
        removed
    }

    /// Zero-based count of keys strictly less than `key`.
    ///
    /// Only defined for keys that are present.
    pub fn rank(&self, key: &str) -> Result<usize> {
        let mut x = HEAD;
        let mut traversed = 0;
        for i in (0..self.level).rev() {
            while let Some(next) = self.nodes[x].links[i].next {
                if self.nodes[next].key.as_str() > key {
                    break;
                }
                traversed += self.nodes[x].links[i].span;
                x = next;
            }
            if x != HEAD && self.nodes[x].key == key {
                return Ok(traversed - 1);
            }
        }
        Err(StoreError::key_not_found(key))
    }

    /// Iterate over `(key, value)` pairs in ascending key order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].links[0].next,
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn find(&self, key: &str) -> Option<NodeId> {
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(next) = self.nodes[x].links[i].next {
                if self.nodes[next].key.as_str() >= key {
                    break;
                }
                x = next;
            }
        }
        self.nodes[x].links[0]
            .next
            .filter(|&id| self.nodes[id].key == key)
    }

    fn descend(&self, key: &str) -> Path {
        let mut path = Path {
            update: [HEAD; MAX_LEVEL],
            rank: [0; MAX_LEVEL],
        };
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            path.rank[i] = if i + 1 == self.level {
                0
            } else {
                path.rank[i + 1]
            };
            while let Some(next) = self.nodes[x].links[i].next {
                if self.nodes[next].key.as_str() >= key {
                    break;
                }
                path.rank[i] += self.nodes[x].links[i].span;
                x = next;
            }
            path.update[i] = x;
        }
        path
    }

    fn unlink(&mut self, id: NodeId, path: &Path) -> Node {
        for i in 0..self.level {
            let pred = path.update[i];
            if self.nodes[pred].links[i].next == Some(id) {
                let removed = self.nodes[id].links[i];
                let link = &mut self.nodes[pred].links[i];
                link.span = link.span + removed.span - 1;
                link.next = removed.next;
            } else {
                self.nodes[pred].links[i].span -= 1;
            }
        }

        while self.level > 1 && self.nodes[HEAD].links[self.level - 1].next.is_none() {
            self.level -= 1;
        }
        self.len -= 1;

        let node = std::mem::replace(&mut self.nodes[id], Node::vacant());
        self.free.push(id);
        node
    }

    fn alloc(&mut self, key: String, value: String, height: usize) -> NodeId {
        let node = Node {
            key,
            value,
            links: smallvec![Link::default(); height],
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < MAX_LEVEL && self.rng.gen_bool(0.5) {
            level += 1;
        }
        level
    }

    /// Walk every level and check ordering, tower shape and spans.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut position = std::collections::HashMap::new();
        position.insert(HEAD, 0usize);
        let mut count = 0;
        let mut cursor = self.nodes[HEAD].links[0].next;
        let mut prev: Option<&str> = None;
        while let Some(id) = cursor {
            count += 1;
            position.insert(id, count);
            let key = self.nodes[id].key.as_str();
            if let Some(p) = prev {
                assert!(p < key, "keys out of order: {p:?} >= {key:?}");
            }
            prev = Some(key);
            cursor = self.nodes[id].links[0].next;
        }
        assert_eq!(count, self.len, "level-0 walk disagrees with len");

        for i in 0..self.level {
            let mut x = HEAD;
            loop {
                let link = self.nodes[x].links[i];
                match link.next {
                    Some(next) => {
                        assert!(self.nodes[next].links.len() > i, "tower too short");
                        assert_eq!(link.span, position[&next] - position[&x], "span at level {i}");
                        x = next;
                    }
                    None => {
                        assert_eq!(link.span, self.len - position[&x], "tail span at level {i}");
                        break;
                    }
                }
            }
        }
        if self.level > 1 {
            assert!(self.nodes[HEAD].links[self.level - 1].next.is_some());
        }
    }
}

impl Default for SkipList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SkipList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkipList")
            .field("len", &self.len)
            .field("level", &self.level)
            .finish()
    }
}

/// In-order iterator returned by [`SkipList::iter`]
pub struct Iter<'a> {
    list: &'a SkipList,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = &self.list.nodes[id];
        self.cursor = node.links[0].next;
        Some((node.key.as_str(), node.value.as_str()))
    }
}
