//! # Sparse Merkle Map
//!
//! Fixed-height authenticated map from small integer keys to field elements.
//!
//! Absent keys hash to a dedicated empty-leaf value, so a key that was never
//! set is distinguishable from a key explicitly set to zero. The root commits
//! to both presence and value of every slot.

use crate::errors::ZkpError;
use crate::field::FieldElement;
use crate::hashing::{keccak_parts, HashOutput};
use std::collections::BTreeMap;

/// Largest supported tree height.
pub const MAX_HEIGHT: u8 = 63;

/// Default tree height (256 slots).
pub const DEFAULT_HEIGHT: u8 = 8;

const LEAF_DOMAIN: &[u8] = b"ftg:smt:leaf:v1";
const EMPTY_DOMAIN: &[u8] = b"ftg:smt:empty:v1";
const NODE_DOMAIN: &[u8] = b"ftg:smt:node:v1";

/// Authenticated sparse map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseMerkleMap {
    height: u8,
    leaves: BTreeMap<u64, FieldElement>,
    empty: Vec<HashOutput>,
    root: HashOutput,
}

impl SparseMerkleMap {
    /// Create an empty map of the default height.
    #[must_use]
    pub fn new() -> Self {
        // DEFAULT_HEIGHT is always within range.
        Self::build(DEFAULT_HEIGHT)
    }

    /// Create an empty map of the given height.
    pub fn with_height(height: u8) -> Result<Self, ZkpError> {
        if height == 0 || height > MAX_HEIGHT {
            return Err(ZkpError::InvalidHeight {
                height,
                max: MAX_HEIGHT,
            });
        }
        Ok(Self::build(height))
    }

    /// Build a map from `(key, value)` pairs.
    pub fn from_entries<I>(height: u8, entries: I) -> Result<Self, ZkpError>
    where
        I: IntoIterator<Item = (u64, FieldElement)>,
    {
        let mut map = Self::with_height(height)?;
        for (key, value) in entries {
            map.check_key(key)?;
            map.leaves.insert(key, value);
        }
        map.root = map.subtree_root(map.height, 0);
        Ok(map)
    }

    fn build(height: u8) -> Self {
        let mut empty = Vec::with_capacity(usize::from(height) + 1);
        empty.push(keccak_parts(EMPTY_DOMAIN, &[]));
        for level in 0..usize::from(height) {
            let child = empty[level];
            empty.push(hash_node(&child, &child));
        }
        let root = empty[usize::from(height)];
        Self {
            height,
            leaves: BTreeMap::new(),
            empty,
            root,
        }
    }

    /// Tree height.
    #[must_use]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Current root commitment.
    #[must_use]
    pub fn root(&self) -> HashOutput {
        self.root
    }

    /// Number of present entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// True when no key is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Look up a key. Absent keys return `None`.
    #[must_use]
    pub fn get(&self, key: u64) -> Option<FieldElement> {
        self.leaves.get(&key).copied()
    }

    /// Insert or replace a value and recompute the root.
    pub fn set(&mut self, key: u64, value: FieldElement) -> Result<Option<FieldElement>, ZkpError> {
        self.check_key(key)?;
        let previous = self.leaves.insert(key, value);
        self.root = self.subtree_root(self.height, 0);
        Ok(previous)
    }

    /// Remove a key and recompute the root.
    pub fn remove(&mut self, key: u64) -> Result<Option<FieldElement>, ZkpError> {
        self.check_key(key)?;
        let previous = self.leaves.remove(&key);
        if previous.is_some() {
            self.root = self.subtree_root(self.height, 0);
        }
        Ok(previous)
    }

    /// Iterate over present entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, FieldElement)> + '_ {
        self.leaves.iter().map(|(k, v)| (*k, *v))
    }

    /// Produce an inclusion (or exclusion) witness for `key`.
    pub fn open(&self, key: u64) -> Result<MapWitness, ZkpError> {
        self.check_key(key)?;
        let siblings = (0..self.height)
            .map(|level| self.subtree_root(level, (key >> level) ^ 1))
            .collect();
        Ok(MapWitness {
            key,
            value: self.get(key),
            siblings,
        })
    }

    fn check_key(&self, key: u64) -> Result<(), ZkpError> {
        if key >> self.height != 0 {
            return Err(ZkpError::KeyOutOfRange {
                key,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Root of the subtree at `level` whose keys share `prefix` (key >> level).
    fn subtree_root(&self, level: u8, prefix: u64) -> HashOutput {
        let start = prefix << level;
        let end = start + ((1u64 << level) - 1);
        let leaves: Vec<(u64, HashOutput)> = self
            .leaves
            .range(start..=end)
            .map(|(k, v)| (*k, hash_leaf(*k, *v)))
            .collect();
        self.fold(level, &leaves)
    }

    fn fold(&self, level: u8, leaves: &[(u64, HashOutput)]) -> HashOutput {
        if leaves.is_empty() {
            return self.empty[usize::from(level)];
        }
        if level == 0 {
            return leaves[0].1;
        }
        let bit = level - 1;
        let split = leaves.partition_point(|(k, _)| (k >> bit) & 1 == 0);
        let left = self.fold(bit, &leaves[..split]);
        let right = self.fold(bit, &leaves[split..]);
        hash_node(&left, &right)
    }
}

impl Default for SparseMerkleMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Authentication path for a single key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapWitness {
    /// Key the witness is for.
    pub key: u64,
    /// Value at the key, `None` for an exclusion witness.
    pub value: Option<FieldElement>,
    /// Sibling hashes from leaf level upward.
    pub siblings: Vec<HashOutput>,
}

impl MapWitness {
    /// Recompute the root implied by this witness.
    #[must_use]
    pub fn compute_root(&self) -> HashOutput {
        let mut current = match self.value {
            Some(value) => hash_leaf(self.key, value),
            None => keccak_parts(EMPTY_DOMAIN, &[]),
        };
        for (level, sibling) in self.siblings.iter().enumerate() {
            current = if (self.key >> level) & 1 == 0 {
                hash_node(&current, sibling)
            } else {
                hash_node(sibling, &current)
            };
        }
        current
    }

    /// Verify this witness against a root for a map of `height`.
    pub fn verify(&self, root: &HashOutput, height: u8) -> Result<bool, ZkpError> {
        if self.siblings.len() != usize::from(height) {
            return Err(ZkpError::MalformedWitness {
                expected: usize::from(height),
                actual: self.siblings.len(),
            });
        }
        Ok(&self.compute_root() == root)
    }
}

fn hash_leaf(key: u64, value: FieldElement) -> HashOutput {
    keccak_parts(LEAF_DOMAIN, &[&key.to_le_bytes(), &value.to_le_bytes()])
}

fn hash_node(left: &HashOutput, right: &HashOutput) -> HashOutput {
    keccak_parts(NODE_DOMAIN, &[left, right])
}
