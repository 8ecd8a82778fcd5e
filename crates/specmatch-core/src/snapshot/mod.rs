//! Flattened record snapshots.
//!
//! A [`Snapshot`] maps every canonical leaf path of a record to its
//! [`Leaf`]. Internal nodes (records, lists, maps) are never stored.
//!
//! ## Responsibilities
//!
//! - Introspect arbitrary `Serialize` values (`tree`)
//! - Canonical path addressing (`path`)
//! - Depth-first flattening with order-insensitive list normalization (`flatten`)
//! - Deterministic snapshot digests (`digest`)

pub mod digest;
pub mod flatten;
pub mod leaf;
pub mod path;
pub(crate) mod tree;

pub use digest::{compute_selection_digest, compute_snapshot_digest};
pub use flatten::{flatten, flatten_with, FlattenOptions, ListSelector, UnorderedList};
pub use leaf::{Kind, Leaf, LeafValue};

use crate::errors::{Result, SpecMatchError};
use serde::Serialize;
use std::collections::BTreeMap;

/// Path -> leaf mapping for one record.
///
/// Keys are unique canonical paths; iteration is ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    leaves: BTreeMap<String, Leaf>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&Leaf> {
        self.leaves.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.leaves.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Leaf)> {
        self.leaves.iter().map(|(path, leaf)| (path.as_str(), leaf))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.leaves.keys().map(String::as_str)
    }

    /// Insert a leaf under its canonical path.
    ///
    /// Leaves whose declared names differ only in case (`App`/`app`), or whose
    /// names join to the same dotted text (key `a.b` next to `a: {b}`), share
    /// one path. The smaller declared name wins; on a tie the leaf already
    /// stored stays.
    pub(crate) fn insert(&mut self, path: String, leaf: Leaf) {
        match self.leaves.get(&path) {
            Some(existing) => {
                tracing::warn!(
                    path = %path,
                    kept = %existing.name.as_str().min(leaf.name.as_str()),
                    dropped = %existing.name.as_str().max(leaf.name.as_str()),
                    "leaves collapse onto one canonical path"
                );
                if leaf.name < existing.name {
                    self.leaves.insert(path, leaf);
                }
            }
            None => {
                self.leaves.insert(path, leaf);
            }
        }
    }

    /// Load a snapshot fixture (`{"<path>": {"name", "value", "kind"}}`).
    ///
    /// Paths are re-canonicalized so hand-written fixtures may use any case.
    ///
    /// # Errors
    ///
    /// `Serialization` for malformed JSON, `InvalidSnapshot` when a value
    /// disagrees with its kind or two keys collapse onto one path.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: BTreeMap<String, Leaf> = serde_json::from_str(text).map_err(|e| {
            if e.is_data() {
                SpecMatchError::InvalidSnapshot {
                    path: String::new(),
                    reason: e.to_string(),
                }
            } else {
                SpecMatchError::from(e)
            }
        })?;
        let mut snapshot = Snapshot::new();
        for (key, leaf) in raw {
            let canonical = path::canonical(&key);
            if snapshot.contains(&canonical) {
                return Err(SpecMatchError::InvalidSnapshot {
                    path: canonical,
                    reason: format!("key `{}` collapses onto an earlier key", key),
                });
            }
            snapshot.insert(canonical, leaf);
        }
        Ok(snapshot)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (&'a String, &'a Leaf);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Leaf>;

    fn into_iter(self) -> Self::IntoIter {
        self.leaves.iter()
    }
}
