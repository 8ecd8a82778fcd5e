//! Depth-first flattening of a record into a [`Snapshot`].

#![allow(clippy::result_large_err)]

use crate::errors::{ExError, ExErrorKind, Result};
use crate::snapshot::leaf::{Kind, Leaf, LeafValue};
use crate::snapshot::path;
use crate::snapshot::tree::{self, Node};
use crate::snapshot::Snapshot;
use crate::{log_op_end, log_op_error, log_op_start};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::cmp::Ordering;
use std::time::Instant;

/// Element type registered as order-insensitive by default.
pub const ENV_VAR_TYPE: &str = "EnvVar";
/// Identity field of [`ENV_VAR_TYPE`] elements.
pub const ENV_VAR_KEY: &str = "name";

/// Which lists a rule applies to.
#[derive(Debug, Clone)]
pub enum ListSelector {
    /// Every element is a record of this static type name
    TypeName(String),
    /// The list's canonical path matches (case-insensitive)
    Path(Regex),
}

/// A list whose element identity is independent of position.
///
/// Matching lists are stably sorted by the scalar stored under `key` before
/// their elements are indexed.
#[derive(Debug, Clone)]
pub struct UnorderedList {
    pub selector: ListSelector,
    pub key: String,
}

impl UnorderedList {
    fn applies_to(&self, items: &[Node], canonical_path: &str) -> bool {
        match &self.selector {
            ListSelector::TypeName(name) => {
                !items.is_empty()
                    && items
                        .iter()
                        .all(|item| item.type_name() == Some(name.as_str()))
            }
            ListSelector::Path(re) => re.is_match(canonical_path),
        }
    }
}

/// Flattener configuration.
///
/// The default registers `EnvVar` lists (keyed by `name`) as the only
/// order-insensitive lists; every other list keeps its source order.
#[derive(Debug, Clone)]
pub struct FlattenOptions {
    unordered: Vec<UnorderedList>,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self::empty().unordered_type(ENV_VAR_TYPE, ENV_VAR_KEY)
    }
}

impl FlattenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with no order-insensitive lists at all.
    pub fn empty() -> Self {
        Self {
            unordered: Vec::new(),
        }
    }

    /// Sort lists of `type_name` records by their `key` field.
    pub fn unordered_type(mut self, type_name: impl Into<String>, key: impl Into<String>) -> Self {
        self.unordered.push(UnorderedList {
            selector: ListSelector::TypeName(type_name.into()),
            key: key.into(),
        });
        self
    }

    /// Sort lists whose canonical path matches `pattern` by their `key` field.
    ///
    /// Useful for untyped documents (`serde_json::Value`) that carry no type names.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` if `pattern` is not a valid regular expression.
    pub fn unordered_path(
        mut self,
        pattern: &str,
        key: impl Into<String>,
    ) -> std::result::Result<Self, ExError> {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                ExError::new(ExErrorKind::InvalidPattern)
                    .with_op("unordered_path")
                    .with_pattern(pattern)
                    .with_message(e.to_string())
            })?;
        self.unordered.push(UnorderedList {
            selector: ListSelector::Path(re),
            key: key.into(),
        });
        Ok(self)
    }

    pub fn unordered_lists(&self) -> &[UnorderedList] {
        &self.unordered
    }

    fn rule_for(&self, items: &[Node], canonical_path: &str) -> Option<&UnorderedList> {
        self.unordered
            .iter()
            .find(|rule| rule.applies_to(items, canonical_path))
    }
}

/// Flatten `record` with the default options.
///
/// # Errors
///
/// `Serialization` when the record's `Serialize` impl failed.
pub fn flatten<T: Serialize + ?Sized>(record: &T) -> std::result::Result<Snapshot, ExError> {
    flatten_with(record, &FlattenOptions::default())
}

/// Flatten `record` into a path -> leaf snapshot.
///
/// `None` fields and unit values contribute nothing; map entries whose key
/// has no text form are excluded. Leaves that collapse onto one canonical
/// path keep the smaller declared name. No partial snapshot is returned on
/// error.
///
/// # Errors
///
/// `Serialization` when the record's `Serialize` impl failed.
pub fn flatten_with<T: Serialize + ?Sized>(
    record: &T,
    options: &FlattenOptions,
) -> std::result::Result<Snapshot, ExError> {
    let start = Instant::now();
    log_op_start!("flatten");

    match build_snapshot(record, options) {
        Ok(snapshot) => {
            log_op_end!(
                "flatten",
                duration_ms = start.elapsed().as_millis() as u64,
                leaf_count = snapshot.len()
            );
            Ok(snapshot)
        }
        Err(err) => {
            log_op_error!(
                "flatten",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(ExError::from(err).with_op("flatten"))
        }
    }
}

fn build_snapshot<T: Serialize + ?Sized>(
    record: &T,
    options: &FlattenOptions,
) -> Result<Snapshot> {
    let tree = tree::to_tree(record)?;
    let mut walker = Walker {
        options,
        snapshot: Snapshot::new(),
    };
    walker.walk(tree, "")?;
    Ok(walker.snapshot)
}

struct Walker<'a> {
    options: &'a FlattenOptions,
    snapshot: Snapshot,
}

impl Walker<'_> {
    fn walk(&mut self, node: Node, declared: &str) -> Result<()> {
        match node {
            Node::Absent => Ok(()),
            Node::Leaf(value, kind) => self.emit(declared, value, kind),
            Node::Record { fields, .. } => {
                for (name, child) in fields {
                    self.walk(child, &path::join(declared, path::field_segment(&name)))?;
                }
                Ok(())
            }
            Node::Map(entries) => {
                for (key, child) in entries {
                    match key {
                        Some(key) => self.walk(child, &path::join(declared, &key))?,
                        None => tracing::trace!(
                            path = %path::normalize(declared),
                            "skipping map entry without a scalar key"
                        ),
                    }
                }
                Ok(())
            }
            Node::List(items) => {
                let items = self.normalize_order(items, declared);
                for (index, item) in items.into_iter().enumerate() {
                    self.walk(item, &path::join(declared, &index.to_string()))?;
                }
                Ok(())
            }
        }
    }

    fn emit(&mut self, declared: &str, value: LeafValue, kind: Kind) -> Result<()> {
        let name = path::normalize(declared);
        if name.is_empty() {
            tracing::trace!("skipping scalar without a path");
            return Ok(());
        }
        let canonical = name.to_lowercase();
        self.snapshot.insert(canonical, Leaf::new(name, value, kind));
        Ok(())
    }

    fn normalize_order(&self, mut items: Vec<Node>, declared: &str) -> Vec<Node> {
        let canonical = path::canonical(declared);
        if let Some(rule) = self.options.rule_for(&items, &canonical) {
            tracing::trace!(path = %canonical, key = %rule.key, "sorting order-insensitive list");
            items.sort_by(|a, b| {
                compare_identity(a.field_value(&rule.key), b.field_value(&rule.key))
            });
        }
        items
    }
}

/// Elements without an identity value sort first, in source order.
fn compare_identity(a: Option<&LeafValue>, b: Option<&LeafValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.sort_cmp(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
