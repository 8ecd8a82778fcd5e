//! Digest computation for snapshots.
//!
//! A digest condenses a snapshot (or the selected part of it) into a SHA256
//! hex string, e.g. to record "last applied" state on a live object and
//! detect drift later without keeping the full desired record around.
//!
//! ## Determinism Guarantees
//!
//! - Same leaves -> same digest (leaves are hashed in path order)
//! - Hashed per leaf: quoted canonical path, kind, canonical value. The declared
//!   (original-case) name is diagnostic only and not hashed.
//! - Two selections that [`equal`](crate::compare::equal) accepts hash identically

use crate::compare::Selector;
use crate::snapshot::{Leaf, Snapshot};
use sha2::{Digest, Sha256};

/// Compute the digest of every leaf in `snapshot`.
///
/// ## Example
///
/// ```
/// use serde_json::json;
/// use specmatch_core::snapshot::{compute_snapshot_digest, flatten};
///
/// let snapshot = flatten(&json!({"spec": {"replicas": 3}})).unwrap();
/// assert_eq!(compute_snapshot_digest(&snapshot).len(), 64);
/// ```
pub fn compute_snapshot_digest(snapshot: &Snapshot) -> String {
    hash_leaves(snapshot.iter())
}

/// Compute the digest of the leaves selected by `selector`.
pub fn compute_selection_digest(snapshot: &Snapshot, selector: &Selector) -> String {
    hash_leaves(snapshot.iter().filter(|(path, _)| selector.matches(path)))
}

fn hash_leaves<'a>(leaves: impl Iterator<Item = (&'a str, &'a Leaf)>) -> String {
    let mut hasher = Sha256::new();
    for (path, leaf) in leaves {
        hasher.update(format!("{:?}", path).as_bytes());
        hasher.update(b"\t");
        hasher.update(leaf.kind.as_str().as_bytes());
        hasher.update(b"\t");
        hasher.update(leaf.value.canonical_repr().as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::flatten;
    use serde_json::json;

    #[test]
    fn test_digest_deterministic() {
        let doc = json!({"spec": {"replicas": 3, "paused": false}});
        let a = compute_snapshot_digest(&flatten(&doc).unwrap());
        let b = compute_snapshot_digest(&flatten(&doc).unwrap());
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_digest_sensitive_to_values() {
        let a = flatten(&json!({"spec": {"replicas": 3}})).unwrap();
        let b = flatten(&json!({"spec": {"replicas": 4}})).unwrap();
        assert_ne!(compute_snapshot_digest(&a), compute_snapshot_digest(&b));
    }

    #[test]
    fn test_selection_digest_ignores_unselected() {
        let selector = Selector::new(["^spec\\."]).unwrap();
        let a = flatten(&json!({"spec": {"replicas": 3}, "status": {"ready": 1}})).unwrap();
        let b = flatten(&json!({"spec": {"replicas": 3}, "status": {"ready": 0}})).unwrap();
        assert_eq!(
            compute_selection_digest(&a, &selector),
            compute_selection_digest(&b, &selector)
        );
    }

    #[test]
    fn test_separators_inside_keys_do_not_alias_other_leaves() {
        let one = flatten(&json!({"a\tstring\t\"v\"\nb": "w"})).unwrap();
        let two = flatten(&json!({"a": "v", "b": "w"})).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(two.len(), 2);
        assert_ne!(compute_snapshot_digest(&one), compute_snapshot_digest(&two));
    }

    #[test]
    fn test_empty_snapshot_digest_is_sha256_of_nothing() {
        assert_eq!(
            compute_snapshot_digest(&Snapshot::new()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
