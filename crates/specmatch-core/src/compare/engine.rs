//! Selective equality over flattened snapshots.
//!
//! [`equal`] is the reconciliation decision ("is the live object already
//! correct?"); [`compare`] walks the same selection without short-circuiting
//! and reports every disagreement.

#![allow(clippy::result_large_err)]

use crate::compare::model::{Comparison, KindMismatch, ValueMismatch};
use crate::compare::selector::Selector;
use crate::errors::ExError;
use crate::snapshot::{flatten_with, FlattenOptions, Leaf, Snapshot};
use crate::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

type Selection<'a> = BTreeMap<&'a str, &'a Leaf>;

/// Leaves of `snapshot` whose path matches at least one pattern.
pub fn select<'a>(snapshot: &'a Snapshot, selector: &Selector) -> Selection<'a> {
    snapshot
        .iter()
        .filter(|(path, _)| selector.matches(path))
        .collect()
}

/// Selective equality of two snapshots.
///
/// True iff the selected subsets have the same paths, and every path has the
/// same kind and an equal value on both sides. An empty selector selects
/// nothing on either side, so the result is vacuously true.
pub fn equal(a: &Snapshot, b: &Snapshot, selector: &Selector) -> bool {
    let selected_a = select(a, selector);
    let selected_b = select(b, selector);

    if selected_a.len() != selected_b.len() {
        tracing::debug!(
            selected_a = selected_a.len(),
            selected_b = selected_b.len(),
            "selection sizes differ"
        );
        return false;
    }

    for (path, leaf_a) in &selected_a {
        let Some(leaf_b) = selected_b.get(path) else {
            tracing::debug!(path = %path, "selected path missing from B");
            return false;
        };
        if leaf_a.kind != leaf_b.kind {
            tracing::debug!(path = %path, kind_a = %leaf_a.kind, kind_b = %leaf_b.kind, "kind mismatch");
            return false;
        }
        if leaf_a.value != leaf_b.value {
            tracing::debug!(path = %path, "value mismatch");
            return false;
        }
    }
    true
}

/// Selective comparison reporting every disagreement.
///
/// `compare(a, b, s).is_equal() == equal(a, b, s)` for all inputs.
pub fn compare(a: &Snapshot, b: &Snapshot, selector: &Selector) -> Comparison {
    let start = Instant::now();
    log_op_start!("compare", pattern_count = selector.patterns().len());

    let selected_a = select(a, selector);
    let selected_b = select(b, selector);

    let mut comparison = Comparison {
        patterns: selector.patterns().to_vec(),
        selected_a: selected_a.len(),
        selected_b: selected_b.len(),
        only_in_a: Vec::new(),
        only_in_b: Vec::new(),
        kind_mismatches: Vec::new(),
        value_mismatches: Vec::new(),
    };

    for (path, leaf_a) in &selected_a {
        match selected_b.get(path) {
            None => comparison.only_in_a.push(path.to_string()),
            Some(leaf_b) if leaf_a.kind != leaf_b.kind => {
                comparison.kind_mismatches.push(KindMismatch {
                    path: path.to_string(),
                    name: leaf_a.name.clone(),
                    kind_a: leaf_a.kind,
                    kind_b: leaf_b.kind,
                })
            }
            Some(leaf_b) if leaf_a.value != leaf_b.value => {
                comparison.value_mismatches.push(ValueMismatch {
                    path: path.to_string(),
                    name: leaf_a.name.clone(),
                    kind: leaf_a.kind,
                    a: leaf_a.value.clone(),
                    b: leaf_b.value.clone(),
                })
            }
            Some(_) => {}
        }
    }

    comparison.only_in_b = selected_b
        .keys()
        .filter(|path| !selected_a.contains_key(*path))
        .map(|path| path.to_string())
        .collect();

    log_op_end!(
        "compare",
        duration_ms = start.elapsed().as_millis() as u64,
        selected_a = comparison.selected_a,
        selected_b = comparison.selected_b,
        mismatch_count = comparison.mismatch_count()
    );
    comparison
}

/// Flatten both records and compare them over `patterns`.
///
/// Patterns are compiled before anything is flattened, so a malformed
/// pattern fails fast.
///
/// # Errors
///
/// - `InvalidPattern`: a pattern is not a valid regular expression
/// - `Serialization`: serializing either record failed
pub fn resource_equal<A, B, S>(a: &A, b: &B, patterns: &[S]) -> Result<bool, ExError>
where
    A: Serialize + ?Sized,
    B: Serialize + ?Sized,
    S: AsRef<str>,
{
    let selector = Selector::new(patterns)?;
    resource_equal_with(a, b, &selector, &FlattenOptions::default())
}

/// [`resource_equal`] with a precompiled selector and explicit flatten options.
///
/// # Errors
///
/// - `Serialization`: serializing either record failed
pub fn resource_equal_with<A, B>(
    a: &A,
    b: &B,
    selector: &Selector,
    options: &FlattenOptions,
) -> Result<bool, ExError>
where
    A: Serialize + ?Sized,
    B: Serialize + ?Sized,
{
    let start = Instant::now();
    log_op_start!("resource_equal", pattern_count = selector.patterns().len());

    let result = flatten_with(a, options)
        .and_then(|flat_a| flatten_with(b, options).map(|flat_b| (flat_a, flat_b)))
        .map(|(flat_a, flat_b)| equal(&flat_a, &flat_b, selector));

    match result {
        Ok(is_equal) => {
            log_op_end!(
                "resource_equal",
                duration_ms = start.elapsed().as_millis() as u64,
                equal = is_equal
            );
            Ok(is_equal)
        }
        Err(err) => {
            log_op_error!(
                "resource_equal",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}
