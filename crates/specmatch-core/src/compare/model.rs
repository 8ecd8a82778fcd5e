//! Comparison report types.
//!
//! Collections are ordered by canonical path for deterministic output.

use crate::snapshot::{Kind, LeafValue};
use serde::Serialize;

/// Full account of a selective comparison between snapshot A and snapshot B.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Comparison {
    /// Patterns the selection was made with
    pub patterns: Vec<String>,
    /// Number of leaves selected from A
    pub selected_a: usize,
    /// Number of leaves selected from B
    pub selected_b: usize,
    /// Selected paths present in A only
    pub only_in_a: Vec<String>,
    /// Selected paths present in B only
    pub only_in_b: Vec<String>,
    /// Paths present on both sides with different kinds
    pub kind_mismatches: Vec<KindMismatch>,
    /// Paths present on both sides with the same kind and different values
    pub value_mismatches: Vec<ValueMismatch>,
}

impl Comparison {
    /// The selections agree in key set, kinds and values.
    pub fn is_equal(&self) -> bool {
        self.mismatch_count() == 0
    }

    pub fn mismatch_count(&self) -> usize {
        self.only_in_a.len()
            + self.only_in_b.len()
            + self.kind_mismatches.len()
            + self.value_mismatches.len()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KindMismatch {
    pub path: String,
    pub name: String,
    pub kind_a: Kind,
    pub kind_b: Kind,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValueMismatch {
    pub path: String,
    pub name: String,
    pub kind: Kind,
    pub a: LeafValue,
    pub b: LeafValue,
}
