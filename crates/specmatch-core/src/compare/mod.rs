//! Selective comparator.
//!
//! Narrows two snapshots to the leaves whose canonical path matches a
//! caller-supplied [`Selector`], then checks the narrowed sets agree in
//! paths, kinds and values.
//!
//! ## Entry points
//!
//! ```
//! use serde_json::json;
//! use specmatch_core::compare::{equal, Selector};
//! use specmatch_core::snapshot::flatten;
//!
//! let desired = flatten(&json!({"spec": {"replicas": 3}, "status": {"ready": 0}})).unwrap();
//! let live = flatten(&json!({"spec": {"replicas": 3}, "status": {"ready": 3}})).unwrap();
//! let selector = Selector::new(["^spec\\."]).unwrap();
//! assert!(equal(&desired, &live, &selector));
//! ```
//!
//! ## Guarantees
//!
//! - **Symmetry**: `equal(a, b, s) == equal(b, a, s)`
//! - **Reflexivity**: `equal(a, a, s)` for every snapshot, NaN leaves included
//! - **Narrowing**: equality over a selection implies equality over any
//!   narrower selection
//! - **No hardcoded scope**: defaults are passed by the caller
//!   ([`Selector::with_default`], [`crate::scope`])

pub mod engine;
pub mod human_summary;
pub mod model;
pub mod selector;

pub use engine::{compare, equal, resource_equal, resource_equal_with, select};
pub use human_summary::{render_summary, render_summary_redacted};
pub use model::{Comparison, KindMismatch, ValueMismatch};
pub use selector::Selector;
