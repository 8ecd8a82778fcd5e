//! specmatch core - structural snapshots and selective equality
//!
//! This crate provides:
//! - A flattener that turns any `serde::Serialize` record into a snapshot of
//!   canonical dotted path -> typed leaf
//! - A selective comparator deciding whether two snapshots agree over the
//!   paths matched by a set of regular expressions
//! - A non-short-circuiting comparison report with a Markdown renderer
//! - Named scope presets, JSON debug formatting and snapshot digests
//!
//! Used by reconcilers to answer "is the live object already correct?" before
//! issuing an update.

pub mod compare;
pub mod errors;
pub mod format;
pub mod logging_facility;
pub mod scope;
pub mod snapshot;

pub use specmatch_core_types::schema;

// Re-export commonly used types
pub use compare::{compare, equal, render_summary, resource_equal, Comparison, Selector};
pub use errors::{ExError, ExErrorKind, Result, SpecMatchError};
pub use format::format_record;
pub use snapshot::{flatten, flatten_with, FlattenOptions, Kind, Leaf, LeafValue, Snapshot};
