//! Debug rendering of records and snapshots as JSON text.

#![allow(clippy::result_large_err)]

use crate::errors::{ExError, SpecMatchError};
use serde::Serialize;

/// Render `record` as JSON, pretty-printed when `indent` is set.
///
/// Works for any `Serialize` value, including [`crate::snapshot::Snapshot`]
/// and [`crate::compare::Comparison`].
///
/// # Errors
///
/// `Serialization` when the record's `Serialize` impl fails or it contains a
/// map whose keys JSON cannot represent.
pub fn format_record<T: Serialize + ?Sized>(record: &T, indent: bool) -> Result<String, ExError> {
    let rendered = if indent {
        serde_json::to_string_pretty(record)
    } else {
        serde_json::to_string(record)
    };
    rendered.map_err(|e| ExError::from(SpecMatchError::from(e)).with_op("format_record"))
}
