//! Canonical path helpers.
//!
//! Paths are dot-separated. The declared form keeps the original case of
//! every segment; the canonical form is the declared form lower-cased.

pub const SEPARATOR: char = '.';

/// Strip serialization qualifiers (`name,omitempty`, `,inline`) from a field alias.
///
/// An alias that is only a qualifier (`,inline`) yields an empty segment,
/// which [`normalize`] later drops so the field's children land on the parent.
pub fn field_segment(alias: &str) -> &str {
    alias.split(',').next().unwrap_or_default()
}

/// Append `segment` to `prefix`.
pub fn join(prefix: &str, segment: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + segment.len() + 1);
    out.push_str(prefix);
    out.push(SEPARATOR);
    out.push_str(segment);
    out
}

/// Drop leading/trailing separators and collapse runs of separators.
pub fn normalize(raw: &str) -> String {
    raw.split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Normalized, lower-cased path used as the snapshot key.
pub fn canonical(raw: &str) -> String {
    normalize(raw).to_lowercase()
}
