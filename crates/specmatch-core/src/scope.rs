//! Named default pattern sets.
//!
//! The comparator hardcodes no scope; call sites pick one of these (or their
//! own list) and pass it through [`Selector::with_default`] or
//! [`Selector::new`]. Patterns match canonical (lower-cased) paths.

#![allow(clippy::result_large_err)]

use crate::compare::Selector;
use crate::errors::{ExError, SpecMatchError};

/// Role and ClusterRole: permission rules and aggregation
pub const ROLE: &[&str] = &["^rules(\\.|$)", "^aggregationrule(\\.|$)"];

/// Secret: payload, type and immutability
pub const SECRET: &[&str] = &[
    "^data(\\.|$)",
    "^type$",
    "^stringdata(\\.|$)",
    "^immutable$",
];

/// ConfigMap: text and binary payload, immutability
pub const CONFIG_MAP: &[&str] = &["^data(\\.|$)", "^binarydata(\\.|$)", "^immutable$"];

/// ServiceAccount: mounted secrets and token automount
pub const SERVICE_ACCOUNT: &[&str] = &[
    "^secrets(\\.|$)",
    "^imagepullsecrets(\\.|$)",
    "^automountserviceaccounttoken$",
];

/// Pod templates: container images only
pub const WORKLOAD_IMAGES: &[&str] = &[
    "^(spec\\.)?template\\.spec\\.(init)?containers\\.\\d+\\.image$",
];

const PRESETS: &[(&str, &[&str])] = &[
    ("role", ROLE),
    ("secret", SECRET),
    ("config_map", CONFIG_MAP),
    ("service_account", SERVICE_ACCOUNT),
    ("workload_images", WORKLOAD_IMAGES),
];

/// Names of the built-in presets.
pub fn names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(name, _)| *name)
}

/// Patterns of the preset called `name`.
///
/// Names are matched case-insensitively; `-` and `_` are interchangeable.
///
/// # Errors
///
/// `UnknownScope` when no preset has that name.
pub fn lookup(name: &str) -> Result<&'static [&'static str], ExError> {
    let wanted = name.trim().to_ascii_lowercase().replace('-', "_");
    PRESETS
        .iter()
        .find(|(preset, _)| *preset == wanted)
        .map(|(_, patterns)| *patterns)
        .ok_or_else(|| {
            ExError::from(SpecMatchError::UnknownScope {
                name: name.to_string(),
            })
            .with_op("lookup_scope")
        })
}

/// Compiled selector for the preset called `name`.
///
/// # Errors
///
/// `UnknownScope` when no preset has that name.
pub fn selector(name: &str) -> Result<Selector, ExError> {
    Selector::new(lookup(name)?)
}
