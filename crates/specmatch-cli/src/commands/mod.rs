//! Subcommand implementations

pub mod compare;
pub mod flatten;
pub mod fmt;

use specmatch_core::errors::{ExError, ExErrorKind};
use std::io::Write;

/// Successful command outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// A comparison ran and the selections disagree
    Different,
}

/// Write `text` to stdout followed by a newline.
pub(crate) fn emit(text: &str) -> Result<(), ExError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("write_output")
            .with_message(e.to_string())
    })
}
