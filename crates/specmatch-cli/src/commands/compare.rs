//! Compare command

use crate::commands::flatten::parse_unordered;
use crate::commands::{emit, Status};
use crate::config::CliConfig;
use crate::input::{load_document, load_snapshot};
use clap::Args;
use specmatch_core::compare::{compare, render_summary, render_summary_redacted, Selector};
use specmatch_core::errors::ExError;
use specmatch_core::format_record;
use specmatch_core::snapshot::{flatten_with, FlattenOptions, Snapshot};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Desired document
    pub a: PathBuf,

    /// Observed document
    pub b: PathBuf,

    /// Path pattern (case-insensitive regex); repeatable
    #[arg(short = 'p', long = "pattern")]
    pub patterns: Vec<String>,

    /// Named pattern set from the config file or the built-in presets
    #[arg(long)]
    pub scope: Option<String>,

    /// Print a Markdown report of every disagreement
    #[arg(long, conflicts_with = "json")]
    pub report: bool,

    /// Print the full comparison as JSON
    #[arg(long)]
    pub json: bool,

    /// Hide leaf values in the report
    #[arg(long, requires = "report")]
    pub redact: bool,

    /// Inputs are snapshot files written by `specmatch flatten`
    #[arg(long)]
    pub snapshot: bool,

    /// Treat lists under paths matching RE as unordered, keyed by KEY
    #[arg(long = "unordered-path", value_name = "RE=KEY", value_parser = parse_unordered)]
    pub unordered_path: Vec<(String, String)>,
}

pub fn execute(args: CompareArgs, config: &CliConfig) -> Result<Status, ExError> {
    let mut patterns = args.patterns.clone();
    if let Some(name) = &args.scope {
        patterns.extend(config.scope_patterns(name)?);
    }
    let selector = Selector::new(&patterns)?;
    if selector.is_empty() {
        tracing::warn!("no patterns given; nothing is selected and the inputs compare equal");
    }

    let mut options = config.flatten_options()?;
    for (pattern, key) in &args.unordered_path {
        options = options.unordered_path(pattern, key.as_str())?;
    }

    let a = load(&args.a, args.snapshot, &options)?;
    let b = load(&args.b, args.snapshot, &options)?;
    let comparison = compare(&a, &b, &selector);

    if args.json {
        emit(&format_record(&comparison, true)?)?;
    } else if args.report && args.redact {
        emit(render_summary_redacted(&comparison, &selector).trim_end())?;
    } else if args.report {
        emit(render_summary(&comparison).trim_end())?;
    } else if comparison.is_equal() {
        emit("equal")?;
    } else {
        emit(&format!(
            "different ({} mismatched paths)",
            comparison.mismatch_count()
        ))?;
    }

    if comparison.is_equal() {
        Ok(Status::Success)
    } else {
        Ok(Status::Different)
    }
}

fn load(path: &Path, is_snapshot: bool, options: &FlattenOptions) -> Result<Snapshot, ExError> {
    if is_snapshot {
        load_snapshot(path)
    } else {
        flatten_with(&load_document(path)?, options)
    }
}
