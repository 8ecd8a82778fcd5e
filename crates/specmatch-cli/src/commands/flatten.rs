//! Flatten command

use crate::commands::{emit, Status};
use crate::config::CliConfig;
use crate::input::load_document;
use clap::{Args, ValueEnum};
use specmatch_core::errors::{ExError, ExErrorKind};
use specmatch_core::format_record;
use specmatch_core::snapshot::flatten_with;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct FlattenArgs {
    /// JSON or YAML document
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Treat lists under paths matching RE as unordered, keyed by KEY
    #[arg(long = "unordered-path", value_name = "RE=KEY", value_parser = parse_unordered)]
    pub unordered_path: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Split `RE=KEY` at the last `=`.
pub(crate) fn parse_unordered(s: &str) -> Result<(String, String), String> {
    match s.rsplit_once('=') {
        Some((pattern, key)) if !pattern.is_empty() && !key.is_empty() => {
            Ok((pattern.to_string(), key.to_string()))
        }
        _ => Err(format!("expected RE=KEY, got `{}`", s)),
    }
}

pub fn execute(args: FlattenArgs, config: &CliConfig) -> Result<Status, ExError> {
    let mut options = config.flatten_options()?;
    for (pattern, key) in &args.unordered_path {
        options = options.unordered_path(pattern, key.as_str())?;
    }

    let document = load_document(&args.file)?;
    let snapshot = flatten_with(&document, &options)?;
    tracing::debug!(leaves = snapshot.len(), file = %args.file.display(), "flattened document");

    let rendered = match args.format {
        OutputFormat::Json => format_record(&snapshot, true)?,
        OutputFormat::Yaml => serde_yaml::to_string(&snapshot).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("render_yaml")
                .with_message(e.to_string())
        })?,
    };
    emit(rendered.trim_end())?;
    Ok(Status::Success)
}
