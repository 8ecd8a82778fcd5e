//! Format command

use crate::commands::{emit, Status};
use crate::input::load_document;
use clap::Args;
use specmatch_core::errors::ExError;
use specmatch_core::format_record;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct FmtArgs {
    /// JSON or YAML document
    pub file: PathBuf,

    /// Single-line output
    #[arg(long)]
    pub compact: bool,
}

pub fn execute(args: FmtArgs) -> Result<Status, ExError> {
    let document = load_document(&args.file)?;
    emit(&format_record(&document, !args.compact)?)?;
    Ok(Status::Success)
}
