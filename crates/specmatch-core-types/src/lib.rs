//! Core types shared across specmatch facilities
//!
//! This crate provides foundational types used by the engine, its logging
//! facility and the CLI:
//!
//! - **Schema constants**: Canonical field keys and event names
//! - **Sensitive data**: Sensitive<T> marker for redaction in reports

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;
