//! Logging for specmatch operations.
//!
//! The library emits `tracing` events and never installs a subscriber on
//! its own. The CLI calls [`init`] when `--log` is given. Tests call
//! [`init_test_capture`] and assert on the recorded events.
//!
//! Operation brackets are written with [`log_op_start!`](crate::log_op_start),
//! [`log_op_end!`](crate::log_op_end) and [`log_op_error!`](crate::log_op_error).
//! Events name paths, kinds and counts. Leaf values are never logged.
//!
//! ```rust
//! use specmatch_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
