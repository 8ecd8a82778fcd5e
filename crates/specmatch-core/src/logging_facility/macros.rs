//! Event macros for operation brackets.
//!
//! `flatten`, `compare` and `resource_equal` emit a `start` event on entry
//! and then one `end` or `end_error` event. Each event carries `component`
//! (the calling module), `op` and `event`. Extra fields are appended as
//! written, using the `tracing` field syntax.

/// Emit the `start` event for `op`.
///
/// ```
/// # use specmatch_core::log_op_start;
/// log_op_start!("flatten");
/// log_op_start!("resource_equal", pattern_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Emit the `end` event for `op`. `duration_ms` is required.
///
/// ```
/// # use specmatch_core::log_op_end;
/// log_op_end!("compare", duration_ms = 1, equal = false);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Emit the `end_error` event for `op` at error level.
///
/// `$err` is converted into [`ExError`](crate::errors::ExError) and logged
/// by kind and stable code only. Its message is not logged because it may
/// quote record content.
///
/// ```
/// # use specmatch_core::{log_op_error, errors::SpecMatchError};
/// let err = SpecMatchError::UnknownScope { name: "pods".to_string() };
/// log_op_error!("lookup_scope", err, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let failure = $crate::errors::ExError::from($err);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?failure.kind(),
            err_code = failure.code(),
            $($($field)*)?
        );
    }};
}
