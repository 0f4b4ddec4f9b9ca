//! Logging infrastructure.
//!
//! vlookup uses `tracing` for structured logging. All events use target
//! "vlookup" and carry `component` and `event` fields for filtering.
//!
//! The library never installs a global subscriber; the `vlookup` binary sets
//! up `tracing_subscriber` on stderr.

/// Target for all vlookup log events.
pub(crate) const VLOOKUP_TARGET: &str = "vlookup";

/// Macro for info-level log events.
///
/// # Example
/// ```ignore
/// log_info!(
///     component = "pipeline",
///     event = "merge_finished",
///     rows = stats.left_rows,
/// );
/// ```
macro_rules! log_info {
    ($($field:tt)*) => {
        ::tracing::info!(target: $crate::observability::VLOOKUP_TARGET, $($field)*)
    };
}

/// Macro for debug-level log events.
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::VLOOKUP_TARGET, $($field)*)
    };
}

/// Macro for warn-level log events.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::VLOOKUP_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_info;
pub(crate) use log_warn;
