//! Convenience macros for structured logging

/// Emit a `CRITICAL` record
///
/// Expands to [`tracing::error!`] with the [`CRITICAL_FIELD`](crate::CRITICAL_FIELD)
/// marker, which the line formatter renders as `C` and the level filter ranks
/// above `ERROR`. A plain `critical` field on `error!` has no such effect.
///
/// ```
/// hierlog::critical!("disk full");
/// hierlog::critical!(target: "storage", free_bytes = 0, "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__private::tracing::event!(target: $target, $crate::__private::tracing::Level::ERROR, hierlog.critical = true, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__private::tracing::error!(hierlog.critical = true, $($arg)+)
    };
}
