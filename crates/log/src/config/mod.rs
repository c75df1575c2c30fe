//! Configuration types
//!
//! - `base`: the exported configuration object (`LogConfig`) and its records
//! - `level`: logger levels and their mapping onto `tracing` metadata
//! - `presets`: builders assembled from environment variables

mod base;
mod level;
mod presets;

pub use base::{
    CONFIG_VERSION, DEFAULT_FORMATTER, DEFAULT_HANDLER, FormatterConfig, HandlerConfig, LogConfig,
    LoggerConfig, RootConfig, Rolling,
};
pub use level::{CRITICAL_FIELD, Level, letter_of, severity_of};
#[cfg(test)]
pub(crate) use level::TRACE_SEVERITY;
pub use presets::ENV_PREFIX;

/// Rollover schedule of the rotating handler emitted by the builder
pub const DEFAULT_ROLLING: Rolling = Rolling::Daily;

/// Rolled files kept by the rotating handler emitted by the builder
pub const DEFAULT_BACKUP_COUNT: usize = 7;
