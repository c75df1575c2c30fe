//! # hierlog - hierarchical file logging from a declarative description
//!
//! Describe a log file once (destination, rotation, which identity fields
//! lead each line, per-logger levels) and get a [`LogConfig`] that can be
//! inspected, serialized, or installed as the `tracing` subscriber.
//!
//! Every line has the shape
//! `[process|][thread|]<level-letter>|<name, 9 chars>|<message>`:
//!
//! ```text
//! W|a________|disk almost full
//! I|db.pool__|connection opened
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use hierlog::prelude::*;
//!
//! fn main() -> Result<()> {
//!     ConfigBuilder::new("/var/log/app.log")
//!         .rotate(true)
//!         .add("db", Level::Info)
//!         .add("db.pool", Level::Debug)
//!         .init()?;
//!
//!     warn!(target: "db", "replica lagging");
//!     Ok(())
//! }
//! ```
//!
//! Logger names are `tracing` targets; module paths (`app::db`) are read as
//! dotted names (`app.db`). A record is written when its level reaches the
//! level of the nearest configured ancestor, or the root level (`WARNING`
//! by default) when there is none.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod core;
mod format;
mod layer;
mod macros;
mod writer;

// Public API
pub use builder::{
    ConfigBuilder, DEFAULT_OVERRIDE_LEVEL, HandlerLayer, LogSubscriber, LoggerBuilder,
    LoggerGuard,
};
pub use config::{
    CONFIG_VERSION, CRITICAL_FIELD, DEFAULT_BACKUP_COUNT, DEFAULT_FORMATTER, DEFAULT_HANDLER,
    DEFAULT_ROLLING, ENV_PREFIX, FormatterConfig, HandlerConfig, Level, LogConfig, LoggerConfig,
    RootConfig, Rolling,
};
pub use crate::core::{LogError, LogResult};
pub use format::{
    DEFAULT_NAME_WIDTH, DELIMITER, FILLER, Field, FieldComposer, LineTemplate, MAX_NAME_WIDTH,
    NameFormatter, TRUNCATION_MARKER_LEN, format_name, logger_name,
};
pub use layer::{LevelTree, LineFormat, process_name};
pub use writer::make_writer;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ConfigBuilder, Level, LogConfig, LogError, LoggerBuilder, critical, debug, error, info,
        trace, warn,
    };

    /// Result type for logging configuration operations
    pub type Result<T> = crate::LogResult<T>;
}

// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}

/// Install `config` as the global default subscriber
///
/// # Errors
///
/// See [`LoggerBuilder::init`].
pub fn init_with(config: LogConfig) -> LogResult<()> {
    LoggerBuilder::from_config(config).init()
}
