//! Configuration builder
//!
//! [`ConfigBuilder`] accumulates the declarative description of a log file
//! (destination, rotation, leading fields, per-logger levels) and exports it
//! as a [`LogConfig`] snapshot.
//!
//! - `logger`: applies an exported configuration to the `tracing` runtime

mod logger;

pub use logger::{HandlerLayer, LogSubscriber, LoggerBuilder, LoggerGuard};

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::config::{
    CONFIG_VERSION, DEFAULT_BACKUP_COUNT, DEFAULT_FORMATTER, DEFAULT_HANDLER, DEFAULT_ROLLING,
    FormatterConfig, HandlerConfig, Level, LogConfig, LoggerConfig, RootConfig,
};
use crate::core::LogResult;
use crate::format::{DEFAULT_NAME_WIDTH, FieldComposer};

/// Level given to overrides added without an explicit level
pub const DEFAULT_OVERRIDE_LEVEL: Level = Level::Info;

/// Builder for a single-file logging configuration
///
/// ```
/// use hierlog::{ConfigBuilder, Level};
///
/// let config = ConfigBuilder::new("app.log")
///     .threads(true)
///     .add("db", Level::Info)
///     .add("db.pool", Level::Debug)
///     .export();
///
/// assert_eq!(config.loggers.len(), 2);
/// assert_eq!(config.root.level, Level::Warning);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    path: PathBuf,
    rotate: bool,
    fields: FieldComposer,
    root_level: Level,
    name_width: usize,
    overrides: IndexMap<String, Level>,
}

impl ConfigBuilder {
    /// Start a configuration writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rotate: false,
            fields: FieldComposer::default(),
            root_level: Level::Warning,
            name_width: DEFAULT_NAME_WIDTH,
            overrides: IndexMap::new(),
        }
    }

    /// Use a rotating file handler instead of a plain one
    pub fn rotate(mut self, rotate: bool) -> Self {
        self.rotate = rotate;
        self
    }

    /// Prefix each line with the process name
    pub fn processes(mut self, enabled: bool) -> Self {
        self.fields.process = enabled;
        self
    }

    /// Prefix each line with the thread name
    pub fn threads(mut self, enabled: bool) -> Self {
        self.fields.thread = enabled;
        self
    }

    /// Prefix each line with an RFC 3339 UTC timestamp
    pub fn timestamps(mut self, enabled: bool) -> Self {
        self.fields.time = enabled;
        self
    }

    /// Level of the root logger
    pub fn root_level(mut self, level: Level) -> Self {
        self.root_level = level;
        self
    }

    /// Width of the logger name column
    pub fn name_width(mut self, width: usize) -> Self {
        self.name_width = width;
        self
    }

    /// Set the level of logger `name` and everything below it
    ///
    /// `None` selects [`DEFAULT_OVERRIDE_LEVEL`]. Adding the same name again
    /// replaces its level but keeps its position. The empty name addresses
    /// the root logger.
    pub fn add(mut self, name: impl Into<String>, level: impl Into<Option<Level>>) -> Self {
        let name = name.into();
        let level = level.into().unwrap_or(DEFAULT_OVERRIDE_LEVEL);
        if name.is_empty() {
            self.root_level = level;
        } else {
            self.overrides.insert(name, level);
        }
        self
    }

    /// Like [`add`](Self::add), parsing `level` from a name or letter
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidLevel`](crate::LogError::InvalidLevel) when
    /// `level` is not a recognized level.
    pub fn try_add(self, name: impl Into<String>, level: &str) -> LogResult<Self> {
        let level: Level = level.parse()?;
        Ok(self.add(name, level))
    }

    /// Destination file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configured overrides in insertion order
    pub fn overrides(&self) -> impl Iterator<Item = (&str, Level)> {
        self.overrides
            .iter()
            .map(|(name, level)| (name.as_str(), *level))
    }

    /// Leading-field flags
    pub const fn fields(&self) -> FieldComposer {
        self.fields
    }

    /// Export and install as the global default subscriber
    ///
    /// # Errors
    ///
    /// See [`LoggerBuilder::init`].
    pub fn init(&self) -> LogResult<()> {
        LoggerBuilder::from_config(self.export()).init()
    }

    /// Freeze the current state into an independent configuration
    pub fn export(&self) -> LogConfig {
        let mut formatters = IndexMap::with_capacity(1);
        formatters.insert(
            DEFAULT_FORMATTER.to_string(),
            FormatterConfig {
                format: self.fields.template(),
                name_width: self.name_width,
            },
        );

        let mut handlers = IndexMap::with_capacity(1);
        handlers.insert(DEFAULT_HANDLER.to_string(), self.handler());

        let loggers: IndexMap<String, LoggerConfig> = self
            .overrides
            .iter()
            .map(|(name, level)| (name.clone(), LoggerConfig::new(*level)))
            .collect();

        tracing::debug!(
            path = %self.path.display(),
            rotate = self.rotate,
            loggers = loggers.len(),
            "exported logging configuration"
        );

        LogConfig {
            version: CONFIG_VERSION,
            formatters,
            handlers,
            loggers,
            root: RootConfig {
                level: self.root_level,
                handlers: vec![DEFAULT_HANDLER.to_string()],
            },
        }
    }

    fn handler(&self) -> HandlerConfig {
        let path = self.path.clone();
        let formatter = DEFAULT_FORMATTER.to_string();
        if self.rotate {
            HandlerConfig::RotatingFile {
                path,
                formatter,
                rolling: DEFAULT_ROLLING,
                backup_count: DEFAULT_BACKUP_COUNT,
            }
        } else {
            HandlerConfig::File { path, formatter }
        }
    }
}
