//! Core configuration types

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Level;
use crate::core::{LogError, LogResult};
use crate::format::{DEFAULT_NAME_WIDTH, LineTemplate, MAX_NAME_WIDTH, NameFormatter};

/// Schema version written into every exported configuration
pub const CONFIG_VERSION: u32 = 1;

/// Key of the formatter emitted by [`ConfigBuilder`](crate::ConfigBuilder)
pub const DEFAULT_FORMATTER: &str = "default";

/// Key of the handler emitted by [`ConfigBuilder`](crate::ConfigBuilder)
pub const DEFAULT_HANDLER: &str = "file";

/// Complete logging configuration
///
/// Serialized shape:
/// `{version, formatters, handlers, loggers: {name -> {level, propagate}}, root: {level, handlers}}`.
/// Maps keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Line formatters by key
    #[serde(default)]
    pub formatters: IndexMap<String, FormatterConfig>,

    /// Output sinks by key
    #[serde(default)]
    pub handlers: IndexMap<String, HandlerConfig>,

    /// Named logger nodes by dotted name
    #[serde(default)]
    pub loggers: IndexMap<String, LoggerConfig>,

    /// The root logger
    #[serde(default)]
    pub root: RootConfig,
}

/// Shape of a single emitted line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Ordered fields, e.g. `{process}|{level}|{name}|{message}`
    pub format: LineTemplate,

    /// Width of the logger name column
    #[serde(default = "default_name_width")]
    pub name_width: usize,
}

/// File sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum HandlerConfig {
    /// Append to a single file
    File {
        /// Destination file
        path: PathBuf,
        /// Key into [`LogConfig::formatters`]
        formatter: String,
    },
    /// Append to a file that rolls over on a schedule
    RotatingFile {
        /// Active file; rolled files become `<path>.1`, `<path>.2`, ...
        path: PathBuf,
        /// Key into [`LogConfig::formatters`]
        formatter: String,
        /// Rollover schedule
        #[serde(default)]
        rolling: Rolling,
        /// Number of rolled files kept on disk
        #[serde(default = "default_backup_count")]
        backup_count: usize,
    },
}

/// File rolling schedule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Rolling {
    /// Roll every minute
    Minutely,
    /// Roll hourly
    Hourly,
    /// Roll daily
    #[default]
    Daily,
}

/// A named logger node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Minimum level of records originating at or below this node
    pub level: Level,
    /// Whether records continue to ancestor nodes (and the root handler)
    #[serde(default = "default_propagate")]
    pub propagate: bool,
}

/// The root logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    /// Level applied to names without a configured ancestor
    #[serde(default)]
    pub level: Level,
    /// Keys into [`LogConfig::handlers`]
    #[serde(default)]
    pub handlers: Vec<String>,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            level: Level::Warning,
            handlers: Vec::new(),
        }
    }
}

impl LoggerConfig {
    /// Propagating node at `level`
    pub const fn new(level: Level) -> Self {
        Self {
            level,
            propagate: true,
        }
    }
}

impl FormatterConfig {
    /// Name formatter for this formatter's column width
    pub const fn name_formatter(&self) -> NameFormatter {
        NameFormatter::new(self.name_width)
    }
}

impl HandlerConfig {
    /// Destination file
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::File { path, .. } | Self::RotatingFile { path, .. } => path,
        }
    }

    /// Key of the formatter used by this handler
    pub fn formatter(&self) -> &str {
        match self {
            Self::File { formatter, .. } | Self::RotatingFile { formatter, .. } => formatter,
        }
    }

    /// Whether this handler rolls its file over
    pub const fn is_rotating(&self) -> bool {
        matches!(self, Self::RotatingFile { .. })
    }
}

impl LogConfig {
    /// Check that every reference resolves
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Config`] if the root names a missing handler, a
    /// handler names a missing formatter, a handler has an empty path, or a
    /// formatter asks for a name column wider than [`MAX_NAME_WIDTH`].
    pub fn validate(&self) -> LogResult<()> {
        for (key, formatter) in &self.formatters {
            if formatter.name_width > MAX_NAME_WIDTH {
                return Err(LogError::config(format!(
                    "formatter `{key}` name_width {} exceeds {MAX_NAME_WIDTH}",
                    formatter.name_width
                )));
            }
        }
        for key in &self.root.handlers {
            let handler = self
                .handlers
                .get(key)
                .ok_or_else(|| LogError::config(format!("root references unknown handler `{key}`")))?;
            if !self.formatters.contains_key(handler.formatter()) {
                return Err(LogError::config(format!(
                    "handler `{key}` references unknown formatter `{}`",
                    handler.formatter()
                )));
            }
            if handler.path().as_os_str().is_empty() {
                return Err(LogError::config(format!("handler `{key}` has an empty path")));
            }
        }
        Ok(())
    }

    /// Serialize into a JSON value
    pub fn to_json(&self) -> LogResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize into pretty-printed JSON text
    pub fn to_json_string(&self) -> LogResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json(text: &str) -> LogResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

const fn default_version() -> u32 {
    CONFIG_VERSION
}

const fn default_name_width() -> usize {
    DEFAULT_NAME_WIDTH
}

const fn default_propagate() -> bool {
    true
}

pub(crate) const fn default_backup_count() -> usize {
    super::DEFAULT_BACKUP_COUNT
}
