//! Error handling for hierlog

/// Type alias for results of logging configuration operations
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while assembling or applying a logging configuration
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LogError {
    /// The configuration is structurally invalid
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A level string did not name any known level
    #[error("invalid configuration: unknown level `{value}`")]
    InvalidLevel {
        /// The rejected input.
        value: String,
    },

    /// The file appender could not be created (unwritable path, missing permissions)
    #[error(transparent)]
    Appender(#[from] tracing_appender::rolling::InitError),

    /// A log file could not be created or opened
    #[error("failed to open log file `{}`: {source}", path.display())]
    Open {
        /// The configured destination.
        path: std::path::PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber was already installed
    #[error("failed to install subscriber: {0}")]
    Init(String),

    /// Configuration (de)serialization failed
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LogError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the error was caused by the caller's configuration rather than the environment
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::InvalidLevel { .. } | Self::Serde(_)
        )
    }
}
