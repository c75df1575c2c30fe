//! Applying a [`LogConfig`] to the `tracing` runtime

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry, fmt};

use crate::config::LogConfig;
use crate::core::{LogError, LogResult};
use crate::layer::{LevelTree, LineFormat};
use crate::writer;

/// A filtered, formatted file layer for one root handler
pub type HandlerLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Subscriber produced from a [`LogConfig`]
pub type LogSubscriber = Layered<Vec<HandlerLayer>, Registry>;

/// Installs a [`LogConfig`] as the active `tracing` subscriber
///
/// Every root handler becomes one `fmt` layer with its own [`LineFormat`]
/// and file writer; all of them share one [`LevelTree`] filter. Files are
/// opened here, not when the configuration is built.
#[derive(Debug)]
pub struct LoggerBuilder {
    config: LogConfig,
}

/// Keeps a thread-scoped logger installed until dropped
///
/// Returned by [`LoggerBuilder::set_default`]. Dropping it restores the
/// previously active subscriber on this thread.
#[derive(Debug)]
#[must_use = "the logger is uninstalled when the guard is dropped"]
pub struct LoggerGuard {
    _default: DefaultGuard,
}

impl LoggerBuilder {
    /// Create builder from config
    pub fn from_config(config: LogConfig) -> Self {
        Self { config }
    }

    /// Build the subscriber without installing it
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the configuration references unknown handlers or formatters
    /// - a log file cannot be opened
    pub fn into_subscriber(self) -> LogResult<LogSubscriber> {
        self.config.validate()?;
        let tree = LevelTree::from_config(&self.config);

        let mut layers: Vec<HandlerLayer> = Vec::with_capacity(self.config.root.handlers.len());
        for key in &self.config.root.handlers {
            let handler = &self.config.handlers[key.as_str()];
            let formatter = &self.config.formatters[handler.formatter()];
            let writer = writer::make_writer(handler)?;

            tracing::debug!(
                handler = %key,
                path = %handler.path().display(),
                format = %formatter.format,
                "attaching log handler"
            );

            layers.push(
                fmt::layer()
                    .with_ansi(false)
                    .event_format(LineFormat::from_config(formatter))
                    .with_writer(writer)
                    .with_filter(tree.clone())
                    .boxed(),
            );
        }

        Ok(Registry::default().with(layers))
    }

    /// Install as the global default subscriber
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Init`] if a global subscriber is already set, in
    /// addition to the errors of [`into_subscriber`](Self::into_subscriber).
    pub fn init(self) -> LogResult<()> {
        self.into_subscriber()?
            .try_init()
            .map_err(|e| LogError::Init(e.to_string()))
    }

    /// Install for the current thread until the returned guard is dropped
    pub fn set_default(self) -> LogResult<LoggerGuard> {
        let subscriber = self.into_subscriber()?;
        Ok(LoggerGuard {
            _default: tracing::subscriber::set_default(subscriber),
        })
    }
}
