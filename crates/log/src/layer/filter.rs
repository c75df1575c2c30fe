//! Per-layer filter resolving levels through the logger hierarchy

use std::collections::HashMap;
use std::sync::Arc;

use tracing::Metadata;
use tracing_subscriber::layer::{Context, Filter};

use crate::config::{Level, LogConfig, LoggerConfig, severity_of};
use crate::format::logger_name;

/// Level thresholds of the configured logger nodes
///
/// A record from `a.b.c` is checked against the nearest node among `a.b.c`,
/// `a.b`, `a` whose level is not [`Level::NotSet`], falling back to the
/// root. It is dropped if any node on that path has `propagate = false`,
/// since only the root carries handlers.
#[derive(Debug, Clone)]
pub struct LevelTree {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    root: Level,
    nodes: HashMap<String, LoggerConfig>,
}

impl LevelTree {
    /// Build the tree from a configuration's root and named loggers
    pub fn from_config(config: &LogConfig) -> Self {
        let nodes = config
            .loggers
            .iter()
            .map(|(name, logger)| (name.clone(), *logger))
            .collect();
        Self {
            inner: Arc::new(Inner {
                root: config.root.level,
                nodes,
            }),
        }
    }

    /// Level governing records from logger `name`
    pub fn effective_level(&self, name: &str) -> Level {
        ancestry(name)
            .filter_map(|node| self.inner.nodes.get(node))
            .map(|logger| logger.level)
            .find(|level| *level != Level::NotSet)
            .unwrap_or(self.inner.root)
    }

    /// Whether records from `name` reach the root handlers
    pub fn reaches_root(&self, name: &str) -> bool {
        ancestry(name)
            .filter_map(|node| self.inner.nodes.get(node))
            .all(|logger| logger.propagate)
    }

    /// Whether a record of `severity` from logger `name` is written
    pub fn admits(&self, name: &str, severity: u8) -> bool {
        self.effective_level(name).admits(severity) && self.reaches_root(name)
    }

    fn admits_metadata(&self, metadata: &Metadata<'_>) -> bool {
        self.admits(&logger_name(metadata.target()), severity_of(metadata))
    }
}

/// `a.b.c`, `a.b`, `a`
fn ancestry(name: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(name), |&node| node.rfind('.').map(|dot| &node[..dot]))
        .filter(|node| !node.is_empty())
}

impl<S> Filter<S> for LevelTree {
    fn enabled(&self, metadata: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        self.admits_metadata(metadata)
    }

    #[cfg(feature = "log-compat")]
    fn event_enabled(&self, event: &tracing::Event<'_>, _cx: &Context<'_, S>) -> bool {
        use tracing_log::NormalizeEvent;
        match event.normalized_metadata() {
            Some(metadata) => self.admits_metadata(&metadata),
            None => true,
        }
    }
}
