//! Builders assembled from environment variables

use super::Level;
use crate::builder::ConfigBuilder;
use crate::core::{LogError, LogResult};

/// Prefix shared by every environment variable read by [`ConfigBuilder::from_env`]
pub const ENV_PREFIX: &str = "HIERLOG_";

impl ConfigBuilder {
    /// Create a builder from `HIERLOG_*` environment variables
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `HIERLOG_FILE` | destination file (required) |
    /// | `HIERLOG_ROTATE` | use the rotating handler |
    /// | `HIERLOG_PROCESSES` | prefix lines with the process name |
    /// | `HIERLOG_THREADS` | prefix lines with the thread name |
    /// | `HIERLOG_TIMESTAMPS` | prefix lines with a timestamp |
    /// | `HIERLOG_LEVEL` | root level |
    /// | `HIERLOG_LOGGERS` | overrides, `name=LEVEL,name=LEVEL` |
    ///
    /// Flags are enabled by any value other than `0` or `false`.
    pub fn from_env() -> LogResult<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable lookup
    pub fn from_env_with<F>(lookup: F) -> LogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
        let flag = |name: &str| var(name).is_some_and(|v| v != "0" && v != "false");

        let path = var("FILE")
            .filter(|path| !path.is_empty())
            .ok_or_else(|| LogError::config(format!("{ENV_PREFIX}FILE is not set")))?;

        let mut builder = Self::new(path)
            .rotate(flag("ROTATE"))
            .processes(flag("PROCESSES"))
            .threads(flag("THREADS"))
            .timestamps(flag("TIMESTAMPS"));

        if let Some(level) = var("LEVEL") {
            builder = builder.root_level(level.parse()?);
        }

        if let Some(loggers) = var("LOGGERS") {
            for entry in loggers.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                builder = match entry.split_once('=') {
                    Some((name, level)) => builder.try_add(name.trim(), level)?,
                    None => builder.add(entry, None::<Level>),
                };
            }
        }

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn requires_file() {
        let err = ConfigBuilder::from_env_with(env(&[])).unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: HIERLOG_FILE is not set");
    }

    #[test]
    fn reads_flags_levels_and_loggers() {
        let builder = ConfigBuilder::from_env_with(env(&[
            ("HIERLOG_FILE", "/tmp/app.log"),
            ("HIERLOG_ROTATE", "1"),
            ("HIERLOG_THREADS", "true"),
            ("HIERLOG_PROCESSES", "false"),
            ("HIERLOG_LEVEL", "error"),
            ("HIERLOG_LOGGERS", "a=I, a.b.c=DEBUG ,, http"),
        ]))
        .unwrap();

        let config = builder.export();
        assert!(config.handlers["file"].is_rotating());
        assert_eq!(config.root.level, Level::Error);
        assert_eq!(
            config.formatters["default"].format.to_string(),
            "{thread}|{level}|{name}|{message}"
        );
        let overrides: Vec<_> = builder.overrides().collect();
        assert_eq!(
            overrides,
            [("a", Level::Info), ("a.b.c", Level::Debug), ("http", Level::Info)]
        );
    }

    #[test]
    fn bad_logger_level_fails() {
        let err = ConfigBuilder::from_env_with(env(&[
            ("HIERLOG_FILE", "app.log"),
            ("HIERLOG_LOGGERS", "a=shouty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, LogError::InvalidLevel { .. }));
    }
}
