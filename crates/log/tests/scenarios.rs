//! End-to-end tests: build a configuration, install it, log, read the file back.

use std::fs;
use std::path::{Path, PathBuf};

use hierlog::{ConfigBuilder, Level, LoggerBuilder, process_name};
use tempfile::TempDir;

/// Install `builder`'s configuration on this thread, run `emit`, return the split lines.
fn run(builder: ConfigBuilder, emit: impl FnOnce()) -> Vec<Vec<String>> {
    let config = builder.export();
    let path = config.handlers[hierlog::DEFAULT_HANDLER].path().to_path_buf();
    {
        let _guard = LoggerBuilder::from_config(config).set_default().unwrap();
        emit();
    }
    parse_file(&path)
}

fn parse_file(path: &Path) -> Vec<Vec<String>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.split('|').map(String::from).collect())
        .collect()
}

fn log_path(dir: &TempDir) -> PathBuf {
    dir.path().join("test.log")
}

fn on_thread<T: Send + 'static>(name: &str, f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .name(name.to_string())
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

mod basic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_level_is_warning() {
        let dir = tempfile::tempdir().unwrap();
        let logs = run(ConfigBuilder::new(log_path(&dir)), || {
            tracing::debug!(target: "a", "test");
            tracing::info!(target: "a", "test");
            tracing::warn!(target: "a", "test");
            tracing::error!(target: "a", "test");
            hierlog::critical!(target: "a", "test");
        });
        assert_eq!(
            logs,
            [
                ["W", "a________", "test"],
                ["E", "a________", "test"],
                ["C", "a________", "test"],
            ]
        );
    }

    #[test]
    fn module_level() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ConfigBuilder::new(log_path(&dir))
            .try_add("a", "I")
            .unwrap();
        let logs = run(builder, || {
            // below a's level
            tracing::debug!(target: "a", "test");
            tracing::info!(target: "a", "test");
            // b falls back to root
            tracing::info!(target: "b", "test");
            tracing::warn!(target: "b", "test");
        });
        assert_eq!(
            logs,
            [["I", "a________", "test"], ["W", "b________", "test"]]
        );
    }

    #[test]
    fn names_are_fixed_width() {
        let dir = tempfile::tempdir().unwrap();
        let logs = run(ConfigBuilder::new(log_path(&dir)), || {
            tracing::warn!(target: "a", "test");
            tracing::warn!(target: "a.a", "test");
            tracing::warn!(target: "a.b.c.d.e.f", "test");
            tracing::warn!(target: "a", "test");
        });
        let names: Vec<&str> = logs.iter().map(|line| line[1].as_str()).collect();
        assert_eq!(names, ["a________", "a.a______", "a.b.c.d__", "a________"]);
    }

    #[test]
    fn rotation_keeps_path_and_line_format() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ConfigBuilder::new(log_path(&dir)).rotate(true);
        assert!(builder.export().handlers[hierlog::DEFAULT_HANDLER].is_rotating());

        let logs = run(builder, || {
            tracing::warn!(target: "a", "test");
        });
        assert_eq!(logs, [["W", "a________", "test"]]);

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, ["test.log"]);
    }

    #[test]
    fn custom_name_width() {
        let dir = tempfile::tempdir().unwrap();
        let logs = run(ConfigBuilder::new(log_path(&dir)).name_width(14), || {
            tracing::warn!(target: "long.long.long", "test");
            tracing::warn!(target: "short", "test");
        });
        assert_eq!(
            logs,
            [
                ["W", "long.long.long", "test"],
                ["W", "short_________", "test"],
            ]
        );
    }

    #[test]
    fn appends_to_existing_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = log_path(&dir);
        fs::write(&path, "W|previous_|line\n")?;

        let config = ConfigBuilder::new(&path).export();
        {
            let _guard = LoggerBuilder::from_config(config).set_default()?;
            tracing::warn!(target: "a", "test");
        }

        assert_eq!(
            parse_file(&path),
            [["W", "previous_", "line"], ["W", "a________", "test"]]
        );
        Ok(())
    }
}

mod fields {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn processes() {
        let dir = tempfile::tempdir().unwrap();
        let logs = run(ConfigBuilder::new(log_path(&dir)).processes(true), || {
            tracing::warn!(target: "a", "test");
        });
        assert_eq!(logs, [[process_name(), "W", "a________", "test"]]);
    }

    #[test]
    fn threads() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ConfigBuilder::new(log_path(&dir)).threads(true);
        let logs = on_thread("MainThread", move || {
            run(builder, || tracing::warn!(target: "a", "test"))
        });
        assert_eq!(logs, [["MainThread", "W", "a________", "test"]]);
    }

    #[test]
    fn processes_and_threads() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ConfigBuilder::new(log_path(&dir))
            .processes(true)
            .threads(true);
        let logs = on_thread("MainThread", move || {
            run(builder, || tracing::warn!(target: "a", "test"))
        });
        assert_eq!(
            logs,
            [[process_name(), "MainThread", "W", "a________", "test"]]
        );
    }

    #[test]
    fn structured_fields_follow_message() {
        let dir = tempfile::tempdir().unwrap();
        let logs = run(ConfigBuilder::new(log_path(&dir)), || {
            tracing::warn!(target: "http", status = 503, "upstream down");
        });
        assert_eq!(logs, [["W", "http_____", "upstream down status=503"]]);
    }

    #[test]
    fn only_the_critical_macro_marks_critical() {
        let dir = tempfile::tempdir().unwrap();
        let logs = run(ConfigBuilder::new(log_path(&dir)), || {
            tracing::error!(target: "a", critical = false, "x");
            tracing::error!(target: "a", critical = true, "x");
            hierlog::critical!(target: "a", "x");
        });
        assert_eq!(
            logs,
            [
                ["E", "a________", "x critical=false"],
                ["E", "a________", "x critical=true"],
                ["C", "a________", "x"],
            ]
        );
    }
}

mod propagation {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn one_level_down() {
        let dir = tempfile::tempdir().unwrap();
        let logs = run(ConfigBuilder::new(log_path(&dir)).add("a", Level::Info), || {
            tracing::debug!(target: "a", "test");
            tracing::info!(target: "a", "test");
            // a.b inherits a's level
            tracing::debug!(target: "a.b", "test");
            tracing::info!(target: "a.b", "test");
        });
        assert_eq!(
            logs,
            [["I", "a________", "test"], ["I", "a.b______", "test"]]
        );
    }

    #[test]
    fn skip_level() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ConfigBuilder::new(log_path(&dir))
            .add("a", Level::Info)
            .add("a.b.c", Level::Debug);
        let logs = run(builder, || {
            tracing::debug!(target: "a", "test");
            tracing::info!(target: "a", "test");
            tracing::debug!(target: "a.b", "test");
            tracing::info!(target: "a.b", "test");
            tracing::debug!(target: "a.b.c", "test");
            tracing::debug!(target: "a.b.c.d", "test");
        });
        assert_eq!(
            logs,
            [
                ["I", "a________", "test"],
                ["I", "a.b______", "test"],
                ["D", "a.b.c____", "test"],
                ["D", "a.b.c.d__", "test"],
            ]
        );
    }

    #[test]
    fn module_path_targets_share_the_hierarchy() {
        let dir = tempfile::tempdir().unwrap();
        let logs = run(ConfigBuilder::new(log_path(&dir)).add("app", Level::Debug), || {
            tracing::debug!(target: "app::db", "test");
            tracing::debug!(target: "other::db", "test");
        });
        assert_eq!(logs, [["D", "app.db___", "test"]]);
    }

    #[test]
    fn non_propagating_logger_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConfigBuilder::new(log_path(&dir))
            .add("quiet", Level::Debug)
            .export();
        config.loggers.get_mut("quiet").unwrap().propagate = false;

        {
            let _guard = LoggerBuilder::from_config(config).set_default().unwrap();
            hierlog::critical!(target: "quiet.inner", "test");
            tracing::warn!(target: "loud", "test");
        }

        assert_eq!(parse_file(&log_path(&dir)), [["W", "loud_____", "test"]]);
    }
}

mod errors {
    use super::*;
    use hierlog::LogError;

    #[test]
    fn unwritable_destination_surfaces_on_apply() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(log_path(&dir)).unwrap();

        // building never touches the filesystem
        let config = ConfigBuilder::new(log_path(&dir)).export();
        let err = LoggerBuilder::from_config(config).set_default().unwrap_err();
        assert!(matches!(err, LogError::Appender(_)), "{err}");
    }

    #[test]
    fn invalid_configuration_is_rejected_before_opening_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConfigBuilder::new(log_path(&dir)).export();
        config.formatters.clear();

        let err = LoggerBuilder::from_config(config).set_default().unwrap_err();
        assert!(err.is_config_error());
        assert!(!log_path(&dir).exists());
    }
}

#[cfg(feature = "log-compat")]
mod log_compat {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn log_crate_records_use_their_target() {
        let _ = tracing_log::LogTracer::init();

        let dir = tempfile::tempdir().unwrap();
        let logs = run(
            ConfigBuilder::new(log_path(&dir)).add("legacy", Level::Info),
            || {
                tracing_log::log::debug!(target: "legacy.db", "dropped");
                tracing_log::log::info!(target: "legacy.db", "kept");
            },
        );
        assert_eq!(logs, [["I", "legacy.db", "kept"]]);
    }
}
