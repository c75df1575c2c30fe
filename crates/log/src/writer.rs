//! Writer implementations

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic, RollingFrequency};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::{HandlerConfig, Rolling};
use crate::core::{LogError, LogResult};

/// Open the file sink described by a handler record
///
/// Both kinds write to the configured path. The rotating kind renames the
/// active file to `<path>.1`, `<path>.2`, ... on rollover. The destination
/// directory is created if missing.
pub fn make_writer(handler: &HandlerConfig) -> LogResult<BoxMakeWriter> {
    match handler {
        HandlerConfig::File { path, .. } => Ok(BoxMakeWriter::new(open_plain(path)?)),
        HandlerConfig::RotatingFile {
            path,
            rolling,
            backup_count,
            ..
        } => Ok(BoxMakeWriter::new(RotatingFile::open(
            path,
            *rolling,
            *backup_count,
        )?)),
    }
}

fn split_path(path: &Path) -> LogResult<(&Path, &std::ffi::OsStr)> {
    let file_name = path.file_name().ok_or_else(|| {
        LogError::config(format!(
            "invalid file path (no filename): '{}'",
            path.display()
        ))
    })?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    Ok((dir, file_name))
}

fn open_plain(path: &Path) -> LogResult<RollingFileAppender> {
    let (dir, file_name) = split_path(path)?;

    tracing::trace!(path = %path.display(), "opening log file");
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)?)
}

const fn frequency(rolling: Rolling) -> RollingFrequency {
    match rolling {
        Rolling::Minutely => RollingFrequency::EveryMinute,
        Rolling::Hourly => RollingFrequency::EveryHour,
        Rolling::Daily => RollingFrequency::EveryDay,
    }
}

/// Scheduled rolling file whose active segment stays at the configured path
struct RotatingFile {
    inner: Mutex<BasicRollingFileAppender>,
}

impl RotatingFile {
    fn open(path: &Path, rolling: Rolling, backups: usize) -> LogResult<Self> {
        let (dir, _) = split_path(path)?;
        let io_error = |source| LogError::Open {
            path: PathBuf::from(path),
            source,
        };
        fs::create_dir_all(dir).map_err(io_error)?;
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_error)?;

        tracing::trace!(path = %path.display(), ?rolling, backups, "opening rotating log file");
        let condition = RollingConditionBasic::new().frequency(frequency(rolling));
        let appender = BasicRollingFileAppender::new(path, condition, backups).map_err(io_error)?;
        Ok(Self {
            inner: Mutex::new(appender),
        })
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = RotatingFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingFileWriter(self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Holds the file for one event; flushes when the event is written
struct RotatingFileWriter<'a>(MutexGuard<'a, BasicRollingFileAppender>);

impl Write for RotatingFileWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl Drop for RotatingFileWriter<'_> {
    fn drop(&mut self) {
        let _ = self.0.flush();
    }
}
