//! Logger levels and their mapping onto `tracing` metadata

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::LogError;

/// Name of the event field that promotes an `ERROR` event to [`Level::Critical`]
///
/// Only the field's presence on the callsite counts, not its value. It is
/// emitted by [`critical!`](crate::critical) and is never written to the line.
pub const CRITICAL_FIELD: &str = "hierlog.critical";

/// Severity assigned to `tracing`'s `TRACE` events, below [`Level::Debug`]
pub(crate) const TRACE_SEVERITY: u8 = 5;

/// Minimum level of a logger node
///
/// Variants are ordered by severity, so `Level::Info < Level::Warning`.
/// [`Level::NotSet`] on a named logger defers to the nearest ancestor; on the
/// root it lets every record through.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// No threshold of its own
    NotSet,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level
    #[default]
    Warning,
    /// Error level
    Error,
    /// Critical level
    Critical,
}

impl Level {
    /// All levels, lowest first
    pub const ALL: [Level; 6] = [
        Level::NotSet,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Canonical upper-case name
    pub const fn name(self) -> &'static str {
        match self {
            Level::NotSet => "NOTSET",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Single-letter token written into each line
    pub const fn letter(self) -> char {
        match self {
            Level::NotSet => 'N',
            Level::Debug => 'D',
            Level::Info => 'I',
            Level::Warning => 'W',
            Level::Error => 'E',
            Level::Critical => 'C',
        }
    }

    /// Numeric severity on the conventional 0..=50 scale
    pub const fn severity(self) -> u8 {
        match self {
            Level::NotSet => 0,
            Level::Debug => 10,
            Level::Info => 20,
            Level::Warning => 30,
            Level::Error => 40,
            Level::Critical => 50,
        }
    }

    /// Whether a record of `severity` passes this threshold
    pub const fn admits(self, severity: u8) -> bool {
        severity >= self.severity()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = LogError;

    /// Accepts full names, `WARN`/`FATAL`, and single letters, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().to_ascii_uppercase().as_str() {
            "NOTSET" | "N" => Level::NotSet,
            "DEBUG" | "D" => Level::Debug,
            "INFO" | "I" => Level::Info,
            "WARNING" | "WARN" | "W" => Level::Warning,
            "ERROR" | "E" => Level::Error,
            "CRITICAL" | "FATAL" | "C" => Level::Critical,
            _ => {
                return Err(LogError::InvalidLevel {
                    value: s.to_string(),
                });
            }
        };
        Ok(level)
    }
}

/// Severity of a `tracing` callsite
///
/// `ERROR` callsites that declare a [`CRITICAL_FIELD`] are critical records,
/// whatever value the field carries.
pub fn severity_of(metadata: &tracing::Metadata<'_>) -> u8 {
    record_level(metadata).map_or(TRACE_SEVERITY, Level::severity)
}

/// Level letter of a `tracing` callsite, `T` for `TRACE`
pub fn letter_of(metadata: &tracing::Metadata<'_>) -> char {
    record_level(metadata).map_or('T', Level::letter)
}

fn record_level(metadata: &tracing::Metadata<'_>) -> Option<Level> {
    match *metadata.level() {
        tracing::Level::TRACE => None,
        tracing::Level::DEBUG => Some(Level::Debug),
        tracing::Level::INFO => Some(Level::Info),
        tracing::Level::WARN => Some(Level::Warning),
        tracing::Level::ERROR if metadata.fields().field(CRITICAL_FIELD).is_some() => {
            Some(Level::Critical)
        }
        tracing::Level::ERROR => Some(Level::Error),
    }
}
