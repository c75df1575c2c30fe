//! Line templates and the composition of their optional leading fields

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{LogError, LogResult};

/// Separator between the fields of an emitted line
pub const DELIMITER: char = '|';

/// One column of an emitted line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// RFC 3339 UTC timestamp of the record
    Time,
    /// Display name of the emitting process
    Process,
    /// Name of the emitting thread
    Thread,
    /// Single-letter level token
    Level,
    /// Fixed-width logger name
    Name,
    /// Free-form message and any structured fields
    Message,
}

impl Field {
    /// Placeholder keyword used in the serialized template
    pub const fn keyword(self) -> &'static str {
        match self {
            Field::Time => "time",
            Field::Process => "process",
            Field::Thread => "thread",
            Field::Level => "level",
            Field::Name => "name",
            Field::Message => "message",
        }
    }

    fn from_placeholder(s: &str) -> Option<Self> {
        let keyword = s.strip_prefix('{')?.strip_suffix('}')?;
        [
            Field::Time,
            Field::Process,
            Field::Thread,
            Field::Level,
            Field::Name,
            Field::Message,
        ]
        .into_iter()
        .find(|field| field.keyword() == keyword)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.keyword())
    }
}

/// Chooses which runtime-identity fields lead each line
///
/// The order is fixed: time, then process, then thread. Only the presence
/// of each field is configurable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldComposer {
    /// Prefix lines with the record timestamp
    pub time: bool,
    /// Prefix lines with the process name
    pub process: bool,
    /// Prefix lines with the thread name
    pub thread: bool,
}

impl FieldComposer {
    /// Composer for the process and thread flags, without timestamps
    pub const fn new(process: bool, thread: bool) -> Self {
        Self {
            time: false,
            process,
            thread,
        }
    }

    /// The leading fields, in emission order
    pub fn leading_fields(&self) -> SmallVec<[Field; 3]> {
        let mut fields = SmallVec::new();
        if self.time {
            fields.push(Field::Time);
        }
        if self.process {
            fields.push(Field::Process);
        }
        if self.thread {
            fields.push(Field::Thread);
        }
        fields
    }

    /// Full line template: leading fields, level, name, message
    pub fn template(&self) -> LineTemplate {
        let mut fields: SmallVec<[Field; 6]> = self.leading_fields().into_iter().collect();
        fields.extend([Field::Level, Field::Name, Field::Message]);
        LineTemplate { fields }
    }
}

/// Ordered fields of a line, serialized as `{process}|{level}|{name}|{message}`
///
/// The message is always the last field so that messages containing the
/// delimiter never shift other columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LineTemplate {
    fields: SmallVec<[Field; 6]>,
}

impl Default for LineTemplate {
    fn default() -> Self {
        FieldComposer::default().template()
    }
}

impl LineTemplate {
    /// Fields in emission order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of fields written before the level token
    pub fn leading_len(&self) -> usize {
        self.fields
            .iter()
            .position(|field| *field == Field::Level)
            .unwrap_or(self.fields.len())
    }
}

impl fmt::Display for LineTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                fmt::Write::write_char(f, DELIMITER)?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

impl FromStr for LineTemplate {
    type Err = LogError;

    fn from_str(s: &str) -> LogResult<Self> {
        let mut fields = SmallVec::new();
        for part in s.split(DELIMITER) {
            let field = Field::from_placeholder(part.trim()).ok_or_else(|| {
                LogError::config(format!("unknown field `{part}` in line template `{s}`"))
            })?;
            if fields.contains(&field) {
                return Err(LogError::config(format!(
                    "field `{field}` repeated in line template `{s}`"
                )));
            }
            fields.push(field);
        }
        if fields.last() != Some(&Field::Message) {
            return Err(LogError::config(format!(
                "line template `{s}` must end with {}",
                Field::Message
            )));
        }
        Ok(Self { fields })
    }
}

impl TryFrom<String> for LineTemplate {
    type Error = LogError;

    fn try_from(value: String) -> LogResult<Self> {
        value.parse()
    }
}

impl From<LineTemplate> for String {
    fn from(template: LineTemplate) -> Self {
        template.to_string()
    }
}
