//! Event formatter writing pipe-delimited, fixed-width lines

use std::fmt::{self, Write as _};
use std::sync::OnceLock;

use time::format_description::well_known::Rfc3339;
use tracing::field::{Field as EventField, Visit};
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, UtcTime};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

use crate::config::{CRITICAL_FIELD, FormatterConfig, letter_of};
use crate::format::{DELIMITER, Field, LineTemplate, NameFormatter, logger_name};

/// Formats each event according to a [`LineTemplate`]
///
/// `[time|][process|][thread|]<level-letter>|<name>|<message>[ key=value...]`
#[derive(Debug, Clone)]
pub struct LineFormat {
    template: LineTemplate,
    names: NameFormatter,
    timer: UtcTime<Rfc3339>,
}

impl LineFormat {
    /// Formatter for a template and name column width
    pub fn new(template: LineTemplate, names: NameFormatter) -> Self {
        Self {
            template,
            names,
            timer: UtcTime::rfc_3339(),
        }
    }

    /// Formatter described by a formatter record
    pub fn from_config(config: &FormatterConfig) -> Self {
        Self::new(config.format.clone(), config.name_formatter())
    }

    /// The template driving this formatter
    pub fn template(&self) -> &LineTemplate {
        &self.template
    }

    fn write_line(
        &self,
        writer: &mut Writer<'_>,
        metadata: &Metadata<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        for (i, field) in self.template.fields().iter().enumerate() {
            if i > 0 {
                writer.write_char(DELIMITER)?;
            }
            match field {
                Field::Time => self.timer.format_time(writer)?,
                Field::Process => writer.write_str(process_name())?,
                Field::Thread => write_thread_name(writer)?,
                Field::Level => writer.write_char(letter_of(metadata))?,
                Field::Name => self.names.write_to(writer, &logger_name(metadata.target()))?,
                Field::Message => {
                    let mut visitor = MessageVisitor::new(writer);
                    event.record(&mut visitor);
                    visitor.finish()?;
                }
            }
        }
        writeln!(writer)
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        #[cfg(feature = "log-compat")]
        {
            use tracing_log::NormalizeEvent;
            if let Some(metadata) = event.normalized_metadata() {
                return self.write_line(&mut writer, &metadata, event);
            }
        }
        self.write_line(&mut writer, event.metadata(), event)
    }
}

/// Display name of the current process: the executable's file stem
pub fn process_name() -> &'static str {
    static NAME: OnceLock<String> = OnceLock::new();
    NAME.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
            .unwrap_or_else(|| format!("pid-{}", std::process::id()))
    })
}

fn write_thread_name(writer: &mut Writer<'_>) -> fmt::Result {
    let thread = std::thread::current();
    match thread.name() {
        Some(name) => writer.write_str(name),
        None => write!(writer, "{:?}", thread.id()),
    }
}

/// Writes the `message` field, then every other field as ` key=value`
///
/// Fields the bridge from the `log` crate adds (`log.*`) and the
/// [`CRITICAL_FIELD`] marker are skipped.
struct MessageVisitor<'a, 'w> {
    writer: &'a mut Writer<'w>,
    message: Option<String>,
    rest: String,
    result: fmt::Result,
}

impl<'a, 'w> MessageVisitor<'a, 'w> {
    fn new(writer: &'a mut Writer<'w>) -> Self {
        Self {
            writer,
            message: None,
            rest: String::new(),
            result: Ok(()),
        }
    }

    fn skipped(field: &EventField) -> bool {
        let name = field.name();
        name == CRITICAL_FIELD || name.starts_with("log.")
    }

    fn finish(self) -> fmt::Result {
        self.result?;
        if let Some(message) = &self.message {
            self.writer.write_str(message)?;
        }
        let rest = if self.message.is_none() {
            self.rest.trim_start()
        } else {
            self.rest.as_str()
        };
        self.writer.write_str(rest)
    }
}

impl Visit for MessageVisitor<'_, '_> {
    fn record_str(&mut self, field: &EventField, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else if !Self::skipped(field) {
            self.result = self
                .result
                .and_then(|()| write!(self.rest, " {}={value}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &EventField, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else if !Self::skipped(field) {
            self.result = self
                .result
                .and_then(|()| write!(self.rest, " {}={value:?}", field.name()));
        }
    }
}
