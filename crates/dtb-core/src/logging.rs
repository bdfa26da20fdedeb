use std::{
    error::Error as StdError,
    fmt::{self, Write as _},
    io,
};

use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields, MakeWriter},
    registry::LookupSpan,
};

use crate::{errors::Error, utils::log_timestamp, Result};

/// Descriptive log level. There are no thresholds: every level is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Info,
    Debug,
    Error,
    Critical,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    fn from_tracing(level: &Level) -> Self {
        match *level {
            Level::ERROR | Level::WARN => LogLevel::Error,
            Level::INFO => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Initialize the console logger for the bot.
///
/// Lines go to stdout as `[timestamp] | LEVEL    | message`.
pub fn init(service_name: &str) -> Result<()> {
    tracing::subscriber::set_global_default(line_subscriber(io::stdout)).map_err(|e| {
        Error::External(format!("{service_name}: failed to install logger: {e}"))
    })
}

/// Subscriber that renders every event through [`format_line`].
pub fn line_subscriber<W>(make_writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(make_writer)
        .event_format(LineFormat)
        .finish()
}

pub fn log(level: LogLevel, message: &str) {
    let severity = level.as_str();
    match level {
        LogLevel::Info => tracing::info!(severity, "{message}"),
        LogLevel::Debug => tracing::debug!(severity, "{message}"),
        LogLevel::Error | LogLevel::Critical => tracing::error!(severity, "{message}"),
    }
}

pub fn format_line(timestamp: &str, level: &str, message: &str) -> String {
    format!("[{timestamp}] | {level:<8} | {message}")
}

// ============== Error Introspection ==============

/// Where an error was caught: file, line and enclosing function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub routine: &'static str,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} in {}", self.file, self.line, self.routine)
    }
}

/// Capture the current [`SourceLocation`].
#[macro_export]
macro_rules! here {
    () => {{
        fn __here() {}
        fn __name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let path = __name_of(__here);
        $crate::logging::SourceLocation {
            file: file!(),
            line: line!(),
            routine: $crate::logging::routine_name(path.strip_suffix("::__here").unwrap_or(path)),
        }
    }};
}

/// Last path segment of a function path, skipping closure frames.
#[doc(hidden)]
pub fn routine_name(path: &'static str) -> &'static str {
    path.rsplit("::")
        .find(|seg| *seg != "{{closure}}")
        .unwrap_or(path)
}

/// Stable, short name for an error value.
pub fn error_type_name(err: &(dyn StdError + 'static)) -> String {
    if let Some(e) = err.downcast_ref::<io::Error>() {
        return format!("{:?}", e.kind());
    }
    if err.is::<serde_json::Error>() {
        return "JsonError".to_string();
    }
    if err.is::<std::str::Utf8Error>() || err.is::<std::string::FromUtf8Error>() {
        return "Utf8Error".to_string();
    }
    if let Some(e) = err.downcast_ref::<Error>() {
        return e.variant_name().to_string();
    }
    "Error".to_string()
}

pub fn format_exception(
    err: &(dyn StdError + 'static),
    location: Option<SourceLocation>,
    context: &str,
) -> String {
    let location = location
        .map(|l| l.to_string())
        .unwrap_or_else(|| "unknown location".to_string());
    format!("{} | {location} | {context}: {err}", error_type_name(err))
}

/// Log a caught error at CRITICAL level.
pub fn log_exception(
    err: &(dyn StdError + 'static),
    location: Option<SourceLocation>,
    context: &str,
) {
    log(LogLevel::Critical, &format_exception(err, location, context));
}

// ============== Line Format ==============

struct LineFormat;

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
        let mut fields = LineFields::default();
        event.record(&mut fields);

        let level = fields
            .severity
            .unwrap_or_else(|| LogLevel::from_tracing(event.metadata().level()).to_string());
        writeln!(
            writer,
            "{}",
            format_line(&log_timestamp(), &level, &fields.message)
        )
    }
}

#[derive(Default)]
struct LineFields {
    severity: Option<String>,
    message: String,
}

impl Visit for LineFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "severity" => self.severity = Some(value.to_string()),
            "message" => self.message = value.to_string(),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}
