//! Narrow logging interface used by the client.
//!
//! Call sites depend only on [`Logger`]. Three sinks are provided: [`NoopLogger`]
//! (the default), [`TracingLogger`] which forwards to `tracing`, and
//! [`ConsoleLogger`] which prints `[level] msg key=value` lines for the CLI.

use crate::context::Context;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
}

impl LogLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key-value annotation attached to a log call.
#[derive(Debug, Clone, PartialEq)]
pub struct LogField {
    pub key: String,
    pub value: Value,
}

impl LogField {
    pub fn new(key: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|e| Value::String(format!("<unserializable: {e}>")));
        Self {
            key: key.into(),
            value,
        }
    }
}

impl fmt::Display for LogField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::String(s) => write!(f, "{}={}", self.key, s),
            other => write!(f, "{}={}", self.key, other),
        }
    }
}

pub trait Logger: Send + Sync {
    fn debug(&self, msg: &str, fields: &[LogField]);
    fn info(&self, msg: &str, fields: &[LogField]);
    fn error(&self, msg: &str, fields: &[LogField]);
}

/// An absent logger swallows everything.
impl<L: Logger> Logger for Option<L> {
    fn debug(&self, msg: &str, fields: &[LogField]) {
        if let Some(logger) = self {
            logger.debug(msg, fields);
        }
    }

    fn info(&self, msg: &str, fields: &[LogField]) {
        if let Some(logger) = self {
            logger.info(msg, fields);
        }
    }

    fn error(&self, msg: &str, fields: &[LogField]) {
        if let Some(logger) = self {
            logger.error(msg, fields);
        }
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn debug(&self, msg: &str, fields: &[LogField]) {
        (**self).debug(msg, fields);
    }

    fn info(&self, msg: &str, fields: &[LogField]) {
        (**self).info(msg, fields);
    }

    fn error(&self, msg: &str, fields: &[LogField]) {
        (**self).error(msg, fields);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _msg: &str, _fields: &[LogField]) {}
    fn info(&self, _msg: &str, _fields: &[LogField]) {}
    fn error(&self, _msg: &str, _fields: &[LogField]) {}
}

/// Forwards to the global `tracing` subscriber.
///
/// `tracing` needs field names at compile time, so the runtime keys of a
/// [`LogField`] list cannot become separate event fields. They are packed into a
/// single `fields` value holding a JSON object, e.g.
/// `fields={"code":200,"body":"ok"}`. Subscribers that filter or index on
/// individual fields (JSON formatters included) see one string field, not `code`
/// and `body`. Use [`ConsoleLogger`] when per-key output matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

fn fields_object(fields: &[LogField]) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|f| (f.key.clone(), f.value.clone()))
            .collect(),
    )
}

impl Logger for TracingLogger {
    fn debug(&self, msg: &str, fields: &[LogField]) {
        tracing::debug!(fields = %fields_object(fields), "{}", msg);
    }

    fn info(&self, msg: &str, fields: &[LogField]) {
        tracing::info!(fields = %fields_object(fields), "{}", msg);
    }

    fn error(&self, msg: &str, fields: &[LogField]) {
        tracing::error!(fields = %fields_object(fields), "{}", msg);
    }
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

#[derive(Clone)]
struct Sink {
    level: LogLevel,
    out: SharedWriter,
}

impl Sink {
    fn log(&self, msg: &str, fields: &[LogField]) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "[{}] {}", self.level, format_line(msg, fields));
            let _ = out.flush();
        }
    }
}

/// `msg key=value key=value`
#[must_use]
pub fn format_line(msg: &str, fields: &[LogField]) -> String {
    let mut line = msg.to_string();
    for field in fields {
        line.push(' ');
        line.push_str(&field.to_string());
    }
    line
}

/// Line-per-call console output. Each level is an optional sink; the debug
/// sink only exists when debug output was requested.
#[derive(Clone)]
pub struct ConsoleLogger {
    debug: Option<Sink>,
    info: Option<Sink>,
    error: Option<Sink>,
}

impl ConsoleLogger {
    pub fn new(out: Box<dyn Write + Send>, debug: bool) -> Self {
        let out: SharedWriter = Arc::new(Mutex::new(out));
        let sink = |level| Sink {
            level,
            out: out.clone(),
        };

        Self {
            debug: debug.then(|| sink(LogLevel::Debug)),
            info: Some(sink(LogLevel::Info)),
            error: Some(sink(LogLevel::Error)),
        }
    }

    pub fn stderr(debug: bool) -> Self {
        Self::new(Box::new(io::stderr()), debug)
    }

    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.debug.is_some()
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, msg: &str, fields: &[LogField]) {
        if let Some(sink) = &self.debug {
            sink.log(msg, fields);
        }
    }

    fn info(&self, msg: &str, fields: &[LogField]) {
        if let Some(sink) = &self.info {
            sink.log(msg, fields);
        }
    }

    fn error(&self, msg: &str, fields: &[LogField]) {
        if let Some(sink) = &self.error {
            sink.log(msg, fields);
        }
    }
}

/// Resolves the logger for a request.
pub type GetLogger = Arc<dyn Fn(&Context) -> Arc<dyn Logger> + Send + Sync>;

#[must_use]
pub fn noop_factory() -> GetLogger {
    Arc::new(|_: &Context| -> Arc<dyn Logger> { Arc::new(NoopLogger) })
}

#[must_use]
pub fn tracing_factory() -> GetLogger {
    Arc::new(|_: &Context| -> Arc<dyn Logger> { Arc::new(TracingLogger) })
}

/// Uses the logger stored in the request context, or discards when there is none.
#[must_use]
pub fn context_factory() -> GetLogger {
    Arc::new(|ctx: &Context| -> Arc<dyn Logger> {
        ctx.logger().unwrap_or_else(|| Arc::new(NoopLogger))
    })
}
