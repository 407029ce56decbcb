//! Namespaced diagnostic logger
//!
//! A thin formatter over the `tracing` sinks: every line carries an ISO
//! timestamp, level and dotted prefix chain so interleaved test output
//! stays attributable. Tests receive a handle (or derive a named child);
//! the logger itself holds no mutable state.

use chrono::{SecondsFormat, Utc};
use once_cell::sync::OnceCell;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Prefixed log emitter. Cheap to clone; children share nothing with
/// their parent beyond the prefix string.
#[derive(Debug, Clone)]
pub struct Logger {
    prefix: String,
}

impl Logger {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Render one log line: `[ts] [LEVEL] [prefix] message arg1 arg2…`.
    /// Args are independently JSON-stringified; the args segment is
    /// omitted entirely when there are none.
    pub fn format(&self, level: LogLevel, message: &str, args: &[Value]) -> String {
        let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let prefix = if self.prefix.is_empty() {
            String::new()
        } else {
            format!("[{}] ", self.prefix)
        };
        let base = format!("[{}] [{}] {}{}", ts, level.as_str(), prefix, message);
        if args.is_empty() {
            base
        } else {
            let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
            format!("{} {}", base, rendered.join(" "))
        }
    }

    pub fn debug(&self, message: &str, args: &[Value]) {
        tracing::debug!("{}", self.format(LogLevel::Debug, message, args));
    }

    pub fn info(&self, message: &str, args: &[Value]) {
        tracing::info!("{}", self.format(LogLevel::Info, message, args));
    }

    pub fn warn(&self, message: &str, args: &[Value]) {
        tracing::warn!("{}", self.format(LogLevel::Warn, message, args));
    }

    pub fn error(&self, message: &str, args: &[Value]) {
        tracing::error!("{}", self.format(LogLevel::Error, message, args));
    }

    /// Derive a logger with a dot-joined prefix. The parent is untouched.
    pub fn child(&self, name: &str) -> Logger {
        let prefix = if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        };
        Logger::new(prefix)
    }
}

static DEFAULT_LOGGER: OnceCell<Logger> = OnceCell::new();

/// Process-wide default logger, created once with the `App` prefix.
/// Passing a name returns a fresh child of the default on every call.
pub fn logger(name: Option<&str>) -> Logger {
    let default = DEFAULT_LOGGER.get_or_init(|| Logger::new("App"));
    match name {
        Some(name) => default.child(name),
        None => default.clone(),
    }
}
