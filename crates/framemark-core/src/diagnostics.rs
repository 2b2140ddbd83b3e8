//! Diagnostics sink injected into every component.
//!
//! Components never log through a global; they hold a [`SharedSink`] handed to
//! them at construction. [`LogSink`] forwards to the `log` facade, [`MemorySink`]
//! keeps records around so callers can inspect them.

use log::Level;
use std::fmt;
use std::sync::{Arc, Mutex};

/// A single emitted diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    /// Emitting component, e.g. `"framemark::manager"`.
    pub target: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}] {}", self.level, self.target, self.message)
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Record one diagnostic.
    fn emit(&self, level: Level, target: &str, message: &str);
}

/// Shared handle to a sink.
pub type SharedSink = Arc<dyn DiagnosticSink>;

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, level: Level, target: &str, message: &str) {
        log::log!(target: target, level, "{}", message);
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Records at exactly `level`.
    pub fn at_level(&self, level: Level) -> Vec<Diagnostic> {
        self.records()
            .into_iter()
            .filter(|d| d.level == level)
            .collect()
    }

    /// Warning messages, in emission order.
    pub fn warnings(&self) -> Vec<String> {
        self.at_level(Level::Warn)
            .into_iter()
            .map(|d| d.message)
            .collect()
    }

    /// Drop all collected records.
    pub fn clear(&self) {
        self.records.lock().unwrap_or_else(|p| p.into_inner()).clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, level: Level, target: &str, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(Diagnostic {
                level,
                target: target.to_string(),
                message: message.to_string(),
            });
    }
}

/// Default sink used when a component is built without one.
pub fn log_sink() -> SharedSink {
    Arc::new(LogSink)
}

/// Per-component emitter: a sink plus the target name it reports under.
#[derive(Clone)]
pub struct Emitter {
    sink: SharedSink,
    target: &'static str,
}

impl Emitter {
    pub fn new(sink: SharedSink, target: &'static str) -> Self {
        Self { sink, target }
    }

    pub fn sink(&self) -> &SharedSink {
        &self.sink
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.sink.emit(Level::Debug, self.target, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.sink.emit(Level::Info, self.target, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.sink.emit(Level::Warn, self.target, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.sink.emit(Level::Error, self.target, message.as_ref());
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter").field("target", &self.target).finish()
    }
}
