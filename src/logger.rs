//! Custom logging module.
//!
//! This module provides a `log` implementation that captures formatted entries
//! into a bounded in-memory buffer, rendered by the log panel. The terminal is
//! owned by the UI while running, so nothing is written to stdout.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Number of entries kept before the oldest are dropped.
///
pub const LOG_CAPACITY: usize = 500;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {:<5} {}", timestamp, level_str, record.args())
}

/// Shared, bounded buffer of formatted log entries.
///
#[derive(Clone, Debug)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        LogBuffer::with_capacity(LOG_CAPACITY)
    }
}

impl LogBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        LogBuffer {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Append an entry, dropping the oldest one when full.
    ///
    pub fn push(&self, entry: String) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.len() == self.capacity {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }

    /// Returns up to `count` of the newest entries, oldest first.
    ///
    pub fn tail(&self, count: usize) -> Vec<String> {
        match self.entries.lock() {
            Ok(entries) => {
                let skip = entries.len().saturating_sub(count);
                entries.iter().skip(skip).cloned().collect()
            }
            Err(_) => vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Logger that captures records into a `LogBuffer`.
///
pub struct CustomLogger {
    buffer: LogBuffer,
    level: LevelFilter,
}

impl CustomLogger {
    pub fn new(buffer: LogBuffer, level: LevelFilter) -> Self {
        CustomLogger { buffer, level }
    }

    /// Install the logger as the global `log` backend.
    ///
    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.push(format_log(record));
        }
    }

    fn flush(&self) {}
}
