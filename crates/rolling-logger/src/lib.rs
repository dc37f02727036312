//! Rolling Logger
//!
//! `log` backend that keeps the most recent records in a circular buffer
//! and forwards every record to the browser console (stderr off wasm).

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use chrono::{SecondsFormat, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Default number of records kept in memory
pub const DEFAULT_CAPACITY: usize = 200;

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Circular buffer logger
pub struct RollingLogger {
    level: LevelFilter,
    capacity: usize,
    buffer: Mutex<VecDeque<String>>,
}

impl RollingLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            level,
            capacity,
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Install as the global `log` backend.
    ///
    /// Only the first call installs; later calls return the error from `log`.
    pub fn init(level: LevelFilter, capacity: usize) -> Result<&'static RollingLogger, SetLoggerError> {
        let logger = LOGGER.get_or_init(|| RollingLogger::new(level, capacity));
        log::set_logger(logger)?;
        log::set_max_level(level);
        Ok(logger)
    }

    /// Snapshot of buffered lines, oldest first
    pub fn recent(&self) -> Vec<String> {
        match self.buffer.lock() {
            Ok(buf) => buf.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Buffered lines as one block, oldest first
    pub fn dump(&self) -> String {
        self.recent().join("\n")
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn push(&self, line: String) {
        if let Ok(mut buf) = self.buffer.lock() {
            while buf.len() >= self.capacity {
                buf.pop_front();
            }
            buf.push_back(line);
        }
    }
}

/// Buffered lines of the installed global logger (empty before `init`)
pub fn recent() -> Vec<String> {
    LOGGER.get().map(|l| l.recent()).unwrap_or_default()
}

/// Buffered lines of the installed global logger as one block
pub fn dump() -> String {
    recent().join("\n")
}

/// Format one record as `<rfc3339 time> <LEVEL> <target>: <message>`
pub fn format_record(record: &Record) -> String {
    format!(
        "{} {:<5} {}: {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        record.level(),
        record.target(),
        record.args()
    )
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        emit(record.level(), &line);
        self.push(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let msg = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&msg),
        Level::Warn => web_sys::console::warn_1(&msg),
        Level::Info => web_sys::console::info_1(&msg),
        Level::Debug => web_sys::console::log_1(&msg),
        Level::Trace => web_sys::console::debug_1(&msg),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}
