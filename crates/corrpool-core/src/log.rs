//! Leveled stderr diagnostics for the pool.
//!
//! Thread-safe, context-tagged debug output. Every message is tagged
//! with `[pool:worker]` when a worker index has been set for the current
//! thread, or `[pool:--]` otherwise.
//!
//! # Environment Variables
//!
//! - `CORRPOOL_LOG_LEVEL` - `off|error|warn|info|debug|trace` or `0`-`5`
//!
//! # Output Format
//!
//! `[LEVEL] [w<worker>] message`

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Log levels, ascending verbosity.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_str_or(s: &str, default: Self) -> Self {
        match s.to_lowercase().as_str() {
            "off" | "0" => LogLevel::Off,
            "error" | "1" => LogLevel::Error,
            "warn" | "2" => LogLevel::Warn,
            "info" | "3" => LogLevel::Info,
            "debug" | "4" => LogLevel::Debug,
            "trace" | "5" => LogLevel::Trace,
            _ => default,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Off => "",
            LogLevel::Error => "[ERROR]",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Info => "[INFO] ",
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Trace => "[TRACE]",
        }
    }
}

fn env_get_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Warn as u8);
static INITIALIZED: AtomicBool = AtomicBool::new(false);

fn ensure_init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }
    let level = LogLevel::from_str_or(&env_get_str("CORRPOOL_LOG_LEVEL", "warn"), LogLevel::Warn);
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Current log level (initialized from `CORRPOOL_LOG_LEVEL` on first use).
#[inline]
pub fn log_level() -> LogLevel {
    ensure_init();
    match LOG_LEVEL.load(Ordering::Relaxed) {
        0 => LogLevel::Off,
        1 => LogLevel::Error,
        2 => LogLevel::Warn,
        3 => LogLevel::Info,
        4 => LogLevel::Debug,
        _ => LogLevel::Trace,
    }
}

/// Set the log level programmatically, overriding any environment value.
pub fn set_log_level(level: LogLevel) {
    INITIALIZED.store(true, Ordering::SeqCst);
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

#[inline]
fn level_enabled(level: LogLevel) -> bool {
    level as u8 <= log_level() as u8
}

thread_local! {
    static WORKER_ID: std::cell::Cell<Option<usize>> = const { std::cell::Cell::new(None) };
}

/// Tag the current thread with a worker index, for log context.
pub fn set_worker_id(id: usize) {
    WORKER_ID.with(|w| w.set(Some(id)));
}

/// Clear the current thread's worker index.
pub fn clear_worker_id() {
    WORKER_ID.with(|w| w.set(None));
}

fn format_context() -> String {
    match WORKER_ID.with(|w| w.get()) {
        Some(id) => format!("[w{}]", id),
        None => "[w--]".to_string(),
    }
}

#[doc(hidden)]
pub fn _clog_impl(level: LogLevel, args: std::fmt::Arguments<'_>) {
    if !level_enabled(level) {
        return;
    }
    eprintln!("{} {} {}", level.prefix(), format_context(), args);
}

/// Error level log with worker context.
#[macro_export]
macro_rules! cperror {
    ($($arg:tt)*) => {{
        $crate::log::_clog_impl($crate::log::LogLevel::Error, format_args!($($arg)*));
    }};
}

/// Warning level log with worker context.
#[macro_export]
macro_rules! cpwarn {
    ($($arg:tt)*) => {{
        $crate::log::_clog_impl($crate::log::LogLevel::Warn, format_args!($($arg)*));
    }};
}

/// Info level log with worker context.
#[macro_export]
macro_rules! cpinfo {
    ($($arg:tt)*) => {{
        $crate::log::_clog_impl($crate::log::LogLevel::Info, format_args!($($arg)*));
    }};
}

/// Debug level log with worker context.
#[macro_export]
macro_rules! cpdebug {
    ($($arg:tt)*) => {{
        $crate::log::_clog_impl($crate::log::LogLevel::Debug, format_args!($($arg)*));
    }};
}

/// Trace level log with worker context.
#[macro_export]
macro_rules! cptrace {
    ($($arg:tt)*) => {{
        $crate::log::_clog_impl($crate::log::LogLevel::Trace, format_args!($($arg)*));
    }};
}
