//! Internal logging system for the Stereo3D engine
//!
//! This module provides a flexible logging system with:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - Forwarding to the `log` facade for host applications that already
//!   install a `log` backend
//! - File and line information for detailed ERROR logs
//!
//! The VR loop reports its recoverable conditions (tracking loss, compositor
//! submission failures) exclusively through this channel.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to create custom loggers (file logging, in-headset
/// overlays, test capture, etc.)
///
/// # Example
///
/// ```no_run
/// use vr_stereo_engine::stereo3d::log::{Logger, LogEntry};
///
/// struct FileLogger {
///     file: std::fs::File,
/// }
///
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "stereo3d::StereoRenderLoop", "stereo3d::gl::Shader")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose debug information (per-frame traces)
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Warning messages (recoverable per-frame conditions)
    Warn,

    /// Error messages (critical issues with file:line details)
    Error,
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp,
                severity_str,
                source,
                entry.message,
                file,
                line
            );
        } else {
            println!(
                "[{}] [{}] [{}] {}",
                timestamp,
                severity_str,
                source,
                entry.message
            );
        }
    }
}

/// Logger forwarding every entry to the `log` crate facade
///
/// The entry source becomes the `log` target, so host applications can
/// filter engine output with their usual `RUST_LOG`-style configuration.
pub struct LogFacadeLogger;

impl LogFacadeLogger {
    /// Map an engine severity to a `log` level
    pub fn level_for(severity: LogSeverity) -> ::log::Level {
        match severity {
            LogSeverity::Trace => ::log::Level::Trace,
            LogSeverity::Debug => ::log::Level::Debug,
            LogSeverity::Info => ::log::Level::Info,
            LogSeverity::Warn => ::log::Level::Warn,
            LogSeverity::Error => ::log::Level::Error,
        }
    }
}

impl Logger for LogFacadeLogger {
    fn log(&self, entry: &LogEntry) {
        let level = Self::level_for(entry.severity);
        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            ::log::log!(target: entry.source.as_str(), level, "{} ({}:{})", entry.message, file, line);
        } else {
            ::log::log!(target: entry.source.as_str(), level, "{}", entry.message);
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (very verbose, typically disabled)
///
/// # Example
///
/// ```no_run
/// # use vr_stereo_engine::engine_trace;
/// engine_trace!("stereo3d::StereoRenderLoop", "Rendering eye {}", 0);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::stereo3d::Engine::log(
            $crate::stereo3d::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message (development information)
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::stereo3d::Engine::log(
            $crate::stereo3d::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message (important events)
///
/// # Example
///
/// ```no_run
/// # use vr_stereo_engine::engine_info;
/// engine_info!("stereo3d::VrSession", "Target render size {} x {}", 1512, 1680);
/// ```
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::stereo3d::Engine::log(
            $crate::stereo3d::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message (potential issues)
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::stereo3d::Engine::log(
            $crate::stereo3d::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
///
/// # Example
///
/// ```no_run
/// # use vr_stereo_engine::engine_error;
/// engine_error!("stereo3d::Compositor", "Submit compositor error (left): {}", 105);
/// ```
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::stereo3d::Engine::log_detailed(
            $crate::stereo3d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR and build the matching `Error` value
///
/// The first argument is the `Error` variant constructor taking a `String`.
///
/// # Example
///
/// ```no_run
/// # use vr_stereo_engine::engine_err;
/// # use vr_stereo_engine::stereo3d::Error;
/// # let status = 0x8CD6u32;
/// let err = engine_err!(Error::CreationError, "stereo3d::RenderTarget", "incomplete: {:#x}", status);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($variant:path, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::stereo3d::Engine::log_detailed(
            $crate::stereo3d::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $variant(message)
    }};
}

/// Log an ERROR and return early with an `Error::InvalidResource`
///
/// Use `engine_err!` for other variants.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($crate::stereo3d::Error::InvalidResource, $source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
