/// Stereo3D Engine - global logging entry point
///
/// The engine owns a single process-wide logger. All engine subsystems
/// (render targets, pose tracking, compositor submission, frame pacing)
/// route their messages through it via the `engine_*!` macros.
///
/// Over the life of a VR session the log reads roughly as follows:
///
/// | phase | severity | source |
/// |---|---|---|
/// | session start, recommended target size, controller slots | INFO | `VrSession`, `PoseTracker` |
/// | target (re)allocation | DEBUG | `RenderTarget` |
/// | per-eye rendering | TRACE | `StereoRenderLoop` |
/// | tracking loss, dropped pacer steps | WARN | `StereoRenderLoop`, `FramePacer` |
/// | compositor rejects an eye, framebuffer incomplete | ERROR | `Compositor`, `RenderTarget` |
/// | final pose drain failure | WARN | `VrSession` |
/// | shutdown with frame count | INFO | `VrSession` |
///
/// At 90 Hz the TRACE lines dominate. `Engine::set_min_severity` drops
/// entries below a threshold before they reach the logger.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Lowest severity forwarded to the logger
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(LogSeverity::Trace as u8);

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

fn severity_from_u8(value: u8) -> LogSeverity {
    match value {
        0 => LogSeverity::Trace,
        1 => LogSeverity::Debug,
        2 => LogSeverity::Info,
        3 => LogSeverity::Warn,
        _ => LogSeverity::Error,
    }
}

fn enabled(severity: LogSeverity) -> bool {
    severity as u8 >= MIN_SEVERITY.load(Ordering::Relaxed)
}

// ===== PUBLIC API =====

/// Main engine entry point
///
/// # Example
///
/// ```no_run
/// use vr_stereo_engine::stereo3d::{Engine, log::LogFacadeLogger};
///
/// // Route engine output through the `log` crate
/// Engine::set_logger(LogFacadeLogger);
/// ```
pub struct Engine;

impl Engine {
    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger,
    /// `LogFacadeLogger`, test capture, etc.)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vr_stereo_engine::stereo3d::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger) and forward every severity again
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger);
        }
        MIN_SEVERITY.store(LogSeverity::Trace as u8, Ordering::Relaxed);
    }

    /// Drop entries below `severity`
    ///
    /// ```no_run
    /// use vr_stereo_engine::stereo3d::{Engine, log::LogSeverity};
    ///
    /// // Silence per-eye traces in a release headset build
    /// Engine::set_min_severity(LogSeverity::Info);
    /// ```
    pub fn set_min_severity(severity: LogSeverity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    pub fn min_severity() -> LogSeverity {
        severity_from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Source module (e.g., "stereo3d::PoseTracker")
    /// * `message` - Log message
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if !enabled(severity) {
            return;
        }
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error!, engine_err! and engine_bail!.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if !enabled(severity) {
            return;
        }
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
