/// Occlusion3D Engine - global logging facade
///
/// The culling core itself keeps no global state: every frame is computed
/// from explicit inputs. The only process-wide state is the logger and its
/// minimum severity, stored behind an RwLock so a host can swap the sink at
/// any time.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger state storage
static LOGGER_STATE: OnceLock<LoggerState> = OnceLock::new();

/// Minimum severity used until `set_min_severity` is called
const DEFAULT_MIN_SEVERITY: LogSeverity = LogSeverity::Info;

struct LoggerState {
    logger: RwLock<Box<dyn Logger>>,
    min_severity: RwLock<LogSeverity>,
}

impl LoggerState {
    fn new() -> Self {
        Self {
            logger: RwLock::new(Box::new(DefaultLogger)),
            min_severity: RwLock::new(DEFAULT_MIN_SEVERITY),
        }
    }
}

fn state() -> &'static LoggerState {
    LOGGER_STATE.get_or_init(LoggerState::new)
}

// ===== PUBLIC API =====

/// Engine facade for the global logger.
///
/// # Example
///
/// ```no_run
/// use occlusion_3d_engine::occlusion3d::{Engine, log::{Logger, LogEntry, LogSeverity}};
///
/// struct HostLogger;
/// impl Logger for HostLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Forward to the host...
///     }
/// }
///
/// Engine::set_logger(HostLogger);
/// Engine::set_min_severity(LogSeverity::Trace);
/// ```
pub struct Engine;

impl Engine {
    /// Replace the current logger.
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = state().logger.write() {
            *lock = Box::new(logger);
        }
    }

    /// Restore the DefaultLogger and the default minimum severity.
    pub fn reset_logger() {
        if let Ok(mut lock) = state().logger.write() {
            *lock = Box::new(DefaultLogger);
        }
        Self::set_min_severity(DEFAULT_MIN_SEVERITY);
    }

    /// Entries below this severity are dropped before reaching the logger.
    pub fn set_min_severity(severity: LogSeverity) {
        if let Ok(mut lock) = state().min_severity.write() {
            *lock = severity;
        }
    }

    /// Current minimum severity.
    pub fn min_severity() -> LogSeverity {
        state().min_severity.read()
            .map(|lock| *lock)
            .unwrap_or(DEFAULT_MIN_SEVERITY)
    }

    /// Internal logging method (no file:line).
    ///
    /// Used by engine_trace!, engine_debug!, engine_info! and engine_warn!.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Internal logging method with file:line information.
    ///
    /// Used by engine_error!, engine_err! and engine_bail!.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if severity < Self::min_severity() {
            return;
        }
        if let Ok(lock) = state().logger.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
