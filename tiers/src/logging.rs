//! Logging for configuration loading.
//!
//! A [`Logger`] is a small value handed to each [`Config`](crate::Config)
//! through its builder. It writes leveled lines to stderr by default, to a
//! log file via [`Logger::to_file`], or into memory via [`Logger::capture`].

use std::env;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

/// Environment variable consulted by [`init_logger`].
pub const LOG_MODE_VAR: &str = "TIERS_LOG_MODE";

/// File name used by [`Logger::to_file`].
pub const LOG_FILE_NAME: &str = "tiers.log";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Debug).
///
/// # Examples
///
/// ```
/// use tiers::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// assert!(LogLevel::Verbose < LogLevel::Debug);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all non-essential output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, and info messages.
    Verbose,
    /// Everything, including debug traces.
    Debug,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
            Self::Debug => write!(f, "debug"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose", "debug" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiers::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("DEBUG").unwrap(), LogLevel::Debug);
    /// assert!(LogLevel::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// Maps a `-v` count to a level: 0 normal, 1 verbose, 2 or more debug.
    #[must_use]
    pub const fn from_verbosity(count: u8) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }
}

#[derive(Debug, Clone)]
enum Sink {
    Stderr,
    File {
        path: PathBuf,
        file: Arc<Mutex<File>>,
    },
    Capture(Arc<Mutex<Vec<String>>>),
}

/// A leveled logger.
///
/// Clones share the same sink, so a captured or file logger can be handed
/// to a [`ConfigBuilder`](crate::ConfigBuilder) and still be inspected.
///
/// # Examples
///
/// ```
/// use tiers::{Logger, LogLevel};
///
/// let logger = Logger::capture(LogLevel::Normal);
/// logger.warn("no configuration file found");
/// logger.info("not recorded at Normal");
/// assert_eq!(logger.captured(), ["WARN: no configuration file found"]);
/// ```
#[derive(Debug, Clone)]
pub struct Logger {
    level: LogLevel,
    sink: Sink,
}

impl Logger {
    /// Creates a stderr logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self {
            level,
            sink: Sink::Stderr,
        }
    }

    /// Creates a logger that appends to `<dir>/<app_name>/tiers.log`.
    ///
    /// The directory is created if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileAccess`] if the directory or file cannot be
    /// created.
    pub fn to_file(dir: &Path, app_name: &str, level: LogLevel) -> Result<Self> {
        let log_dir = dir.join(app_name);
        fs::create_dir_all(&log_dir).map_err(|e| {
            Error::file_access(&log_dir, format!("failed to create log directory: {e}"))
        })?;
        let path = log_dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::file_access(&path, format!("failed to open log file: {e}")))?;
        Ok(Self {
            level,
            sink: Sink::File {
                path,
                file: Arc::new(Mutex::new(file)),
            },
        })
    }

    /// Creates a logger that records lines in memory.
    ///
    /// Read them back with [`Logger::captured`].
    #[must_use]
    pub fn capture(level: LogLevel) -> Self {
        Self {
            level,
            sink: Sink::Capture(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Path of the log file, for file loggers.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        match &self.sink {
            Sink::File { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Lines recorded so far by a capturing logger. Empty for other sinks.
    #[must_use]
    pub fn captured(&self) -> Vec<String> {
        match &self.sink {
            Sink::Capture(lines) => lines.lock().map(|l| l.clone()).unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Logs an error message.
    ///
    /// Error messages are always displayed unless the level is Quiet.
    pub fn error(&self, message: &str) {
        self.emit(LogLevel::Normal, "ERROR", message);
    }

    /// Logs a warning message.
    ///
    /// Warning messages are displayed at Normal level and above.
    pub fn warn(&self, message: &str) {
        self.emit(LogLevel::Normal, "WARN", message);
    }

    /// Logs an informational message.
    ///
    /// Info messages are displayed at Verbose level and above.
    pub fn info(&self, message: &str) {
        self.emit(LogLevel::Verbose, "INFO", message);
    }

    /// Logs a debug message.
    ///
    /// Debug messages are only displayed at Debug level.
    pub fn debug(&self, message: &str) {
        self.emit(LogLevel::Debug, "DEBUG", message);
    }

    fn emit(&self, threshold: LogLevel, tag: &str, message: &str) {
        if self.level < threshold {
            return;
        }
        let line = format!("{tag}: {message}");
        match &self.sink {
            Sink::Stderr => eprintln!("{line}"),
            Sink::File { file, .. } => {
                if let Ok(mut file) = file.lock() {
                    // A failed log write is not worth failing the caller
                    let _ = writeln!(file, "{line}");
                }
            }
            Sink::Capture(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(line);
                }
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

/// Initializes a stderr logger based on environment variables and CLI flags.
///
/// The priority order is:
/// 1. CLI flags (verbosity count / quiet)
/// 2. `TIERS_LOG_MODE` environment variable
/// 3. Default (Normal)
///
/// A non-zero `verbosity` takes precedence over `quiet`.
///
/// # Examples
///
/// ```
/// use tiers::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(1, false).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(2, false).level(), LogLevel::Debug);
/// assert_eq!(init_logger(0, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbosity: u8, quiet: bool) -> Logger {
    if verbosity > 0 {
        return Logger::new(LogLevel::from_verbosity(verbosity));
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    if let Ok(env_value) = env::var(LOG_MODE_VAR) {
        if let Ok(level) = LogLevel::parse(&env_value) {
            return Logger::new(level);
        }
    }

    Logger::new(LogLevel::Normal)
}
