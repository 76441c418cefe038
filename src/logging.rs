//! Logging for the measurement engine
//!
//! Verbose-gated diagnostic output with timestamps and optional color.
//! Probe components receive a shared `Logger` and narrate scheduling
//! decisions (constraint mismatches, spacing, size escalation) at debug
//! level so a run can be reconstructed from its log.

use chrono::Utc;
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Debug level - verbose run narration
    Debug = 0,
    /// Info level - general progress
    Info = 1,
    /// Warning level - recoverable problems (failed samples, rejected batches)
    Warn = 2,
    /// Error level - probe or configuration failures
    Error = 3,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Simple leveled logger shared by the orchestrator and probe components
#[derive(Debug, Clone)]
pub struct Logger {
    /// Minimum log level to output
    min_level: LogLevel,
    /// Whether to use colored output
    use_color: bool,
}

impl Logger {
    pub fn new(verbose: bool, use_color: bool) -> Self {
        Self {
            min_level: if verbose { LogLevel::Debug } else { LogLevel::Warn },
            use_color,
        }
    }

    /// A logger that swallows everything below error level
    pub fn quiet() -> Self {
        Self {
            min_level: LogLevel::Error,
            use_color: false,
        }
    }

    pub fn verbose(&self) -> bool {
        self.min_level <= LogLevel::Debug
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message.as_ref());
    }

    fn log(&self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let tag = if self.use_color {
            match level {
                LogLevel::Debug => level.as_str().cyan().to_string(),
                LogLevel::Info => level.as_str().green().to_string(),
                LogLevel::Warn => level.as_str().yellow().to_string(),
                LogLevel::Error => level.as_str().red().bold().to_string(),
            }
        } else {
            level.as_str().to_string()
        };
        if level >= LogLevel::Warn {
            eprintln!("[{}] [{}] {}", timestamp, tag, message);
        } else {
            println!("[{}] [{}] {}", timestamp, tag, message);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_verbose_flag() {
        assert!(Logger::new(true, false).verbose());
        assert!(!Logger::new(false, false).verbose());
        assert!(!Logger::quiet().verbose());
    }
}
