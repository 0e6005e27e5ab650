//! Configuration types and CLI option enums.
//!
//! This module defines the library configuration struct and the enums shared
//! with command-line argument parsing.

use std::fmt;

use clap::ValueEnum;

use crate::config::constants::{DEFAULT_MAX_RECURSION_DEPTH, FAIL_OPEN_NUMERIC_DEFAULT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// What the numeric helpers do when an expression does not yield a number.
///
/// `FailOpen` substitutes the carried value (and logs a warning); `Strict`
/// surfaces the failure to the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumericFallback {
    /// Substitute this value on failure
    FailOpen(f64),
    /// Report the failure
    Strict,
}

impl Default for NumericFallback {
    fn default() -> Self {
        NumericFallback::FailOpen(FAIL_OPEN_NUMERIC_DEFAULT)
    }
}

/// Validation failure for a single configuration field.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// Human-readable description of the problem
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use crawl_rules::Config;
///
/// let config = Config {
///     max_recursion_depth: 8,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Maximum nesting depth accepted by the expression parser
    pub max_recursion_depth: usize,

    /// Policy used by `get_float`/`get_int` when an expression is not numeric
    pub numeric_fallback: NumericFallback,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            numeric_fallback: NumericFallback::default(),
        }
    }
}

impl Config {
    /// Checks that every field holds a usable value.
    ///
    /// # Errors
    ///
    /// Returns the first offending field together with a message describing
    /// the accepted range.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_recursion_depth == 0 {
            return Err(ConfigValidationError {
                field: "max_recursion_depth",
                message: "must be greater than 0".to_string(),
            });
        }
        if let NumericFallback::FailOpen(value) = self.numeric_fallback {
            if !value.is_finite() {
                return Err(ConfigValidationError {
                    field: "numeric_fallback",
                    message: format!("fail-open value must be finite, got {}", value),
                });
            }
        }
        Ok(())
    }
}
