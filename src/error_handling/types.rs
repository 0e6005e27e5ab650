//! Error type definitions.
//!
//! This module defines the error types used throughout the crate.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors produced while parsing or evaluating a command expression.
///
/// None of these are retried internally. The caller decides whether to skip
/// the affected crawl step, substitute a default or abort.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// The expression nests deeper than the configured maximum.
    #[error("exceeded maximum recursion depth ({depth} > {max})")]
    RecursionLimitExceeded {
        /// Depth at which parsing was attempted
        depth: usize,
        /// Configured maximum depth
        max: usize,
    },

    /// Quotes or parentheses are not balanced.
    #[error("unmatched quotes or parentheses in expression: {0}")]
    UnbalancedExpression(String),

    /// A built-in command received the wrong number of arguments.
    ///
    /// `fallback` holds a best-effort value for commands that can still
    /// produce one (the `time` command renders the current time). Callers
    /// must still treat this as a failure.
    #[error("{command} command expects {expected} argument(s), got {got}")]
    ArgumentCountMismatch {
        /// Command name
        command: &'static str,
        /// Human-readable expected arity
        expected: &'static str,
        /// Number of arguments supplied
        got: usize,
        /// Best-effort value produced despite the error
        fallback: Option<String>,
    },

    /// An argument could not be converted to what the command requires.
    #[error("invalid argument for {command}: {message}")]
    InvalidArgument {
        /// Command name
        command: &'static str,
        /// Description of the problem
        message: String,
    },

    /// A node carries a token that is not in the dispatch table.
    #[error("unknown command token: {0}")]
    UnknownToken(i32),

    /// The random source could not produce a value.
    #[error("random source failure: {0}")]
    RandomSource(String),
}

impl ExprError {
    /// Returns the best-effort value carried alongside the error, if any.
    pub fn fallback_value(&self) -> Option<&str> {
        match self {
            ExprError::ArgumentCountMismatch { fallback, .. } => fallback.as_deref(),
            _ => None,
        }
    }
}

/// Errors produced while reading rule documents from disk.
#[derive(Error, Debug)]
pub enum RuleLoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was being read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected document.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// Path that was being parsed
        path: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The file is not valid YAML for the expected document.
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        /// Path that was being parsed
        path: String,
        /// Underlying parse error
        #[source]
        source: serde_yaml::Error,
    },

    /// The file extension does not name a supported format.
    #[error("unsupported rule file format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}
