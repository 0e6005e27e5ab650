//! Application initialization.
//!
//! This module provides the logger setup shared by the CLI binary and by
//! embedding applications that want the crate's log format.
//!
//! All initialization functions return proper error types for error handling.

mod logger;

// Re-export public API
pub use logger::{init_logger, init_logger_with};
