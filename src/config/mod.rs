//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (recursion limits, fallback values, markers)
//! - The library `Config` struct and its validation
//! - CLI option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, ConfigValidationError, LogFormat, LogLevel, NumericFallback};
