//! Error handling.
//!
//! This module provides the error types for:
//! - Expression parsing and evaluation (`ExprError`)
//! - Rule document loading (`RuleLoadError`)
//! - Logger setup (`InitializationError`)

mod types;

// Re-export public API
pub use types::{ExprError, InitializationError, RuleLoadError};
