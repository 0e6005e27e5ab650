//! Configuration constants.
//!
//! This module defines the constants used by the expression engine and the
//! signature index, including recursion limits, fallback values and the
//! literal markers recognized in rule documents.

// Expression engine limits
/// Maximum nesting depth for command expressions.
/// `random(1, random(2, time(unix)))` has a nesting depth of 2.
/// Parsing fails as a whole once a nested call would go deeper than this.
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 16;

/// Token carried by literal (non-command) nodes.
pub const TOKEN_LITERAL: i32 = -1;

/// Value returned by the fail-open numeric helpers when an expression
/// cannot be turned into a number.
pub const FAIL_OPEN_NUMERIC_DEFAULT: f64 = 1.0;

// Command output
/// Placeholder produced by the `url` command, meaning "any URL".
pub const URL_WILDCARD: &str = "*";

// Time command keywords (matched case-insensitively)
/// `time(unix)`: seconds since the epoch
pub const TIME_KEYWORD_UNIX: &str = "unix";
/// `time(unixnano)`: nanoseconds since the epoch
pub const TIME_KEYWORD_UNIX_NANO: &str = "unixnano";
/// `time(rfc3339)`: RFC 3339 timestamp
pub const TIME_KEYWORD_RFC3339: &str = "rfc3339";
/// `time(now)`: default human-readable local time
pub const TIME_KEYWORD_NOW: &str = "now";

// Signature index
/// Header key that marks a rule field as applying to every response header.
pub const HEADER_KEY_WILDCARD: &str = "*";
