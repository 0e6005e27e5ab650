//! Command expression engine.
//!
//! Configuration values that may be "live" (fuzzing inputs, delays,
//! timestamps) are written in a small call syntax:
//!
//! - `random(1, 100)`: uniform integer in `[1, 100]`
//! - `time(unix)`, `time(rfc3339)`, `time(%Y-%m-%d)`: current time
//! - `url()`: the `*` placeholder
//! - calls nest: `random(1, time(unix))`
//!
//! Any text that is not a call to a known command evaluates to itself.
//! Parsing produces an [`EncodedCmd`] tree; evaluation reduces it to a
//! string.

mod command;
mod interpreter;
mod numeric;
mod parser;
mod random;
mod time;

// Re-export public API
pub use command::{Command, CommandTable, EncodedCmd};
pub use interpreter::Interpreter;
pub use numeric::{
    get_float, get_int, interpret_cmd, is_number, parse_cmd, try_get_float, try_get_int,
};
pub use random::{OsRandom, RandomSource, SeededRandom};

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
