//! Numeric helpers over the process-wide default interpreter.

use std::sync::LazyLock;

use log::warn;

use crate::config::FAIL_OPEN_NUMERIC_DEFAULT;
use crate::error_handling::ExprError;
use crate::expression::command::EncodedCmd;
use crate::expression::interpreter::Interpreter;

static DEFAULT_INTERPRETER: LazyLock<Interpreter> = LazyLock::new(Interpreter::new);

/// Parses `command` with the default interpreter at nesting level `depth`.
pub fn parse_cmd(command: &str, depth: usize) -> Result<EncodedCmd, ExprError> {
    DEFAULT_INTERPRETER.parse_at(command, depth)
}

/// Evaluates a parsed tree with the default interpreter.
pub fn interpret_cmd(node: &EncodedCmd) -> Result<String, ExprError> {
    DEFAULT_INTERPRETER.interpret(node)
}

/// Whether `s` parses as a floating-point number.
pub fn is_number(s: &str) -> bool {
    s.parse::<f64>().is_ok()
}

/// Numeric value of `expr`, or [`FAIL_OPEN_NUMERIC_DEFAULT`] when it cannot
/// be obtained. The fallback is logged at `warn`.
///
/// Use [`try_get_float`] where a wrong value is worse than no value.
pub fn get_float(expr: &str) -> f64 {
    try_get_float(expr).unwrap_or_else(|e| {
        warn!(
            "Expression {:?} is not numeric ({}), using fail-open default {}",
            expr, e, FAIL_OPEN_NUMERIC_DEFAULT
        );
        FAIL_OPEN_NUMERIC_DEFAULT
    })
}

/// Strict form of [`get_float`].
pub fn try_get_float(expr: &str) -> Result<f64, ExprError> {
    DEFAULT_INTERPRETER.try_get_float(expr)
}

/// [`get_float`] truncated toward zero.
pub fn get_int(expr: &str) -> i64 {
    get_float(expr) as i64
}

/// Strict form of [`get_int`].
pub fn try_get_int(expr: &str) -> Result<i64, ExprError> {
    DEFAULT_INTERPRETER.try_get_int(expr)
}
