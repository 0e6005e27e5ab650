//! Command tree evaluation.

use std::sync::Arc;

use log::{debug, warn};

use crate::config::{Config, NumericFallback, DEFAULT_MAX_RECURSION_DEPTH, URL_WILDCARD};
use crate::error_handling::ExprError;
use crate::expression::command::{Command, CommandTable, EncodedCmd};
use crate::expression::parser::parse_with;
use crate::expression::random::{OsRandom, RandomSource};
use crate::expression::time::{now_string, render_time};

/// A configured parser and evaluator for command expressions.
///
/// Holds no per-call state; one instance can serve any number of
/// concurrent `parse`/`interpret` calls.
///
/// # Examples
///
/// ```
/// use crawl_rules::expression::Interpreter;
///
/// let interpreter = Interpreter::new();
/// let value = interpreter.evaluate("random(1, 6)").unwrap();
/// let n: i64 = value.parse().unwrap();
/// assert!((1..=6).contains(&n));
/// ```
#[derive(Debug, Clone)]
pub struct Interpreter {
    table: CommandTable,
    max_depth: usize,
    random: Arc<dyn RandomSource>,
    numeric_fallback: NumericFallback,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter with the built-in commands, the default depth
    /// limit, the OS random source and the fail-open numeric policy.
    pub fn new() -> Self {
        Self {
            table: CommandTable::default(),
            max_depth: DEFAULT_MAX_RECURSION_DEPTH,
            random: Arc::new(OsRandom),
            numeric_fallback: NumericFallback::default(),
        }
    }

    /// Creates an interpreter using the limits and policies in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_depth: config.max_recursion_depth,
            numeric_fallback: config.numeric_fallback,
            ..Self::new()
        }
    }

    /// Replaces the random source.
    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Replaces the command table.
    pub fn with_command_table(mut self, table: CommandTable) -> Self {
        self.table = table;
        self
    }

    /// Sets the deepest nesting level accepted by the parser.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the numeric fallback policy used by `resolve_float`/`resolve_int`.
    pub fn with_numeric_fallback(mut self, policy: NumericFallback) -> Self {
        self.numeric_fallback = policy;
        self
    }

    /// Deepest nesting level accepted by the parser.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The command table used for name resolution.
    pub fn command_table(&self) -> &CommandTable {
        &self.table
    }

    /// Parses a top-level expression.
    pub fn parse(&self, command: &str) -> Result<EncodedCmd, ExprError> {
        self.parse_at(command, 0)
    }

    /// Parses an expression as if it were nested `depth` levels deep.
    pub fn parse_at(&self, command: &str, depth: usize) -> Result<EncodedCmd, ExprError> {
        parse_with(&self.table, command, depth, self.max_depth)
    }

    /// Evaluates a parsed tree to its string value.
    ///
    /// # Errors
    ///
    /// * `UnknownToken` if a node's token is neither `-1` nor a built-in
    /// * `ArgumentCountMismatch` / `InvalidArgument` from the command handlers
    pub fn interpret(&self, node: &EncodedCmd) -> Result<String, ExprError> {
        if node.is_literal() {
            return Ok(node.arg_value.clone());
        }
        match node.as_command() {
            Some(Command::Random) => self.random_command(&node.args),
            Some(Command::Time) => self.time_command(&node.args),
            Some(Command::Url) => Ok(URL_WILDCARD.to_string()),
            None => Err(ExprError::UnknownToken(node.token)),
        }
    }

    /// Parses and evaluates `expr` in one step.
    pub fn evaluate(&self, expr: &str) -> Result<String, ExprError> {
        let node = self.parse(expr)?;
        self.interpret(&node)
    }

    /// Converts `expr` to a number, evaluating it first when it is not a
    /// plain numeric literal.
    ///
    /// # Errors
    ///
    /// Any parse or evaluation error, or `InvalidArgument` if the evaluated
    /// value is not a number.
    pub fn try_get_float(&self, expr: &str) -> Result<f64, ExprError> {
        if let Ok(value) = expr.parse::<f64>() {
            return Ok(value);
        }
        let value = self.evaluate(expr)?;
        value.parse::<f64>().map_err(|_| ExprError::InvalidArgument {
            command: "number",
            message: format!("expression {:?} evaluated to non-numeric {:?}", expr, value),
        })
    }

    /// Integer form of [`Interpreter::try_get_float`] (truncates toward zero).
    pub fn try_get_int(&self, expr: &str) -> Result<i64, ExprError> {
        self.try_get_float(expr).map(|value| value as i64)
    }

    /// Like [`Interpreter::try_get_float`], applying the configured
    /// [`NumericFallback`] on failure.
    pub fn resolve_float(&self, expr: &str) -> Result<f64, ExprError> {
        match (self.try_get_float(expr), self.numeric_fallback) {
            (Ok(value), _) => Ok(value),
            (Err(e), NumericFallback::FailOpen(default)) => {
                warn!(
                    "Expression {:?} is not numeric ({}), using fail-open default {}",
                    expr, e, default
                );
                Ok(default)
            }
            (Err(e), NumericFallback::Strict) => Err(e),
        }
    }

    /// Integer form of [`Interpreter::resolve_float`] (truncates toward zero).
    pub fn resolve_int(&self, expr: &str) -> Result<i64, ExprError> {
        self.resolve_float(expr).map(|value| value as i64)
    }

    fn random_command(&self, args: &[EncodedCmd]) -> Result<String, ExprError> {
        if args.len() != 2 {
            return Err(ExprError::ArgumentCountMismatch {
                command: Command::Random.name(),
                expected: "2",
                got: args.len(),
                fallback: None,
            });
        }

        let min_arg = self.interpret(&args[0])?;
        let max_arg = self.interpret(&args[1])?;
        let min = parse_bound("min", &min_arg)?;
        let max = parse_bound("max", &max_arg)?;
        if min >= max {
            return Err(ExprError::InvalidArgument {
                command: Command::Random.name(),
                message: format!("min ({}) must be less than max ({})", min, max),
            });
        }

        let value = self.random.int_in_range(min, max)?;
        debug!("random({}, {}) -> {}", min, max, value);
        Ok(value.to_string())
    }

    fn time_command(&self, args: &[EncodedCmd]) -> Result<String, ExprError> {
        let Some(format_arg) = args.first() else {
            return Err(ExprError::ArgumentCountMismatch {
                command: Command::Time.name(),
                expected: "at least 1",
                got: 0,
                fallback: Some(now_string()),
            });
        };
        let format = self.interpret(format_arg)?;
        render_time(&format)
    }
}

fn parse_bound(which: &str, raw: &str) -> Result<i64, ExprError> {
    raw.parse::<i64>().map_err(|_| ExprError::InvalidArgument {
        command: Command::Random.name(),
        message: format!("invalid {} argument: {:?}", which, raw),
    })
}
