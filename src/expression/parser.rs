//! Command expression parser.
//!
//! Turns text such as `random(1, time(unix))` into an [`EncodedCmd`] tree.
//! Text that does not start with a known command name is a literal.

use log::trace;

use crate::error_handling::ExprError;
use crate::expression::command::{CommandTable, EncodedCmd};

/// Parses `command` at nesting level `depth`.
///
/// # Arguments
///
/// * `table` - Command names recognized by the parser
/// * `command` - Expression text (surrounding whitespace is ignored)
/// * `depth` - Nesting level of this call; top-level calls pass 0
/// * `max_depth` - Deepest nesting level accepted
///
/// # Errors
///
/// * `RecursionLimitExceeded` if `depth > max_depth`, checked before any
///   other work so the whole parse is aborted
/// * `UnbalancedExpression` if a known command's argument list has unmatched
///   quotes or parentheses
///
/// Text that is not shaped like a call (no `(`, or not ending in `)`) is
/// returned whole as a literal, even when it starts with a command name.
pub(crate) fn parse_with(
    table: &CommandTable,
    command: &str,
    depth: usize,
    max_depth: usize,
) -> Result<EncodedCmd, ExprError> {
    if depth > max_depth {
        return Err(ExprError::RecursionLimitExceeded {
            depth,
            max: max_depth,
        });
    }

    let command = command.trim();
    let Some(resolved) = table.resolve(command) else {
        return Ok(EncodedCmd::literal(command));
    };
    // Without the `name(...)` shape the whole text is plain text
    let Some(open) = command.find('(') else {
        return Ok(EncodedCmd::literal(command));
    };
    if !command.ends_with(')') {
        return Ok(EncodedCmd::literal(command));
    }

    let params = split_params(&command[open + 1..command.len() - 1])?;
    trace!(
        "parsed {} call at depth {} with {} argument(s)",
        resolved.name(),
        depth,
        params.len()
    );

    let mut args = Vec::with_capacity(params.len());
    for param in params {
        if table.resolve(&param).is_some() {
            let mut nested = parse_with(table, &param, depth + 1, max_depth)?;
            nested.arg_value = param;
            args.push(nested);
        } else {
            args.push(EncodedCmd::literal(&param));
        }
    }

    Ok(EncodedCmd::command(resolved, args))
}

/// Splits a parameter list on top-level commas.
///
/// Commas inside double quotes or inside nested parentheses are content.
/// Inside quotes a backslash escapes the next character, so `\"` does not
/// end the quoted span. Each parameter is returned trimmed, quotes included.
/// An empty (or all-whitespace) list yields no parameters.
///
/// # Errors
///
/// Returns `UnbalancedExpression` if a quote is left open, a parenthesis is
/// left open, or a `)` closes nothing.
pub(crate) fn split_params(params: &str) -> Result<Vec<String>, ExprError> {
    if params.trim().is_empty() {
        return Ok(Vec::new());
    }

    let unbalanced = || ExprError::UnbalancedExpression(params.to_string());
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut level: usize = 0;

    for ch in params.chars() {
        if escaped {
            escaped = false;
            current.push(ch);
            continue;
        }
        match ch {
            '\\' if in_quotes => {
                escaped = true;
                current.push(ch);
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '(' if !in_quotes => {
                level += 1;
                current.push(ch);
            }
            ')' if !in_quotes => {
                level = level.checked_sub(1).ok_or_else(unbalanced)?;
                current.push(ch);
            }
            ',' if !in_quotes && level == 0 => {
                out.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if in_quotes || level != 0 {
        return Err(unbalanced());
    }

    out.push(current.trim().to_string());
    Ok(out)
}
