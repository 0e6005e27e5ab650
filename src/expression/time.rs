//! Rendering for the `time` command.
//!
//! Keywords (case-insensitive):
//! - `unix`: seconds since the epoch
//! - `unixnano`: nanoseconds since the epoch
//! - `rfc3339`: RFC 3339 timestamp with second precision
//! - `now`: default human-readable local time
//!
//! Anything else is a chrono strftime pattern such as `%Y-%m-%d`.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, SecondsFormat};

use crate::config::{
    TIME_KEYWORD_NOW, TIME_KEYWORD_RFC3339, TIME_KEYWORD_UNIX, TIME_KEYWORD_UNIX_NANO,
};
use crate::error_handling::ExprError;

const COMMAND: &str = "time";

/// Renders the current local time according to `format`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `format` is neither a keyword nor a usable
/// strftime pattern.
pub(crate) fn render_time(format: &str) -> Result<String, ExprError> {
    render_at(&Local::now(), format)
}

/// Current time in the default human-readable layout.
pub(crate) fn now_string() -> String {
    Local::now().to_string()
}

fn render_at(now: &DateTime<Local>, format: &str) -> Result<String, ExprError> {
    match format.trim().to_lowercase().as_str() {
        TIME_KEYWORD_UNIX => Ok(now.timestamp().to_string()),
        TIME_KEYWORD_UNIX_NANO => now
            .timestamp_nanos_opt()
            .map(|nanos| nanos.to_string())
            .ok_or_else(|| invalid("current time does not fit in nanoseconds")),
        TIME_KEYWORD_RFC3339 => Ok(now.to_rfc3339_opts(SecondsFormat::Secs, false)),
        TIME_KEYWORD_NOW => Ok(now.to_string()),
        _ => render_pattern(now, format),
    }
}

/// A pattern is usable when every specifier is valid and at least one of
/// them renders a time field; text with no specifiers is rejected.
fn render_pattern(now: &DateTime<Local>, pattern: &str) -> Result<String, ExprError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid(&format!("invalid time format: {}", pattern)));
    }
    if !items
        .iter()
        .any(|item| matches!(item, Item::Numeric(..) | Item::Fixed(_)))
    {
        return Err(invalid(&format!(
            "time format has no time fields: {}",
            pattern
        )));
    }

    let mut rendered = String::new();
    write!(rendered, "{}", now.format_with_items(items.iter()))
        .map_err(|_| invalid(&format!("time format cannot be rendered: {}", pattern)))?;
    Ok(rendered)
}

fn invalid(message: &str) -> ExprError {
    ExprError::InvalidArgument {
        command: COMMAND,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let now = fixed_time();
        assert_eq!(
            render_at(&now, "UNIX").unwrap(),
            now.timestamp().to_string()
        );
        assert_eq!(
            render_at(&now, " UnixNano ").unwrap(),
            now.timestamp_nanos_opt().unwrap().to_string()
        );
    }

    #[test]
    fn test_rfc3339_keyword() {
        let now = fixed_time();
        let rendered = render_at(&now, "rfc3339").unwrap();
        assert!(rendered.starts_with("2024-03-09T14:05:07"));
        assert!(DateTime::parse_from_rfc3339(&rendered).is_ok());
    }

    #[test]
    fn test_strftime_pattern() {
        let now = fixed_time();
        assert_eq!(render_at(&now, "%Y-%m-%d").unwrap(), "2024-03-09");
        assert_eq!(render_at(&now, "at %H:%M").unwrap(), "at 14:05");
    }

    #[test]
    fn test_pattern_without_fields_is_rejected() {
        let now = fixed_time();
        let err = render_at(&now, "bogus-format").unwrap_err();
        assert!(matches!(
            err,
            ExprError::InvalidArgument { command: "time", .. }
        ));
    }

    #[test]
    fn test_invalid_specifier_is_rejected() {
        let now = fixed_time();
        assert!(render_at(&now, "%Y-%Q").is_err());
    }
}
