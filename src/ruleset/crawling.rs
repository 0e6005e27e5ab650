//! Crawling rules: what to interact with on a page and how to fuzz it.
//!
//! Accessors normalize the way the crawler consumes the fields:
//! - rule names, selectors, parameter names, values and patterns are trimmed
//! - request types are upper-cased (`POST`)
//! - selector and fuzzing types are lower-cased (`css`, `fixed_list`)

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error_handling::ExprError;
use crate::expression::Interpreter;

/// Declarative description of one crawl interaction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrawlingRule {
    /// Human label
    pub rule_name: String,
    /// HTTP method, as written
    #[serde(default)]
    pub request_type: String,
    /// Elements to interact with
    #[serde(default)]
    pub target_elements: Vec<TargetElement>,
    /// Parameters to fuzz
    #[serde(default)]
    pub fuzzing_parameters: Vec<FuzzingParameter>,
}

/// Page element selected for interaction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetElement {
    /// Selector language, e.g. `css` or `xpath`
    pub selector_type: String,
    /// Selector expression
    pub selector: String,
}

/// Request parameter whose values are generated while crawling.
///
/// Each entry of `values` may be a command expression such as
/// `random(1, 100)`; see [`FuzzingParameter::resolve_values`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FuzzingParameter {
    /// Request parameter name
    pub parameter_name: String,
    /// Fuzzing strategy, e.g. `fixed_list` or `pattern`
    pub fuzzing_type: String,
    /// Candidate values; each may be a command expression
    #[serde(default)]
    pub values: Vec<String>,
    /// Generation pattern for pattern-based fuzzing
    #[serde(default)]
    pub pattern: String,
}

impl CrawlingRule {
    /// Trimmed rule name.
    pub fn rule_name(&self) -> &str {
        self.rule_name.trim()
    }

    /// HTTP method, trimmed and upper-cased.
    pub fn request_type(&self) -> String {
        self.request_type.trim().to_uppercase()
    }

    /// Target elements as written.
    pub fn target_elements(&self) -> &[TargetElement] {
        &self.target_elements
    }

    /// Fuzzing parameters as written.
    pub fn fuzzing_parameters(&self) -> &[FuzzingParameter] {
        &self.fuzzing_parameters
    }
}

impl TargetElement {
    /// Selector language, trimmed and lower-cased.
    pub fn selector_type(&self) -> String {
        self.selector_type.trim().to_lowercase()
    }

    /// Trimmed selector.
    pub fn selector(&self) -> &str {
        self.selector.trim()
    }
}

impl FuzzingParameter {
    /// Trimmed parameter name.
    pub fn parameter_name(&self) -> &str {
        self.parameter_name.trim()
    }

    /// Fuzzing strategy, trimmed and lower-cased.
    pub fn fuzzing_type(&self) -> String {
        self.fuzzing_type.trim().to_lowercase()
    }

    /// Values, each trimmed.
    pub fn values(&self) -> Vec<String> {
        self.values.iter().map(|v| v.trim().to_string()).collect()
    }

    /// Trimmed pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.trim()
    }

    /// Evaluates every value as a command expression.
    ///
    /// Plain values come back unchanged; calls such as `time(unix)` are
    /// replaced by their result. Fresh values are produced on every call.
    ///
    /// # Errors
    ///
    /// The first expression error encountered; values are not partially
    /// returned.
    pub fn resolve_values(&self, interpreter: &Interpreter) -> Result<Vec<String>, ExprError> {
        let resolved = self
            .values()
            .iter()
            .map(|value| interpreter.evaluate(value))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "Resolved {} value(s) for fuzzing parameter {:?}",
            resolved.len(),
            self.parameter_name()
        );
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawling_rule_accessors() {
        let rule = CrawlingRule {
            rule_name: " Crawl Social Media ".to_string(),
            request_type: " post ".to_string(),
            target_elements: vec![TargetElement {
                selector_type: "css".to_string(),
                selector: ".login".to_string(),
            }],
            ..Default::default()
        };
        assert_eq!(rule.rule_name(), "Crawl Social Media");
        assert_eq!(rule.request_type(), "POST");
        assert_eq!(rule.target_elements()[0].selector, ".login");
        assert!(rule.fuzzing_parameters().is_empty());
    }

    #[test]
    fn test_target_element_accessors() {
        let te = TargetElement {
            selector_type: " CSS ".to_string(),
            selector: " #submit ".to_string(),
        };
        assert_eq!(te.selector_type(), "css");
        assert_eq!(te.selector(), "#submit");

        for (raw, expected) in [
            (" #submit ", "#submit"),
            ("#submit", "#submit"),
            (" ", ""),
            (" @submit ", "@submit"),
        ] {
            let te = TargetElement {
                selector: raw.to_string(),
                ..Default::default()
            };
            assert_eq!(te.selector(), expected, "selector {:?}", raw);
        }
    }

    #[test]
    fn test_fuzzing_parameter_accessors() {
        let fp = FuzzingParameter {
            parameter_name: " Email ".to_string(),
            fuzzing_type: " PATTERN_BASED ".to_string(),
            values: vec![" test1 ".to_string(), "test2".to_string()],
            pattern: " .*@example.com ".to_string(),
        };
        assert_eq!(fp.parameter_name(), "Email");
        assert_eq!(fp.fuzzing_type(), "pattern_based");
        assert_eq!(fp.values(), vec!["test1", "test2"]);
        assert_eq!(fp.pattern(), ".*@example.com");
    }

    #[test]
    fn test_resolve_values_evaluates_expressions() {
        let fp = FuzzingParameter {
            parameter_name: "id".to_string(),
            fuzzing_type: "fixed_list".to_string(),
            values: vec![
                " admin ".to_string(),
                "random(100, 200)".to_string(),
                "url()".to_string(),
            ],
            pattern: String::new(),
        };
        let resolved = fp.resolve_values(&Interpreter::new()).unwrap();
        assert_eq!(resolved[0], "admin");
        let n: i64 = resolved[1].parse().unwrap();
        assert!((100..=200).contains(&n));
        assert_eq!(resolved[2], "*");
    }

    #[test]
    fn test_resolve_values_propagates_errors() {
        let fp = FuzzingParameter {
            values: vec!["ok".to_string(), "random(5, 1)".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            fp.resolve_values(&Interpreter::new()),
            Err(ExprError::InvalidArgument { .. })
        ));
    }
}
