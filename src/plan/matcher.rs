//! Compiled URL conditions for execution plans.
//!
//! Patterns are compiled once per matcher and reused for every URL tested.

use log::warn;
use regex::Regex;

use crate::config::URL_WILDCARD;
use crate::plan::types::{ExecutionPlanItem, SourceConfig};

#[derive(Debug, Clone)]
enum UrlPattern {
    Any,
    Regex(Regex),
    Text(String),
}

impl UrlPattern {
    fn is_match(&self, url: &str) -> bool {
        match self {
            UrlPattern::Any => true,
            UrlPattern::Regex(re) => re.is_match(url),
            UrlPattern::Text(text) => url.contains(text.as_str()),
        }
    }
}

/// The URL patterns of one plan item, compiled.
#[derive(Debug, Clone, Default)]
pub struct UrlMatcher {
    patterns: Vec<UrlPattern>,
}

impl UrlMatcher {
    /// Compiles `patterns` for the plan item labelled `label`.
    ///
    /// Blank patterns are dropped. `*` matches any URL. A pattern that is not
    /// a valid regular expression is kept as a plain substring and a warning
    /// is logged.
    pub fn compile(label: &str, patterns: &[String]) -> Self {
        let patterns = patterns
            .iter()
            .map(|pattern| pattern.trim())
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| {
                if pattern == URL_WILDCARD {
                    return UrlPattern::Any;
                }
                match Regex::new(pattern) {
                    Ok(re) => UrlPattern::Regex(re),
                    Err(e) => {
                        warn!(
                            "Plan item {:?}: invalid URL pattern {:?} ({}), matching as text",
                            label, pattern, e
                        );
                        UrlPattern::Text(pattern.to_string())
                    }
                }
            })
            .collect();
        Self { patterns }
    }

    /// Whether any pattern matches `url`.
    pub fn is_match(&self, url: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(url))
    }

    /// Number of usable patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no usable pattern remains (such a matcher matches nothing).
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Every plan item of a [`SourceConfig`] with its patterns compiled.
#[derive(Debug, Clone)]
pub struct PlanMatcher<'a> {
    items: Vec<(&'a ExecutionPlanItem, UrlMatcher)>,
}

impl<'a> PlanMatcher<'a> {
    /// Compiles the URL patterns of every plan item in `config`.
    pub fn new(config: &'a SourceConfig) -> Self {
        let items = config
            .execution_plan
            .iter()
            .map(|item| (item, item.url_matcher()))
            .collect();
        Self { items }
    }

    /// Plan items whose URL patterns match `url`, in plan order.
    pub fn items_for(&self, url: &str) -> Vec<&'a ExecutionPlanItem> {
        self.items
            .iter()
            .filter(|(_, matcher)| matcher.is_match(url))
            .map(|(item, _)| *item)
            .collect()
    }
}
