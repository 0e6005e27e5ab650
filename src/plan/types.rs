//! Source configuration and execution plan types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::matcher::{PlanMatcher, UrlMatcher};
use crate::plan::value::CustomValue;

/// Crawl configuration for one source (site).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Version of this source configuration
    pub version: String,
    /// Version of the configuration format
    pub format_version: String,
    /// Author of the configuration
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Free-text description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Name identifying the source
    pub source_name: String,
    /// Where to crawl
    pub crawling_config: CrawlingConfig,
    /// Which rules apply to which URLs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub execution_plan: Vec<ExecutionPlanItem>,
    /// Free-form settings
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, CustomValue>,
}

impl SourceConfig {
    /// Plan items whose URL patterns match `url`, in plan order.
    ///
    /// Use [`SourceConfig::plan_matcher`] when testing many URLs.
    pub fn plan_items_for(&self, url: &str) -> Vec<&ExecutionPlanItem> {
        self.plan_matcher().items_for(url)
    }

    /// Compiles the URL patterns of every plan item once.
    pub fn plan_matcher(&self) -> PlanMatcher<'_> {
        PlanMatcher::new(self)
    }
}

/// Crawl target settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrawlingConfig {
    /// Site root URL
    pub site: String,
}

/// Binds a URL condition to a set of rule references.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutionPlanItem {
    /// Display label
    pub label: String,
    /// When the item applies
    pub conditions: Condition,
    /// Ruleset names to apply
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rulesets: Vec<String>,
    /// Rule group names to apply
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rule_groups: Vec<String>,
    /// Individual rule names to apply
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
    /// Extra named conditions interpreted by the matcher
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_conditions: BTreeMap<String, CustomValue>,
}

/// URL condition of an execution plan item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Condition {
    /// URL patterns (regular expressions) to match against the crawled URL
    pub url_patterns: Vec<String>,
}

impl ExecutionPlanItem {
    /// Trimmed label.
    pub fn label(&self) -> &str {
        self.label.trim()
    }

    /// Compiles this item's URL patterns for repeated matching.
    pub fn url_matcher(&self) -> UrlMatcher {
        UrlMatcher::compile(self.label(), &self.conditions.url_patterns)
    }

    /// Whether any URL pattern matches `url`.
    ///
    /// Patterns are regular expressions. A pattern that does not compile is
    /// used as a plain substring and a warning is logged. `*` matches any URL.
    /// Patterns are compiled on every call; use [`ExecutionPlanItem::url_matcher`]
    /// when testing many URLs.
    pub fn matches_url(&self, url: &str) -> bool {
        self.url_matcher().is_match(url)
    }
}
