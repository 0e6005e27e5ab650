//! Source configuration and execution plans.
//!
//! This module provides:
//! - `SourceConfig`: per-site crawl configuration
//! - `ExecutionPlanItem`: URL condition bound to ruleset/group/rule names
//! - `PlanMatcher` / `UrlMatcher`: URL conditions compiled once for reuse
//! - `CustomValue`: typed value for free-form configuration bags

mod matcher;
mod types;
mod value;

// Re-export public API
pub use matcher::{PlanMatcher, UrlMatcher};
pub use types::{Condition, CrawlingConfig, ExecutionPlanItem, SourceConfig};
pub use value::CustomValue;

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_item(label: &str, patterns: &[&str]) -> ExecutionPlanItem {
        ExecutionPlanItem {
            label: label.to_string(),
            conditions: Condition {
                url_patterns: patterns.iter().map(|p| p.to_string()).collect(),
            },
            ..Default::default()
        }
    }

    fn labels(items: Vec<&ExecutionPlanItem>) -> Vec<&str> {
        items.iter().map(|item| item.label()).collect()
    }

    #[test]
    fn test_matches_url_with_regex() {
        let item = plan_item("admin", &[r"^https://example\.com/admin"]);
        assert!(item.matches_url("https://example.com/admin/login"));
        assert!(!item.matches_url("https://example.com/blog"));
    }

    #[test]
    fn test_matches_url_wildcard_and_invalid_pattern() {
        assert!(plan_item("all", &["*"]).matches_url("https://anything.test/"));

        // Unbalanced bracket is not a valid regex and falls back to text
        let item = plan_item("literal", &["/search[q"]);
        assert!(item.matches_url("https://example.com/search[q=1"));
        assert!(!item.matches_url("https://example.com/search"));
    }

    #[test]
    fn test_empty_patterns_match_nothing() {
        assert!(!plan_item("none", &[]).matches_url("https://example.com"));
        assert!(!plan_item("blank", &["  "]).matches_url("https://example.com"));
    }

    #[test]
    fn test_url_matcher_drops_blank_patterns() {
        let item = plan_item("mixed", &[" ", "^/api/", "*", "/search[q"]);
        let matcher = item.url_matcher();
        assert_eq!(matcher.len(), 3);
        assert!(plan_item("blank", &["", "  "]).url_matcher().is_empty());
    }

    #[test]
    fn test_plan_matcher_is_reusable() {
        let config = SourceConfig {
            execution_plan: vec![
                plan_item("api", &[r"/api/v\d+/"]),
                plan_item("literal", &["/search[q"]),
                plan_item("all", &["*"]),
            ],
            ..Default::default()
        };
        let matcher = config.plan_matcher();
        let urls = [
            "https://example.com/api/v2/users",
            "https://example.com/search[q=rust",
            "https://example.com/about",
        ];
        for url in urls {
            assert_eq!(
                labels(matcher.items_for(url)),
                labels(config.plan_items_for(url))
            );
        }
        assert_eq!(labels(matcher.items_for(urls[0])), vec!["api", "all"]);
        assert_eq!(matcher.items_for(urls[2]).len(), 1);
    }

    #[test]
    fn test_source_config_from_yaml() {
        let yaml = r#"
version: "1.0"
format_version: "1.0"
source_name: example
crawling_config:
  site: https://example.com
execution_plan:
  - label: " Admin pages "
    conditions:
      url_patterns: ["/admin"]
    rulesets: ["core"]
    additional_conditions:
      max_depth: 2
  - label: everything
    conditions:
      url_patterns: ["*"]
custom:
  owner: sec-team
"#;
        let config: SourceConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.crawling_config.site, "https://example.com");
        assert_eq!(config.execution_plan.len(), 2);
        assert_eq!(config.execution_plan[0].label(), "Admin pages");
        assert_eq!(
            config.execution_plan[0]
                .additional_conditions
                .get("max_depth")
                .and_then(CustomValue::as_f64),
            Some(2.0)
        );
        assert_eq!(
            config.custom.get("owner").and_then(CustomValue::as_str),
            Some("sec-team")
        );

        let labels: Vec<&str> = config
            .plan_items_for("https://example.com/admin/users")
            .iter()
            .map(|item| item.label.as_str())
            .collect();
        assert_eq!(labels, vec![" Admin pages ", "everything"]);
        assert_eq!(config.plan_items_for("https://example.com/").len(), 1);
    }
}
