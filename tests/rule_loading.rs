//! End-to-end tests: rule and source configuration files on disk through to
//! indices, plan lookups and resolved fuzzing values.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use crawl_rules::expression::SeededRandom;
use crawl_rules::ruleset::{
    all_url_micro_signatures_map, load_detection_rules, load_ruleset, load_source_config,
};
use crawl_rules::{Interpreter, RuleLoadError};

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

const RULESET_YAML: &str = r#"
name: web
rule_groups:
  - group_name: cms
    crawling_rules:
      - rule_name: " Search form "
        request_type: get
        target_elements:
          - selector_type: CSS
            selector: "form#search"
        fuzzing_parameters:
          - parameter_name: q
            fuzzing_type: Fixed_List
            values: ["admin", "random(1, 100)", "time(unix)"]
    detection_rules:
      - rule_name: wordpress login
        object_name: WordPress
        url_micro_signatures:
          - signature: /wp-login.php
            confidence: 0.9
"#;

#[test]
fn test_ruleset_file_to_index() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = write(&dir, "web.yml", RULESET_YAML);

    let rules = load_detection_rules(&path).expect("Should load rules");
    let index = all_url_micro_signatures_map(&rules);
    assert_eq!(index.get("wordpress").unwrap()[0].signature, "/wp-login.php");
}

#[test]
fn test_crawling_rule_values_resolve() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = write(&dir, "web.yaml", RULESET_YAML);

    let ruleset = load_ruleset(&path).expect("Should load ruleset");
    let crawling = ruleset.crawling_rules();
    assert_eq!(crawling.len(), 1);
    assert_eq!(crawling[0].rule_name(), "Search form");
    assert_eq!(crawling[0].request_type(), "GET");
    assert_eq!(crawling[0].target_elements()[0].selector_type(), "css");

    let param = &crawling[0].fuzzing_parameters()[0];
    assert_eq!(param.fuzzing_type(), "fixed_list");

    let interpreter = Interpreter::new().with_random_source(Arc::new(SeededRandom::new(1)));
    let values = param.resolve_values(&interpreter).expect("Should resolve");
    assert_eq!(values[0], "admin");
    let n: i64 = values[1].parse().expect("random value is an integer");
    assert!((1..=100).contains(&n));
    assert!(values[2].parse::<i64>().is_ok());
}

#[test]
fn test_source_config_plan_lookup() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = write(
        &dir,
        "source.json",
        r#"{
            "version": "1",
            "format_version": "1",
            "source_name": "example",
            "created_at": "2024-05-01T12:00:00Z",
            "crawling_config": {"site": "https://example.com"},
            "execution_plan": [
                {"label": "login", "conditions": {"url_patterns": ["/wp-login\\.php$"]}, "rulesets": ["web"]},
                {"label": "all", "conditions": {"url_patterns": ["*"]}, "rule_groups": ["cms"]}
            ]
        }"#,
    );

    let config = load_source_config(&path).expect("Should load source config");
    assert!(config.created_at.is_some());

    let labels: Vec<&str> = config
        .plan_items_for("https://example.com/wp-login.php")
        .iter()
        .map(|item| item.label())
        .collect();
    assert_eq!(labels, vec!["login", "all"]);

    let labels: Vec<&str> = config
        .plan_items_for("https://example.com/about")
        .iter()
        .map(|item| item.label())
        .collect();
    assert_eq!(labels, vec!["all"]);
}

#[test]
fn test_load_errors_name_the_file() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = write(&dir, "broken.yaml", "rule_groups: [unterminated");

    let err = load_ruleset(&path).unwrap_err();
    assert!(matches!(err, RuleLoadError::Yaml { .. }));
    assert!(err.to_string().contains("broken.yaml"));
}
