//! Integration tests for detection signature indexing.

use crawl_rules::ruleset::{
    all_http_header_fields_map, all_page_content_patterns_map, all_ssl_signatures_map,
    http_header_fields_map_by_key, HttpHeaderField, PageContentSignature, SslSignature,
};
use crawl_rules::{DetectionIndex, DetectionRule};

fn rules_fixture() -> Vec<DetectionRule> {
    serde_json::from_str(
        r#"[
        {
            "rule_name": "nginx server header",
            "object_name": "Nginx",
            "http_header_fields": [
                {"key": "Server", "value": ["nginx"], "confidence": 0.9},
                {"key": "*", "value": ["nginx"], "confidence": 0.3}
            ],
            "ssl_signatures": [{"key": "issuer", "value": ["nginx"], "confidence": 0.2}]
        },
        {
            "rule_name": "openresty",
            "object_name": " nginx ",
            "http_header_fields": [{"key": " server ", "value": [" openresty "], "confidence": 0.8}]
        },
        {
            "rule_name": "drupal body",
            "object_name": "Drupal",
            "page_content_patterns": [
                {"key": "body", "signature": ["Drupal.settings"], "text": ["Powered by Drupal"], "confidence": 0.6}
            ]
        }
    ]"#,
    )
    .expect("fixture is valid JSON")
}

#[test]
fn test_header_index_by_server_key() {
    let index = http_header_fields_map_by_key(&rules_fixture(), "server");
    assert_eq!(index.keys().collect::<Vec<_>>(), vec!["nginx"]);

    let fields = index.get("Nginx").unwrap().get("server").unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].value, vec!["nginx"]);
    assert_eq!(fields[1].key, "server");
    assert_eq!(fields[1].value, vec!["openresty"]);
}

#[test]
fn test_wildcard_header_index() {
    let index = all_http_header_fields_map(&rules_fixture());
    let wildcard = index.get("nginx").unwrap().get("*").unwrap();
    assert_eq!(
        wildcard,
        &vec![HttpHeaderField {
            key: "*".to_string(),
            value: vec!["nginx".to_string()],
            confidence: 0.3,
        }]
    );
}

#[test]
fn test_single_level_indices_register_every_object() {
    let rules = rules_fixture();
    let ssl = all_ssl_signatures_map(&rules);
    assert_eq!(ssl.keys().collect::<Vec<_>>(), vec!["nginx", "drupal"]);
    assert_eq!(
        ssl.get("nginx").unwrap(),
        &vec![SslSignature {
            key: "issuer".to_string(),
            value: vec!["nginx".to_string()],
            confidence: 0.2,
        }]
    );
    assert!(ssl.get("drupal").unwrap().is_empty());

    let content = all_page_content_patterns_map(&rules);
    assert_eq!(
        content.get("drupal").unwrap(),
        &vec![PageContentSignature {
            key: "body".to_string(),
            signature: vec!["Drupal.settings".to_string()],
            text: vec!["Powered by Drupal".to_string()],
            confidence: 0.6,
        }]
    );
}

#[test]
fn test_detection_index_serializes_to_json() {
    let index = DetectionIndex::build(&rules_fixture());
    let value = serde_json::to_value(&index).unwrap();
    assert!(value["headers"]["nginx"]["*"].is_array());
    assert_eq!(value["page_content"]["drupal"][0]["key"], "body");
}
