//! Rule data model and detection signature indexing.
//!
//! This module handles:
//! - The declarative rule types (detection rules, crawling rules, rule groups)
//! - Normalizing accessors used by every consumer of those rules
//! - Grouping signatures by target object (`index`)
//! - Reading rule documents from disk

mod crawling;
mod detection;
mod index;
mod loader;
mod models;

// Re-export public API
pub use crawling::{CrawlingRule, FuzzingParameter, TargetElement};
pub use detection::{implied_closure, normalize_key};
pub use index::{
    all_http_header_fields_map, all_meta_tags_map, all_page_content_patterns_map,
    all_plugin_calls_map, all_ssl_signatures_map, all_url_micro_signatures_map,
    http_header_fields_map_by_key, DetectionIndex, HeaderIndex, KeyedIndex, SignatureIndex,
};
pub use loader::{load_detection_rules, load_ruleset, load_source_config};
pub use models::{
    DetectionRule, HttpHeaderField, MetaTag, PageContentSignature, PluginCall, PluginParams,
    PluginParamsProperties, RuleGroup, Ruleset, SslSignature, UrlMicroSignature,
};
