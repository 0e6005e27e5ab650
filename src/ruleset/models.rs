//! Data structures for rule documents.
//!
//! This module contains the declarative rule types:
//! - `DetectionRule`: signatures identifying one target object
//! - the five signature kinds (`HttpHeaderField`, `MetaTag`,
//!   `PageContentSignature`, `UrlMicroSignature`, `SslSignature`)
//! - `PluginCall`: external plugin invocation triggered on a match
//! - `RuleGroup` / `Ruleset`: containers used by rule files
//!
//! Fields hold exactly what the document contained. Use the accessor methods
//! (see `detection.rs`) to get normalized values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::plan::CustomValue;
use crate::ruleset::crawling::CrawlingRule;

/// Declarative description of how to recognize one target.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionRule {
    /// Human label
    pub rule_name: String,
    /// Target being fingerprinted (server, technology, device...)
    pub object_name: String,
    /// Rule/object names implied when this rule matches
    #[serde(default)]
    pub implies: Vec<String>,
    /// Plugins to run when the rule matches
    #[serde(default)]
    pub plugin_calls: Vec<PluginCall>,
    /// Response header signatures
    #[serde(default)]
    pub http_header_fields: Vec<HttpHeaderField>,
    /// `<meta>` tag signatures
    #[serde(default)]
    pub meta_tags: Vec<MetaTag>,
    /// Page body signatures
    #[serde(default)]
    pub page_content_patterns: Vec<PageContentSignature>,
    /// URL fragment signatures
    #[serde(default)]
    pub url_micro_signatures: Vec<UrlMicroSignature>,
    /// TLS fingerprints
    #[serde(default)]
    pub ssl_signatures: Vec<SslSignature>,
}

/// HTTP response header signature.
///
/// A key of `*` applies the values to every header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HttpHeaderField {
    /// Header name, or `*` for any header
    pub key: String,
    /// Accepted header values
    #[serde(default)]
    pub value: Vec<String>,
    /// Match confidence
    #[serde(default)]
    pub confidence: f32,
}

/// `<meta>` tag signature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetaTag {
    /// `name` attribute of the tag
    pub name: String,
    /// Expected `content` attribute
    #[serde(default)]
    pub content: String,
    /// Match confidence
    #[serde(default)]
    pub confidence: f32,
}

/// Page body signature.
///
/// `signature` holds matching tokens; `text` holds literal content samples
/// that are kept exactly as written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageContentSignature {
    /// Part of the page to search
    #[serde(default)]
    pub key: String,
    /// Matching tokens
    #[serde(default)]
    pub signature: Vec<String>,
    /// Content samples
    #[serde(default)]
    pub text: Vec<String>,
    /// Match confidence
    #[serde(default)]
    pub confidence: f32,
}

/// Fragment expected in the URL of a matching page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UrlMicroSignature {
    /// URL fragment
    pub signature: String,
    /// Match confidence
    #[serde(default)]
    pub confidence: f32,
}

/// TLS handshake fingerprint (JA3, JA4, JARM...).
///
/// Opaque to this crate: returned exactly as written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SslSignature {
    /// Fingerprint family, e.g. `JA3`
    pub key: String,
    /// Fingerprint hashes
    #[serde(default)]
    pub value: Vec<String>,
    /// Match confidence
    #[serde(default)]
    pub confidence: f32,
}

/// External plugin invocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PluginCall {
    /// Registered plugin name
    pub plugin_name: String,
    /// Arguments passed to the plugin
    #[serde(default)]
    pub plugin_args: Vec<PluginParams>,
}

/// Named argument passed to a plugin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PluginParams {
    /// Argument name
    pub arg_name: String,
    /// Argument value, passed through as written
    #[serde(default)]
    pub arg_value: CustomValue,
    /// Optional description of how the plugin should treat the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PluginParamsProperties>,
}

/// Metadata attached to a plugin argument.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PluginParamsProperties {
    /// Declared value type, e.g. `string` or `number`
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub value_type: String,
    /// Any other keys, kept as written
    #[serde(flatten)]
    pub extra: BTreeMap<String, CustomValue>,
}

/// Named group of crawling and detection rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleGroup {
    /// Group name
    pub group_name: String,
    /// Disabled groups are skipped when rules are collected
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
    /// Crawling rules of the group
    #[serde(default)]
    pub crawling_rules: Vec<CrawlingRule>,
    /// Detection rules of the group
    #[serde(default)]
    pub detection_rules: Vec<DetectionRule>,
}

/// Top-level rule file document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ruleset {
    /// Ruleset name
    pub name: String,
    /// Groups in document order
    #[serde(default)]
    pub rule_groups: Vec<RuleGroup>,
}

fn default_enabled() -> bool {
    true
}

impl Ruleset {
    /// Detection rules of every enabled group, in document order.
    pub fn detection_rules(&self) -> Vec<DetectionRule> {
        self.enabled_groups()
            .flat_map(|group| group.detection_rules.iter().cloned())
            .collect()
    }

    /// Crawling rules of every enabled group, in document order.
    pub fn crawling_rules(&self) -> Vec<CrawlingRule> {
        self.enabled_groups()
            .flat_map(|group| group.crawling_rules.iter().cloned())
            .collect()
    }

    /// Looks up an enabled group by name (trimmed, case-insensitive).
    pub fn group(&self, name: &str) -> Option<&RuleGroup> {
        let wanted = name.trim().to_lowercase();
        self.enabled_groups()
            .find(|group| group.group_name.trim().to_lowercase() == wanted)
    }

    fn enabled_groups(&self) -> impl Iterator<Item = &RuleGroup> {
        self.rule_groups.iter().filter(|group| group.is_enabled)
    }
}
