//! Normalizing accessors for detection rules.
//!
//! Matching tokens written by people (header keys and values, meta names,
//! URL fragments, content signatures) are trimmed. Content samples
//! (`PageContentSignature::text`) and SSL fingerprints are returned as
//! written.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::ruleset::models::{
    DetectionRule, HttpHeaderField, MetaTag, PageContentSignature, PluginCall, SslSignature,
    UrlMicroSignature,
};

/// Index key for a name: trimmed and lower-cased.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn trimmed_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.trim().to_string()).collect()
}

impl DetectionRule {
    /// Trimmed rule name.
    pub fn rule_name(&self) -> &str {
        self.rule_name.trim()
    }

    /// Name of the object targeted by the rule, trimmed.
    pub fn object_name(&self) -> &str {
        self.object_name.trim()
    }

    /// Implied rule/object names as written (raw adjacency).
    pub fn implies(&self) -> &[String] {
        &self.implies
    }

    /// Plugin calls as written.
    pub fn plugin_calls(&self) -> &[PluginCall] {
        &self.plugin_calls
    }

    /// Header fields with trimmed keys and values.
    pub fn all_http_header_fields(&self) -> Vec<HttpHeaderField> {
        self.http_header_fields
            .iter()
            .map(|field| HttpHeaderField {
                key: field.key().to_string(),
                value: field.all_values(),
                confidence: field.confidence,
            })
            .collect()
    }

    /// Page content patterns with trimmed keys and signatures; `text` is
    /// kept verbatim.
    pub fn all_page_content_patterns(&self) -> Vec<PageContentSignature> {
        self.page_content_patterns
            .iter()
            .map(|pattern| PageContentSignature {
                key: pattern.key.trim().to_string(),
                signature: trimmed_all(&pattern.signature),
                text: pattern.text.clone(),
                confidence: pattern.confidence,
            })
            .collect()
    }

    /// SSL signatures, returned verbatim.
    pub fn all_ssl_signatures(&self) -> Vec<SslSignature> {
        self.ssl_signatures.clone()
    }

    /// URL micro-signatures with trimmed signatures.
    pub fn all_url_micro_signatures(&self) -> Vec<UrlMicroSignature> {
        self.url_micro_signatures
            .iter()
            .map(|sig| UrlMicroSignature {
                signature: sig.signature.trim().to_string(),
                confidence: sig.confidence,
            })
            .collect()
    }

    /// Meta tags with trimmed names and content.
    pub fn all_meta_tags(&self) -> Vec<MetaTag> {
        self.meta_tags
            .iter()
            .map(|tag| MetaTag {
                name: tag.name().to_string(),
                content: tag.content().to_string(),
                confidence: tag.confidence,
            })
            .collect()
    }
}

impl HttpHeaderField {
    /// Trimmed header key.
    pub fn key(&self) -> &str {
        self.key.trim()
    }

    /// Trimmed value at `index`, or `""` when out of range.
    pub fn value(&self, index: usize) -> &str {
        self.value.get(index).map(|v| v.trim()).unwrap_or("")
    }

    /// All values, each trimmed.
    pub fn all_values(&self) -> Vec<String> {
        trimmed_all(&self.value)
    }

    /// Match confidence.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Whether this field's key equals `key`, ignoring case and surrounding
    /// whitespace.
    pub fn key_matches(&self, key: &str) -> bool {
        normalize_key(&self.key) == normalize_key(key)
    }
}

impl MetaTag {
    /// Trimmed meta tag name.
    pub fn name(&self) -> &str {
        self.name.trim()
    }

    /// Trimmed meta tag content.
    pub fn content(&self) -> &str {
        self.content.trim()
    }

    /// Match confidence.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }
}

/// Every name reachable from `name` through `implies`, in discovery order.
///
/// Edges are looked up by both rule name and object name (normalized).
/// Cycles are tolerated: each name is visited once and `name` itself is
/// never part of the result.
pub fn implied_closure(rules: &[DetectionRule], name: &str) -> Vec<String> {
    let mut edges: HashMap<String, Vec<&str>> = HashMap::new();
    for rule in rules {
        let targets: Vec<&str> = rule.implies().iter().map(|s| s.trim()).collect();
        for key in [normalize_key(&rule.rule_name), normalize_key(&rule.object_name)] {
            if !key.is_empty() {
                edges.entry(key).or_default().extend(targets.iter().copied());
            }
        }
    }

    let start = normalize_key(name);
    let mut seen: HashSet<String> = HashSet::from([start.clone()]);
    let mut queue: VecDeque<String> = VecDeque::from([start]);
    let mut closure = Vec::new();

    while let Some(current) = queue.pop_front() {
        let Some(targets) = edges.get(&current) else {
            continue;
        };
        for target in targets {
            let key = normalize_key(target);
            if key.is_empty() || !seen.insert(key.clone()) {
                continue;
            }
            closure.push(target.to_string());
            queue.push_back(key);
        }
    }

    closure
}
