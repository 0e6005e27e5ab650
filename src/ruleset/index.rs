//! Detection signature indices.
//!
//! Groups the signatures of a rule collection by target object so a page
//! matcher can look up everything known about one object at once.
//!
//! - Keys are object names, trimmed and lower-cased; rules whose names differ
//!   only in case or whitespace share one entry.
//! - Entries are appended in rule order, then in order within a rule.
//!   Duplicates are kept.
//! - Enumeration follows the order in which object names were first seen.
//!
//! Header indices have one more level, keyed by the lower-cased header key.

use std::collections::HashMap;

use log::debug;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::HEADER_KEY_WILDCARD;
use crate::ruleset::detection::normalize_key;
use crate::ruleset::models::{
    DetectionRule, HttpHeaderField, MetaTag, PageContentSignature, PluginCall, SslSignature,
    UrlMicroSignature,
};

/// Insertion-ordered map from normalized name to `V`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedIndex<V> {
    order: Vec<String>,
    entries: HashMap<String, V>,
}

/// Object name to the signatures of one kind.
pub type SignatureIndex<T> = KeyedIndex<Vec<T>>;

/// Object name to header key to header fields.
pub type HeaderIndex = KeyedIndex<KeyedIndex<Vec<HttpHeaderField>>>;

impl<V> Default for KeyedIndex<V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }
}

impl<V> KeyedIndex<V> {
    /// Looks up `name` after normalizing it (trim, lower-case).
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(&normalize_key(name))
    }

    /// Whether `name` (normalized) has an entry.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_key(name))
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|v| (key.as_str(), v)))
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the index has no objects.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<V: Default> KeyedIndex<V> {
    /// Entry for an already-normalized key, created on first use.
    fn entry_mut(&mut self, key: String) -> &mut V {
        if !self.entries.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.entries.entry(key).or_default()
    }
}

impl<T> KeyedIndex<Vec<T>> {
    /// Total number of signatures across all keys.
    pub fn signature_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl<V: Serialize> Serialize for KeyedIndex<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Header fields keyed `*` (apply to any header), grouped by object.
pub fn all_http_header_fields_map(rules: &[DetectionRule]) -> HeaderIndex {
    header_index(rules, |key| key == HEADER_KEY_WILDCARD)
}

/// Header fields whose key equals `key` (trimmed, case-insensitive),
/// grouped by object.
pub fn http_header_fields_map_by_key(rules: &[DetectionRule], key: &str) -> HeaderIndex {
    let wanted = normalize_key(key);
    header_index(rules, |field_key| normalize_key(field_key) == wanted)
}

fn header_index(rules: &[DetectionRule], keep: impl Fn(&str) -> bool) -> HeaderIndex {
    let mut index = HeaderIndex::default();
    for rule in rules {
        for field in rule.all_http_header_fields() {
            if !keep(&field.key) {
                continue;
            }
            index
                .entry_mut(normalize_key(&rule.object_name))
                .entry_mut(normalize_key(&field.key))
                .push(field);
        }
    }
    index
}

/// Groups the output of `select` by normalized object name.
///
/// Every rule registers its object, even when `select` yields nothing.
fn group_by_object<T>(
    rules: &[DetectionRule],
    select: impl Fn(&DetectionRule) -> Vec<T>,
) -> SignatureIndex<T> {
    let mut index = SignatureIndex::default();
    for rule in rules {
        index
            .entry_mut(normalize_key(&rule.object_name))
            .extend(select(rule));
    }
    index
}

/// URL micro-signatures grouped by object.
pub fn all_url_micro_signatures_map(rules: &[DetectionRule]) -> SignatureIndex<UrlMicroSignature> {
    group_by_object(rules, DetectionRule::all_url_micro_signatures)
}

/// Page content patterns grouped by object.
pub fn all_page_content_patterns_map(
    rules: &[DetectionRule],
) -> SignatureIndex<PageContentSignature> {
    group_by_object(rules, DetectionRule::all_page_content_patterns)
}

/// SSL signatures grouped by object.
pub fn all_ssl_signatures_map(rules: &[DetectionRule]) -> SignatureIndex<SslSignature> {
    group_by_object(rules, DetectionRule::all_ssl_signatures)
}

/// Meta tags grouped by object.
pub fn all_meta_tags_map(rules: &[DetectionRule]) -> SignatureIndex<MetaTag> {
    group_by_object(rules, DetectionRule::all_meta_tags)
}

/// Plugin calls grouped by object.
pub fn all_plugin_calls_map(rules: &[DetectionRule]) -> SignatureIndex<PluginCall> {
    group_by_object(rules, |rule| rule.plugin_calls().to_vec())
}

/// Every index built from one rule collection.
///
/// `headers` holds the wildcard header index; use
/// [`http_header_fields_map_by_key`] for a specific header.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DetectionIndex {
    /// Wildcard (`*`) header fields
    pub headers: HeaderIndex,
    /// Meta tag signatures
    pub meta_tags: SignatureIndex<MetaTag>,
    /// Page content patterns
    pub page_content: SignatureIndex<PageContentSignature>,
    /// URL micro-signatures
    pub url_micro_signatures: SignatureIndex<UrlMicroSignature>,
    /// SSL signatures
    pub ssl_signatures: SignatureIndex<SslSignature>,
    /// Plugin calls
    pub plugin_calls: SignatureIndex<PluginCall>,
}

impl DetectionIndex {
    /// Builds all indices from `rules`.
    pub fn build(rules: &[DetectionRule]) -> Self {
        let index = Self {
            headers: all_http_header_fields_map(rules),
            meta_tags: all_meta_tags_map(rules),
            page_content: all_page_content_patterns_map(rules),
            url_micro_signatures: all_url_micro_signatures_map(rules),
            ssl_signatures: all_ssl_signatures_map(rules),
            plugin_calls: all_plugin_calls_map(rules),
        };
        debug!(
            "Built detection index from {} rule(s): {} object(s), {} meta tag(s), {} content pattern(s), {} URL signature(s), {} SSL signature(s)",
            rules.len(),
            index.meta_tags.len(),
            index.meta_tags.signature_count(),
            index.page_content.signature_count(),
            index.url_micro_signatures.signature_count(),
            index.ssl_signatures.signature_count()
        );
        index
    }
}
