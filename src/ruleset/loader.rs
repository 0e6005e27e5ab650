//! Rule document reading.
//!
//! This module reads rule files from local paths:
//! - `.json` files with `serde_json`, `.yaml`/`.yml` files with `serde_yaml`
//! - a rule file holds either a `Ruleset` document or a bare list of
//!   detection rules
//! - a directory is read file by file in name order; unreadable files are
//!   skipped with a warning
//!
//! Schema validation is not performed here.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error_handling::RuleLoadError;
use crate::plan::SourceConfig;
use crate::ruleset::models::{DetectionRule, Ruleset};

/// Accepted shapes of a detection rule file.
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleDocument {
    Ruleset(Ruleset),
    Rules(Vec<DetectionRule>),
}

enum DocumentFormat {
    Json,
    Yaml,
}

fn format_of(path: &Path) -> Option<DocumentFormat> {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("json") => Some(DocumentFormat::Json),
        Some("yaml") | Some("yml") => Some(DocumentFormat::Yaml),
        _ => None,
    }
}

/// Reads and deserializes one JSON or YAML document.
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, RuleLoadError> {
    let display = path.display().to_string();
    let format =
        format_of(path).ok_or_else(|| RuleLoadError::UnsupportedFormat(display.clone()))?;
    let content = fs::read_to_string(path).map_err(|source| RuleLoadError::Io {
        path: display.clone(),
        source,
    })?;

    match format {
        DocumentFormat::Json => {
            serde_json::from_str(&content).map_err(|source| RuleLoadError::Json {
                path: display,
                source,
            })
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(&content).map_err(|source| RuleLoadError::Yaml {
                path: display,
                source,
            })
        }
    }
}

fn rules_from_file(path: &Path) -> Result<Vec<DetectionRule>, RuleLoadError> {
    let rules = match read_document::<RuleDocument>(path)? {
        RuleDocument::Ruleset(ruleset) => ruleset.detection_rules(),
        RuleDocument::Rules(rules) => rules,
    };
    debug!("Loaded {} detection rule(s) from {}", rules.len(), path.display());
    Ok(rules)
}

/// Loads detection rules from a file or a directory of rule files.
///
/// # Errors
///
/// For a single file, any read or parse failure. For a directory, only a
/// failure to list it; individual bad files are skipped with a warning.
pub fn load_detection_rules(path: &Path) -> Result<Vec<DetectionRule>, RuleLoadError> {
    if !path.is_dir() {
        return rules_from_file(path);
    }

    let entries = fs::read_dir(path).map_err(|source| RuleLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut files: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && format_of(p).is_some())
        .collect();
    files.sort();

    let mut all_rules = Vec::new();
    for file in files {
        match rules_from_file(&file) {
            Ok(rules) => all_rules.extend(rules),
            Err(e) => warn!("Skipping rule file {}: {}", file.display(), e),
        }
    }
    Ok(all_rules)
}

/// Loads a ruleset document.
pub fn load_ruleset(path: &Path) -> Result<Ruleset, RuleLoadError> {
    read_document(path)
}

/// Loads a source configuration document.
pub fn load_source_config(path: &Path) -> Result<SourceConfig, RuleLoadError> {
    read_document(path)
}
