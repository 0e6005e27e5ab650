//! Typed value for free-form configuration bags.
//!
//! Fields such as `custom`, `additional_conditions` and plugin argument
//! values accept arbitrary data. They are held as [`CustomValue`] so the
//! shape stays explicit when documents are read and written back.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A JSON/YAML-compatible value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomValue {
    /// Absent or explicit null
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer; listed before `Float` so whole numbers stay integral
    Int(i64),
    /// Non-integral number, or an integer outside the `i64` range
    Float(f64),
    /// String
    String(String),
    /// Ordered sequence
    List(Vec<CustomValue>),
    /// String-keyed mapping, sorted by key
    Map(BTreeMap<String, CustomValue>),
}

impl CustomValue {
    /// Whether the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CustomValue::Null)
    }

    /// The string, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CustomValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, if this is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CustomValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The number as `f64`, if this is an `Int` or a `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CustomValue::Int(n) => Some(*n as f64),
            CustomValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CustomValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The items, if this is a `List`.
    pub fn as_list(&self) -> Option<&[CustomValue]> {
        match self {
            CustomValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up `key` if this is a `Map`.
    pub fn get(&self, key: &str) -> Option<&CustomValue> {
        match self {
            CustomValue::Map(map) => map.get(key),
            _ => None,
        }
    }
}

impl fmt::Display for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomValue::Null => write!(f, "null"),
            CustomValue::Bool(b) => write!(f, "{}", b),
            CustomValue::Int(n) => write!(f, "{}", n),
            CustomValue::Float(n) => write!(f, "{}", n),
            CustomValue::String(s) => write!(f, "{}", s),
            other => {
                let json = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

impl From<&str> for CustomValue {
    fn from(s: &str) -> Self {
        CustomValue::String(s.to_string())
    }
}

impl From<String> for CustomValue {
    fn from(s: String) -> Self {
        CustomValue::String(s)
    }
}

impl From<i64> for CustomValue {
    fn from(n: i64) -> Self {
        CustomValue::Int(n)
    }
}

impl From<f64> for CustomValue {
    fn from(n: f64) -> Self {
        CustomValue::Float(n)
    }
}

impl From<bool> for CustomValue {
    fn from(b: bool) -> Self {
        CustomValue::Bool(b)
    }
}

impl From<Vec<CustomValue>> for CustomValue {
    fn from(items: Vec<CustomValue>) -> Self {
        CustomValue::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mixed_json() {
        let json = r#"{"depth": 3, "follow": true, "tags": ["a", null], "name": "x"}"#;
        let value: CustomValue = serde_json::from_str(json).unwrap();

        assert_eq!(value.get("depth").and_then(CustomValue::as_i64), Some(3));
        assert_eq!(value.get("depth").and_then(CustomValue::as_f64), Some(3.0));
        assert_eq!(value.get("follow").and_then(CustomValue::as_bool), Some(true));
        assert_eq!(value.get("name").and_then(CustomValue::as_str), Some("x"));
        let tags = value.get("tags").and_then(CustomValue::as_list).unwrap();
        assert_eq!(tags, &[CustomValue::from("a"), CustomValue::Null]);
    }

    #[test]
    fn test_json_round_trip_keeps_shape() {
        let json = r#"{"limits":{"max":10.5,"on":false},"list":[1.0,"two"]}"#;
        let value: CustomValue = serde_json::from_str(json).unwrap();
        let back = serde_json::to_string(&value).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn test_integers_stay_integral() {
        let json = r#"{"big":9007199254740993,"ratio":0.5,"retries":2}"#;
        let value: CustomValue = serde_json::from_str(json).unwrap();
        assert_eq!(value.get("retries"), Some(&CustomValue::Int(2)));
        assert_eq!(value.get("ratio"), Some(&CustomValue::Float(0.5)));
        assert_eq!(
            value.get("big").and_then(CustomValue::as_i64),
            Some(9_007_199_254_740_993)
        );
        assert_eq!(serde_json::to_string(&value).unwrap(), json);

        let yaml_value: CustomValue = serde_yaml::from_str("retries: 2
").unwrap();
        assert_eq!(
            serde_json::to_string(&yaml_value).unwrap(),
            r#"{"retries":2}"#
        );
    }

    #[test]
    fn test_yaml_values() {
        let yaml = "enabled: yes\nretries: 2\nempty: ~\n";
        let value: CustomValue = serde_yaml::from_str(yaml).unwrap();
        // YAML 1.2 treats `yes` as a plain string
        assert_eq!(value.get("enabled").and_then(CustomValue::as_str), Some("yes"));
        assert_eq!(value.get("retries").and_then(CustomValue::as_i64), Some(2));
        assert!(value.get("empty").is_some_and(CustomValue::is_null));
    }

    #[test]
    fn test_display() {
        assert_eq!(CustomValue::from("abc").to_string(), "abc");
        assert_eq!(CustomValue::from(2.5).to_string(), "2.5");
        assert_eq!(CustomValue::from(7_i64).to_string(), "7");
        assert_eq!(
            CustomValue::from(vec![CustomValue::from(true)]).to_string(),
            "[true]"
        );
    }
}
