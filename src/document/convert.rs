//! Conversions between `Tree` and the serde value types of the supported
//! document formats.

use super::node::{Tree, TreeNumber};
use indexmap::IndexMap;

impl From<serde_json::Value> for Tree {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Tree::Null,
            serde_json::Value::Bool(b) => Tree::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Tree::Number(TreeNumber::Integer(i)),
                None => n
                    .as_f64()
                    .map_or(Tree::Null, |f| Tree::Number(TreeNumber::Float(f))),
            },
            serde_json::Value::String(s) => Tree::String(s),
            serde_json::Value::Array(items) => {
                Tree::Array(items.into_iter().map(Tree::from).collect())
            }
            serde_json::Value::Object(entries) => Tree::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Tree::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_yaml::Value> for Tree {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Tree::Null,
            serde_yaml::Value::Bool(b) => Tree::Boolean(b),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => Tree::Number(TreeNumber::Integer(i)),
                None => n
                    .as_f64()
                    .map_or(Tree::Null, |f| Tree::Number(TreeNumber::Float(f))),
            },
            serde_yaml::Value::String(s) => Tree::String(s),
            serde_yaml::Value::Sequence(items) => {
                Tree::Array(items.into_iter().map(Tree::from).collect())
            }
            serde_yaml::Value::Mapping(mapping) => {
                let mut entries = IndexMap::with_capacity(mapping.len());
                for (key, value) in mapping {
                    entries.insert(yaml_key_to_string(key), Tree::from(value));
                }
                Tree::Object(entries)
            }
            serde_yaml::Value::Tagged(tagged) => Tree::from(tagged.value),
        }
    }
}

/// Renders a YAML mapping key as a plain string key.
fn yaml_key_to_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl From<toml::Value> for Tree {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Tree::String(s),
            toml::Value::Integer(i) => Tree::Number(TreeNumber::Integer(i)),
            toml::Value::Float(f) => Tree::Number(TreeNumber::Float(f)),
            toml::Value::Boolean(b) => Tree::Boolean(b),
            toml::Value::Datetime(dt) => Tree::String(dt.to_string()),
            toml::Value::Array(items) => Tree::Array(items.into_iter().map(Tree::from).collect()),
            toml::Value::Table(table) => Tree::Object(
                table
                    .into_iter()
                    .map(|(key, value)| (key, Tree::from(value)))
                    .collect(),
            ),
        }
    }
}
