//! YAML backend (serde_yaml)

use super::{Backend, Capabilities, FormatDescriptor};
use crate::error::BoxError;
use crate::tree::{ConfigTree, Mapping};
use serde_yaml::Value;

pub struct YamlBackend;

pub fn descriptor() -> FormatDescriptor {
    FormatDescriptor::new("yaml", &["yaml", "yml"], Capabilities::PARSE_AND_DUMP, YamlBackend)
}

impl Backend for YamlBackend {
    fn parse(&self, content: &str) -> Result<ConfigTree, BoxError> {
        // An empty document is an empty configuration, not a null.
        if content.trim().is_empty() {
            return Ok(ConfigTree::empty_mapping());
        }
        let value: Value = serde_yaml::from_str(content)?;
        Ok(from_value(value))
    }

    fn serialize(&self, tree: &ConfigTree) -> Result<String, BoxError> {
        Ok(serde_yaml::to_string(tree)?)
    }
}

fn from_value(value: Value) -> ConfigTree {
    match value {
        Value::Null => ConfigTree::Null,
        Value::Bool(b) => ConfigTree::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ConfigTree::Integer(i),
            None => ConfigTree::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => ConfigTree::String(s),
        Value::Sequence(items) => ConfigTree::Sequence(items.into_iter().map(from_value).collect()),
        Value::Mapping(map) => ConfigTree::Mapping(
            map.into_iter().map(|(k, v)| (key_text(k), from_value(v))).collect::<Mapping>(),
        ),
        Value::Tagged(tagged) => from_value(tagged.value),
    }
}

/// YAML allows non-string keys; the tree does not.
fn key_text(key: Value) -> String {
    match key {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}
