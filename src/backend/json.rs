//! JSON backend (serde_json, key order preserved)

use super::{Backend, Capabilities, FormatDescriptor};
use crate::error::BoxError;
use crate::tree::{ConfigTree, Mapping};
use serde_json::Value;

pub struct JsonBackend;

pub fn descriptor() -> FormatDescriptor {
    FormatDescriptor::new("json", &["json", "jsn", "js"], Capabilities::PARSE_AND_DUMP, JsonBackend)
}

impl Backend for JsonBackend {
    fn parse(&self, content: &str) -> Result<ConfigTree, BoxError> {
        Ok(from_str(content)?)
    }

    fn serialize(&self, tree: &ConfigTree) -> Result<String, BoxError> {
        let mut text = serde_json::to_string_pretty(tree)?;
        text.push('\n');
        Ok(text)
    }
}

pub(crate) fn from_str(content: &str) -> serde_json::Result<ConfigTree> {
    let value: Value = serde_json::from_str(content)?;
    Ok(from_value(value))
}

pub(crate) fn from_value(value: Value) -> ConfigTree {
    match value {
        Value::Null => ConfigTree::Null,
        Value::Bool(b) => ConfigTree::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ConfigTree::Integer(i),
            // u64 beyond i64::MAX and real floats both land here.
            None => ConfigTree::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => ConfigTree::String(s),
        Value::Array(items) => ConfigTree::Sequence(items.into_iter().map(from_value).collect()),
        Value::Object(map) => {
            ConfigTree::Mapping(map.into_iter().map(|(k, v)| (k, from_value(v))).collect::<Mapping>())
        }
    }
}
