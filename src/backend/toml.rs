//! TOML backend
//!
//! TOML has no null and requires a table at the top level; serializing a
//! tree that breaks either rule fails instead of silently dropping data.
//! Datetimes load as their RFC 3339 text.

use super::{Backend, Capabilities, FormatDescriptor};
use crate::error::BoxError;
use crate::tree::{ConfigTree, Mapping};
use ::toml::Value;

pub struct TomlBackend;

pub fn descriptor() -> FormatDescriptor {
    FormatDescriptor::new("toml", &["toml"], Capabilities::PARSE_AND_DUMP, TomlBackend)
}

impl Backend for TomlBackend {
    fn parse(&self, content: &str) -> Result<ConfigTree, BoxError> {
        let table: ::toml::Table = ::toml::from_str(content)?;
        Ok(from_value(Value::Table(table)))
    }

    fn serialize(&self, tree: &ConfigTree) -> Result<String, BoxError> {
        if !tree.is_mapping() {
            return Err("TOML documents must be a mapping at the top level".into());
        }
        Ok(::toml::to_string_pretty(tree)?)
    }
}

fn from_value(value: Value) -> ConfigTree {
    match value {
        Value::String(s) => ConfigTree::String(s),
        Value::Integer(i) => ConfigTree::Integer(i),
        Value::Float(f) => ConfigTree::Float(f),
        Value::Boolean(b) => ConfigTree::Bool(b),
        Value::Datetime(dt) => ConfigTree::String(dt.to_string()),
        Value::Array(items) => ConfigTree::Sequence(items.into_iter().map(from_value).collect()),
        Value::Table(table) => {
            ConfigTree::Mapping(table.into_iter().map(|(k, v)| (k, from_value(v))).collect::<Mapping>())
        }
    }
}
