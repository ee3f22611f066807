//! In-memory configuration tree
//!
//! Every backend parses into a [`ConfigTree`] and every dumper serializes one.
//! Mappings keep insertion order so a load/dump cycle does not reshuffle keys.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Ordered string-keyed mapping used for configuration sections.
pub type Mapping = IndexMap<String, ConfigTree>;

/// A configuration value: a scalar, a sequence, or a mapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfigTree {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<ConfigTree>),
    Mapping(Mapping),
}

impl ConfigTree {
    /// An empty mapping, the starting point of every multi-file load.
    pub fn empty_mapping() -> Self {
        ConfigTree::Mapping(Mapping::new())
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, ConfigTree::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, ConfigTree::Sequence(_))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            ConfigTree::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigTree]> {
        match self {
            ConfigTree::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigTree::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigTree::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Look up a key when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&ConfigTree> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Follow a dotted path (`server.tls.port`) through nested mappings.
    pub fn get_path(&self, dotted: &str) -> Option<&ConfigTree> {
        dotted.split('.').try_fold(self, |node, key| node.get(key))
    }

    /// Render a scalar as plain text, as flat formats (INI, properties) store it.
    ///
    /// Returns `None` for sequences and mappings.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            ConfigTree::Null => Some(String::new()),
            ConfigTree::Bool(b) => Some(b.to_string()),
            ConfigTree::Integer(i) => Some(i.to_string()),
            ConfigTree::Float(f) => Some(f.to_string()),
            ConfigTree::String(s) => Some(s.clone()),
            ConfigTree::Sequence(_) | ConfigTree::Mapping(_) => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ConfigTree::Null => "null",
            ConfigTree::Bool(_) => "bool",
            ConfigTree::Integer(_) => "integer",
            ConfigTree::Float(_) => "float",
            ConfigTree::String(_) => "string",
            ConfigTree::Sequence(_) => "sequence",
            ConfigTree::Mapping(_) => "mapping",
        }
    }
}

impl fmt::Display for ConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scalar_text() {
            Some(text) => f.write_str(&text),
            None => write!(f, "<{}>", self.kind()),
        }
    }
}

impl Serialize for ConfigTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigTree::Null => serializer.serialize_unit(),
            ConfigTree::Bool(b) => serializer.serialize_bool(*b),
            ConfigTree::Integer(i) => serializer.serialize_i64(*i),
            ConfigTree::Float(f) => serializer.serialize_f64(*f),
            ConfigTree::String(s) => serializer.serialize_str(s),
            ConfigTree::Sequence(items) => items.serialize(serializer),
            ConfigTree::Mapping(map) => map.serialize(serializer),
        }
    }
}

impl From<bool> for ConfigTree {
    fn from(value: bool) -> Self {
        ConfigTree::Bool(value)
    }
}

impl From<i64> for ConfigTree {
    fn from(value: i64) -> Self {
        ConfigTree::Integer(value)
    }
}

impl From<f64> for ConfigTree {
    fn from(value: f64) -> Self {
        ConfigTree::Float(value)
    }
}

impl From<&str> for ConfigTree {
    fn from(value: &str) -> Self {
        ConfigTree::String(value.to_string())
    }
}

impl From<String> for ConfigTree {
    fn from(value: String) -> Self {
        ConfigTree::String(value)
    }
}

impl From<Mapping> for ConfigTree {
    fn from(value: Mapping) -> Self {
        ConfigTree::Mapping(value)
    }
}

impl<T: Into<ConfigTree>> From<Vec<T>> for ConfigTree {
    fn from(value: Vec<T>) -> Self {
        ConfigTree::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<ConfigTree>> FromIterator<(K, V)> for ConfigTree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ConfigTree::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
