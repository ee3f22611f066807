//! INI backend (rust-ini)
//!
//! Keys outside any section become top-level entries, each `[section]`
//! becomes a nested mapping. Values stay strings.

use super::{Backend, Capabilities, FormatDescriptor};
use crate::error::BoxError;
use crate::tree::{ConfigTree, Mapping};
use ::ini::Ini;

pub struct IniBackend;

pub fn descriptor() -> FormatDescriptor {
    FormatDescriptor::new("ini", &["ini", "cfg", "conf"], Capabilities::PARSE_AND_DUMP, IniBackend)
}

impl Backend for IniBackend {
    fn parse(&self, content: &str) -> Result<ConfigTree, BoxError> {
        let ini = Ini::load_from_str(content)?;
        let mut root = Mapping::new();

        for (section, properties) in ini.iter() {
            let entries: Mapping = properties
                .iter()
                .map(|(key, value)| (key.to_string(), ConfigTree::from(value)))
                .collect();
            match section {
                Some(name) => {
                    root.insert(name.to_string(), ConfigTree::Mapping(entries));
                }
                None => root.extend(entries),
            }
        }
        Ok(ConfigTree::Mapping(root))
    }

    fn serialize(&self, tree: &ConfigTree) -> Result<String, BoxError> {
        let root = tree.as_mapping().ok_or("INI documents must be a mapping at the top level")?;
        let mut ini = Ini::new();

        for (key, value) in root {
            match value {
                ConfigTree::Mapping(section) => {
                    for (entry, entry_value) in section {
                        let text = entry_value.scalar_text().ok_or_else(|| {
                            format!("INI value [{key}] {entry} must be a scalar")
                        })?;
                        ini.with_section(Some(key.as_str())).set(entry.as_str(), text);
                    }
                }
                scalar => {
                    let text = scalar
                        .scalar_text()
                        .ok_or_else(|| format!("INI value {key} must be a scalar or a section"))?;
                    ini.with_general_section().set(key.as_str(), text);
                }
            }
        }

        let mut buf = Vec::new();
        ini.write_to(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
