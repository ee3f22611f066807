//! Java properties backend (java-properties)
//!
//! Properties are flat: parsing yields a single mapping of strings, and
//! dumping flattens nested mappings into dotted keys.

use super::{Backend, Capabilities, FormatDescriptor};
use crate::error::BoxError;
use crate::tree::{ConfigTree, Mapping};
use encoding_rs::UTF_8;
use java_properties::{PropertiesIter, PropertiesWriter};

pub struct PropertiesBackend;

pub fn descriptor() -> FormatDescriptor {
    FormatDescriptor::new(
        "properties",
        &["properties", "props"],
        Capabilities::PARSE_AND_DUMP,
        PropertiesBackend,
    )
}

impl Backend for PropertiesBackend {
    fn parse(&self, content: &str) -> Result<ConfigTree, BoxError> {
        let mut map = Mapping::new();
        PropertiesIter::new_with_encoding(content.as_bytes(), UTF_8).read_into(|key, value| {
            map.insert(key, ConfigTree::String(value));
        })?;
        Ok(ConfigTree::Mapping(map))
    }

    fn serialize(&self, tree: &ConfigTree) -> Result<String, BoxError> {
        let root = tree.as_mapping().ok_or("properties documents must be a mapping at the top level")?;
        let mut flat = Vec::new();
        flatten("", root, &mut flat)?;

        let mut buf = Vec::new();
        {
            let mut writer = PropertiesWriter::new_with_encoding(&mut buf, UTF_8);
            for (key, value) in &flat {
                writer.write(key, value)?;
            }
            writer.finish()?;
        }
        Ok(String::from_utf8(buf)?)
    }
}

fn flatten(prefix: &str, map: &Mapping, out: &mut Vec<(String, String)>) -> Result<(), BoxError> {
    for (key, value) in map {
        let full_key = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
        match value {
            ConfigTree::Mapping(nested) => flatten(&full_key, nested, out)?,
            other => {
                let text = other
                    .scalar_text()
                    .ok_or_else(|| format!("property {full_key} is a sequence; properties are flat"))?;
                out.push((full_key, text));
            }
        }
    }
    Ok(())
}
